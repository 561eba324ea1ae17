pub mod lifecycle;
pub mod relocation;
