//! Upload record store: trait plus Postgres and in-memory implementations.
//!
//! The store is the single durable mapping from upload id to lifecycle state.
//! Everything above it takes an injected `Arc<dyn UploadStore>`; there is no
//! process-wide store singleton.

mod memory;
mod postgres;
mod store;

pub use memory::InMemoryUploadStore;
pub use postgres::PgUploadStore;
pub use store::UploadStore;
