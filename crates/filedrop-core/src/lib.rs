//! Core domain types for the filedrop service: upload models, error
//! taxonomy, and environment-driven configuration.

pub mod config;
pub mod error;
pub mod models;

pub use config::{Config, StoreBackend};
pub use error::{AppError, LogLevel};
