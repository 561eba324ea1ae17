//! Filedrop API Library
//!
//! HTTP surface for the upload relocation service: handlers, application
//! state, setup, and the upload lifecycle service with its background
//! relocation task.

mod api_doc;
mod telemetry;

// Public modules (also used by the integration tests)
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use services::lifecycle::UploadLifecycle;
