//! Application state.
//!
//! The store handle is injected explicitly and shared via `Arc`; there is no
//! process-wide singleton.

use crate::services::lifecycle::UploadLifecycle;
use filedrop_core::Config;
use filedrop_db::UploadStore;
use std::sync::Arc;

/// State shared by every request handler.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn UploadStore>,
    pub lifecycle: UploadLifecycle,
}
