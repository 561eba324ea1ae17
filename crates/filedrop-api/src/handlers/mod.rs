pub mod health;
pub mod list_files;
pub mod upload;
pub mod upload_status;
