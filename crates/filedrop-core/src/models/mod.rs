pub mod upload;

pub use upload::{NewUpload, Upload, UploadAccepted, UploadStatus};
