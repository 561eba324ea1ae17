use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

/// Lifecycle state of an upload record.
///
/// Transitions are one-directional: `Pending -> Success` or
/// `Pending -> Failed`. A record never leaves a terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Success,
    Failed,
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Success | UploadStatus::Failed)
    }
}

impl Display for UploadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadStatus::Pending => write!(f, "pending"),
            UploadStatus::Success => write!(f, "success"),
            UploadStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for UploadStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UploadStatus::Pending),
            "success" => Ok(UploadStatus::Success),
            "failed" => Ok(UploadStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid upload status: {}", s)),
        }
    }
}

/// A single upload record. `error_message` is non-empty exactly when
/// `status` is `failed`; `source_path` and `destination_path` are fixed at
/// creation and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Upload {
    pub id: i64,
    pub filename: String,
    pub source_path: String,
    pub destination_path: String,
    pub upload_time: DateTime<Utc>,
    pub status: UploadStatus,
    pub error_message: String,
}

/// Fields supplied by the lifecycle controller when creating a record.
/// The store assigns the id, the upload time, and the initial `pending`
/// status itself.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub filename: String,
    pub source_path: String,
    pub destination_path: String,
}

/// Response body for an accepted upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadAccepted {
    pub message: String,
    #[serde(rename = "uploadID")]
    pub upload_id: i64,
}
