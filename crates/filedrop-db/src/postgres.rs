use async_trait::async_trait;
use filedrop_core::models::{NewUpload, Upload, UploadStatus};
use filedrop_core::AppError;
use sqlx::{PgPool, Row};

use crate::store::UploadStore;

/// Postgres-backed upload store.
#[derive(Clone)]
pub struct PgUploadStore {
    pool: PgPool,
}

impl PgUploadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadStore for PgUploadStore {
    async fn create(&self, new: NewUpload) -> Result<i64, AppError> {
        // Dynamic SQLx queries to avoid requiring DATABASE_URL at build time
        let row = sqlx::query(
            r#"
            INSERT INTO uploads (filename, source_path, destination_path, status, error_message)
            VALUES ($1, $2, $3, 'pending', '')
            RETURNING id
            "#,
        )
        .bind(&new.filename)
        .bind(&new.source_path)
        .bind(&new.destination_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    async fn set_terminal_status(
        &self,
        id: i64,
        status: UploadStatus,
        error_message: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE uploads
            SET status = $2, error_message = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(error_message)
        .execute(&self.pool)
        .await?;

        // A missing row here means the record was never created or the
        // backing table was tampered with; either way it is a storage fault,
        // not a caller error.
        if result.rows_affected() == 0 {
            return Err(AppError::Internal(format!(
                "no upload record with id {} to update",
                id
            )));
        }

        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Upload, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, filename, source_path, destination_path, upload_time, status, error_message
            FROM uploads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let status: UploadStatus =
                    row.get::<String, _>("status").parse().map_err(|e| {
                        AppError::Internal(format!("Failed to parse upload status: {}", e))
                    })?;
                Ok(Upload {
                    id: row.get("id"),
                    filename: row.get("filename"),
                    source_path: row.get("source_path"),
                    destination_path: row.get("destination_path"),
                    upload_time: row.get("upload_time"),
                    status,
                    error_message: row.get("error_message"),
                })
            }
            None => Err(AppError::NotFound(format!("Upload {} not found", id))),
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
