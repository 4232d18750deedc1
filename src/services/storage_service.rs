use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;

use crate::utils::AppError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads a local file, overwriting whatever is stored under `key`.
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), AppError>;
}

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), AppError> {
        log::info!("☁️  Uploading {} to s3://{}/{}", path.display(), bucket, key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                AppError::StorageError(format!(
                    "PutObject s3://{}/{} failed: {}",
                    bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        log::info!("✅ Uploaded s3://{}/{}", bucket, key);
        Ok(())
    }
}
