// Transfer module
//
// Time-limited upload/view URLs for transcript objects. The provider is the
// external boundary and performs no validation; key construction and file
// name validation live here in the core.

pub mod keys;
pub mod s3_provider;

pub use keys::{transcript_key, validate_file_name, ObjectStorePrefix};
pub use s3_provider::S3TransferProvider;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("{0}")]
    InvalidFileName(String),
    #[error("failed to presign {operation} for key {key}: {message}")]
    Presign {
        operation: &'static str,
        key: String,
        message: String,
    },
}

/// Issues time-limited capability URLs for one object-store key.
#[async_trait]
pub trait TransferProvider: Send + Sync {
    async fn issue_upload_url(&self, key: &str) -> Result<String, TransferError>;
    async fn issue_view_url(&self, key: &str) -> Result<String, TransferError>;
}
