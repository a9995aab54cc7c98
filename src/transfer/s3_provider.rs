//! S3-backed transfer provider
//!
//! Presigns PutObject/GetObject requests with a fixed expiry window. The
//! client is built once at startup from explicit configuration.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use super::{TransferError, TransferProvider};
use crate::config::TransferConfig;

pub struct S3TransferProvider {
    client: Client,
    bucket: String,
    expiry: Duration,
}

impl S3TransferProvider {
    pub async fn new(config: &TransferConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
            expiry: Duration::from_secs(config.presign_expiry_secs),
        }
    }

    fn presigning_config(&self, operation: &'static str, key: &str) -> Result<PresigningConfig, TransferError> {
        PresigningConfig::expires_in(self.expiry).map_err(|e| TransferError::Presign {
            operation,
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TransferProvider for S3TransferProvider {
    async fn issue_upload_url(&self, key: &str) -> Result<String, TransferError> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(self.presigning_config("upload", key)?)
            .await
            .map_err(|e| TransferError::Presign {
                operation: "upload",
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(presigned.uri().to_string())
    }

    async fn issue_view_url(&self, key: &str) -> Result<String, TransferError> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(self.presigning_config("view", key)?)
            .await
            .map_err(|e| TransferError::Presign {
                operation: "view",
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(presigned.uri().to_string())
    }
}
