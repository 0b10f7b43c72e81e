use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::gcp_auth::{AuthError, TokenSource};

const UPLOAD_URL: &str = "https://storage.googleapis.com/upload/storage/v1/b";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("upload of {key} failed: {source}")]
    Http {
        key: String,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait ObjectSink {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), UploadError>;
}

/// GCS media upload over REST. Unconditional puts, existing objects are
/// overwritten.
pub struct StorageClient {
    http: reqwest::Client,
    tokens: TokenSource,
}

impl StorageClient {
    pub fn new(http: reqwest::Client, tokens: TokenSource) -> Self {
        Self { http, tokens }
    }
}

#[async_trait]
impl ObjectSink for StorageClient {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), UploadError> {
        let token = self.tokens.access_token().await?;
        let http_error = |source: reqwest::Error| UploadError::Http {
            key: key.to_string(),
            source,
        };
        self.http
            .post(format!("{UPLOAD_URL}/{bucket}/o"))
            .query(&[("uploadType", "media"), ("name", key)])
            .bearer_auth(token)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(http_error)?
            .error_for_status()
            .map_err(http_error)?;
        Ok(())
    }
}
