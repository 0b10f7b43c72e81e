use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gcp_auth::{AuthError, TokenSource};

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

#[derive(Debug, Error)]
pub enum DetectError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("annotate request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("annotate response carried no entry for the submitted image")]
    MissingResponse,
    #[error("label detection failed: {message} (code {code})")]
    Annotation { code: i32, message: String },
}

/// One (description, confidence) pair from the detection service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelAnnotation {
    pub description: String,
    #[serde(default)]
    pub score: f32,
}

#[async_trait]
pub trait LabelDetector {
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<LabelAnnotation>, DetectError>;
}

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<RpcStatus>,
}

#[derive(Deserialize)]
struct RpcStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Vision API label detection over REST.
pub struct VisionClient {
    http: reqwest::Client,
    tokens: TokenSource,
}

impl VisionClient {
    pub fn new(http: reqwest::Client, tokens: TokenSource) -> Self {
        Self { http, tokens }
    }

    fn annotate_request(image: &[u8]) -> AnnotateRequest {
        AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: "LABEL_DETECTION",
                }],
            }],
        }
    }
}

fn collect_annotations(batch: AnnotateResponse) -> Result<Vec<LabelAnnotation>, DetectError> {
    let annotated = batch
        .responses
        .into_iter()
        .next()
        .ok_or(DetectError::MissingResponse)?;
    if let Some(status) = annotated.error {
        return Err(DetectError::Annotation {
            code: status.code,
            message: status.message,
        });
    }
    Ok(annotated.label_annotations)
}

#[async_trait]
impl LabelDetector for VisionClient {
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<LabelAnnotation>, DetectError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(ANNOTATE_URL)
            .bearer_auth(token)
            .json(&Self::annotate_request(image))
            .send()
            .await?
            .error_for_status()?;
        let batch: AnnotateResponse = response.json().await?;
        collect_annotations(batch)
    }
}
