use thiserror::Error;

pub(crate) const SOURCE_BUCKET_VAR: &str = "AWS_IMAGE_SRC";
pub(crate) const DEST_BUCKET_VAR: &str = "GCP_IMAGE_DST";

#[derive(Debug, Error)]
#[error("missing required environment variable {0}")]
pub struct ConfigurationMissing(pub &'static str);

/// Bucket names for the two ends of the pipeline. Everything else
/// (object keys, content types) is fixed at the handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_bucket: String,
    pub dest_bucket: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigurationMissing> {
        Ok(Self {
            source_bucket: require(SOURCE_BUCKET_VAR)?,
            dest_bucket: require(DEST_BUCKET_VAR)?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigurationMissing> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigurationMissing(name)),
    }
}
