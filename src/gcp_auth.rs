use serde::Deserialize;
use thiserror::Error;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
const TOKEN_ENV_VAR: &str = "GCP_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("access token request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Bearer tokens for the Vision and Storage APIs.
///
/// `GCP_ACCESS_TOKEN` wins when set; otherwise the instance metadata server
/// is asked for the default service account token. Tokens are not cached,
/// one fetch per stage call.
#[derive(Clone)]
pub struct TokenSource {
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl TokenSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn access_token(&self) -> Result<String, AuthError> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
        let response = self
            .http
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?
            .error_for_status()?;
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metadata_token_response() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token":"ya29.token","expires_in":3599,"token_type":"Bearer"}"#,
        )
        .unwrap();
        assert_eq!(token.access_token, "ya29.token");
    }
}
