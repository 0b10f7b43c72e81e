use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, tracing, Error};

mod config;
mod event_handler;
mod gcp_auth;
mod gcs;
mod labels;
mod source;
mod vision;

use config::Config;
use event_handler::function_handler;
use gcp_auth::TokenSource;
use gcs::StorageClient;
use vision::VisionClient;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt().json().init();
    let config = Config::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let s3_client = S3Client::new(&shared_config);
    let http = reqwest::Client::new();
    let tokens = TokenSource::new(http.clone());
    let vision = VisionClient::new(http.clone(), tokens.clone());
    let storage = StorageClient::new(http, tokens);
    run(service_fn(|event| {
        function_handler(event, &config, &s3_client, &vision, &storage)
    }))
    .await
}
