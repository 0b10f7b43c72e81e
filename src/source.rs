use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{tracing, Error};

/// Fetches the raw bytes of one object from the source bucket.
///
/// The streaming body is collected whole; images here are single-digit
/// megabytes at most.
pub(crate) async fn fetch_image(
    client: &S3Client,
    bucket: &str,
    key: &str,
) -> Result<Vec<u8>, Error> {
    let object = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| Error::from(format!("fetching s3://{bucket}/{key}: {e}")))?;
    let body = object
        .body
        .collect()
        .await
        .map_err(|e| Error::from(format!("reading body of s3://{bucket}/{key}: {e}")))?;
    let bytes = body.into_bytes().to_vec();
    tracing::info!("Fetched {} bytes from s3://{}/{}", bytes.len(), bucket, key);
    Ok(bytes)
}
