use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde_json::Value;

use crate::config::Config;
use crate::gcs::ObjectSink;
use crate::labels::{format_percent, LabelSet};
use crate::source;
use crate::vision::LabelDetector;

/// Object key read from the source bucket.
const SOURCE_IMAGE_KEY: &str = "shanghai.jpeg";
/// Sink keys are fixed literals, not derived from the source key, so every
/// run overwrites the same two destination objects.
const SINK_LABELS_KEY: &str = "shanghai.json";
const SINK_IMAGE_KEY: &str = "shanghai.jpeg";

const JSON_CONTENT_TYPE: &str = "application/json";
const JPEG_CONTENT_TYPE: &str = "image/jpeg";

pub(crate) async fn function_handler<D, S>(
    event: LambdaEvent<Value>,
    config: &Config,
    s3_client: &S3Client,
    detector: &D,
    sink: &S,
) -> Result<(), Error>
where
    D: LabelDetector + Sync,
    S: ObjectSink + Sync,
{
    // The trigger payload and context carry no routing information.
    let _ = event.payload;

    let image = source::fetch_image(s3_client, &config.source_bucket, SOURCE_IMAGE_KEY).await?;

    let annotations = detector.detect_labels(&image).await?;
    tracing::info!("Labels (and confidence score):");
    let mut labels = LabelSet::new();
    for annotation in &annotations {
        tracing::info!("{} ({})", annotation.description, format_percent(annotation.score));
        labels.record(&annotation.description, annotation.score);
    }
    if labels.is_empty() {
        tracing::warn!("Detection returned no labels");
    }

    let document = labels.to_json()?;
    sink.put_object(&config.dest_bucket, SINK_LABELS_KEY, JSON_CONTENT_TYPE, document)
        .await?;
    sink.put_object(&config.dest_bucket, SINK_IMAGE_KEY, JPEG_CONTENT_TYPE, image)
        .await?;
    tracing::info!(
        "Wrote {} labels and {} to gs://{}",
        labels.len(),
        SINK_IMAGE_KEY,
        config.dest_bucket
    );
    Ok(())
}
