use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::tracing;

use crate::error::HandlerError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Read side of object storage.
#[async_trait]
pub(crate) trait ObjectSource: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, HandlerError>;
}

/// Write side of object storage.
#[async_trait]
pub(crate) trait ObjectSink: Send + Sync {
    async fn store(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), HandlerError>;
}

#[derive(Clone, Debug)]
pub(crate) struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub(crate) fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectSource for S3Storage {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, HandlerError> {
        tracing::info!(bucket, key, "Fetching object");
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_get_error(e, bucket, key))?;
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| HandlerError::FetchError {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(body.into_bytes().to_vec())
    }
}

#[async_trait]
impl ObjectSink for S3Storage {
    async fn store(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), HandlerError> {
        tracing::info!(bucket, key, bytes = body.len(), "Writing object");
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(JSON_CONTENT_TYPE)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| HandlerError::WriteError {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }
}

fn classify_get_error(err: SdkError<GetObjectError>, bucket: &str, key: &str) -> HandlerError {
    let status = err.raw_response().map(|response| response.status().as_u16());
    let service_err = err.into_service_error();
    let bucket = bucket.to_string();
    let key = key.to_string();
    if service_err.is_no_such_key() || service_err.code() == Some("NotFound") || status == Some(404)
    {
        HandlerError::ObjectNotFound { bucket, key }
    } else if service_err.code() == Some("AccessDenied") || status == Some(403) {
        // Without s3:ListBucket a missing key is reported as 403 too.
        HandlerError::AccessDenied { bucket, key }
    } else {
        HandlerError::FetchError {
            bucket,
            key,
            reason: DisplayErrorContext(&service_err).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::GetObjectOutput;
    use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectOutput};
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_mocks::{mock, mock_client};

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let get_object_rule = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|req| req.bucket() == Some("raw") && req.key() == Some("req1.json"))
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(b"{\"text\":\"Hello\"}"))
                    .build()
            });
        let s3 = mock_client!(aws_sdk_s3, [&get_object_rule]);
        let body = S3Storage::new(s3).fetch("raw", "req1.json").await.unwrap();
        assert_eq!(body, b"{\"text\":\"Hello\"}");
        assert_eq!(get_object_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_missing_key() {
        let get_object_rule = mock!(aws_sdk_s3::Client::get_object)
            .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let s3 = mock_client!(aws_sdk_s3, [&get_object_rule]);
        let err = S3Storage::new(s3).fetch("raw", "gone.json").await.unwrap_err();
        match err {
            HandlerError::ObjectNotFound { bucket, key } => {
                assert_eq!(bucket, "raw");
                assert_eq!(key, "gone.json");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_access_denied() {
        let get_object_rule = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
            GetObjectError::generic(ErrorMetadata::builder().code("AccessDenied").build())
        });
        let s3 = mock_client!(aws_sdk_s3, [&get_object_rule]);
        let err = S3Storage::new(s3).fetch("raw", "req1.json").await.unwrap_err();
        assert!(matches!(err, HandlerError::AccessDenied { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_other_failure() {
        let get_object_rule = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
            GetObjectError::generic(
                ErrorMetadata::builder()
                    .code("SlowDown")
                    .message("reduce your request rate")
                    .build(),
            )
        });
        let s3 = mock_client!(aws_sdk_s3, [&get_object_rule]);
        let err = S3Storage::new(s3).fetch("raw", "req1.json").await.unwrap_err();
        assert!(matches!(err, HandlerError::FetchError { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_store_puts_json_body() {
        let put_object_rule = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|req| {
                req.bucket() == Some("out")
                    && req.key() == Some("translated_req1.json")
                    && req.content_type() == Some(JSON_CONTENT_TYPE)
                    && req.body().bytes() == Some(b"{}".as_slice())
            })
            .then_output(|| PutObjectOutput::builder().build());
        let s3 = mock_client!(aws_sdk_s3, [&put_object_rule]);
        S3Storage::new(s3)
            .store("out", "translated_req1.json", b"{}".to_vec())
            .await
            .unwrap();
        assert_eq!(put_object_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_store_failure() {
        let put_object_rule = mock!(aws_sdk_s3::Client::put_object).then_error(|| {
            PutObjectError::generic(ErrorMetadata::builder().code("NoSuchBucket").build())
        });
        let s3 = mock_client!(aws_sdk_s3, [&put_object_rule]);
        let err = S3Storage::new(s3)
            .store("out", "translated_req1.json", b"{}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::WriteError { .. }), "{err:?}");
    }
}
