use thiserror::Error;

/// Reasons a single invocation can fail. None of these are recovered locally;
/// the runtime reports them back to the event source, which owns redelivery.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("object s3://{bucket}/{key} not found")]
    ObjectNotFound { bucket: String, key: String },

    #[error("access denied reading s3://{bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    #[error("failed to fetch s3://{bucket}/{key}: {reason}")]
    FetchError {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("translation failed: {0}")]
    TranslationError(String),

    #[error("failed to write s3://{bucket}/{key}: {reason}")]
    WriteError {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("missing configuration: {0}")]
    ConfigurationMissing(&'static str),
}
