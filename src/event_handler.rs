use std::sync::Arc;

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{tracing, Error, LambdaEvent};

use crate::config::Config;
use crate::error::HandlerError;
use crate::records::{HandlerResponse, TranslationRequest};
use crate::storage::{ObjectSink, ObjectSource};
use crate::translation::{Translator, SOURCE_LANGUAGE};

const TRANSLATED_PREFIX: &str = "translated_";

/// Clients built once per execution environment and shared by every invocation.
pub(crate) struct Collaborators {
    pub(crate) source: Arc<dyn ObjectSource>,
    pub(crate) sink: Arc<dyn ObjectSink>,
    pub(crate) translator: Arc<dyn Translator>,
    pub(crate) config: Config,
}

#[derive(Debug, PartialEq, Eq)]
struct SourceObject {
    bucket: String,
    key: String,
}

fn get_source_object(event: &S3Event) -> Result<SourceObject, HandlerError> {
    let record = match event.records.as_slice() {
        [record] => record,
        records => {
            return Err(HandlerError::MalformedPayload(format!(
                "expected exactly one S3 record, found {}",
                records.len()
            )))
        }
    };
    let bucket = record
        .s3
        .bucket
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HandlerError::MalformedPayload("No bucket name found in S3 event".into()))?;
    let encoded_key = record
        .s3
        .object
        .key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| HandlerError::MalformedPayload("No object key found in S3 event".into()))?;
    let key = decode_object_key(encoded_key)?;
    Ok(SourceObject { bucket, key })
}

/// S3 notifications carry the key form-encoded: `+` for space, `%XX` for the rest.
fn decode_object_key(encoded_key: &str) -> Result<String, HandlerError> {
    let key = urlencoding::decode(&encoded_key.replace('+', " "))
        .map_err(|e| HandlerError::MalformedPayload(format!("Invalid object key encoding: {e}")))?
        .into_owned();
    Ok(key)
}

pub(crate) fn destination_key(source_key: &str) -> String {
    format!("{TRANSLATED_PREFIX}{source_key}")
}

async fn translate_object(
    event: &S3Event,
    collaborators: &Collaborators,
) -> Result<HandlerResponse, HandlerError> {
    let SourceObject { bucket, key } = get_source_object(event).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejecting S3 event");
    })?;

    let body = collaborators.source.fetch(&bucket, &key).await?;
    let request = TranslationRequest::decode(&body).inspect_err(|e| {
        tracing::warn!(%bucket, %key, error = %e, "Rejecting payload");
    })?;

    let translated_text = collaborators
        .translator
        .translate(&request.text, SOURCE_LANGUAGE, &request.target_language)
        .await?;
    let result = request.into_result(translated_text);

    let destination_bucket = &collaborators.config.response_bucket;
    let destination_key = destination_key(&key);
    let encoded = result.encode().map_err(|e| HandlerError::WriteError {
        bucket: destination_bucket.clone(),
        key: destination_key.clone(),
        reason: e.to_string(),
    })?;
    collaborators
        .sink
        .store(destination_bucket, &destination_key, encoded)
        .await?;

    tracing::info!(
        %bucket,
        %key,
        target_language = %result.target_language,
        destination_bucket = %destination_bucket,
        destination_key = %destination_key,
        "Translated object"
    );
    Ok(HandlerResponse::success())
}

pub(crate) async fn function_handler(
    event: LambdaEvent<S3Event>,
    collaborators: &Collaborators,
) -> Result<HandlerResponse, Error> {
    let response = translate_object(&event.payload, collaborators).await?;
    Ok(response)
}
