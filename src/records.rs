use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Body of the object that triggered the invocation.
#[derive(Debug, Deserialize)]
pub(crate) struct TranslationRequest {
    pub(crate) text: String,
    pub(crate) target_language: String,
}

/// Body written to the response bucket. Field order is the wire order.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct TranslationResult {
    pub(crate) original_text: String,
    pub(crate) translated_text: String,
    pub(crate) target_language: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct HandlerResponse {
    pub(crate) status: &'static str,
}

impl HandlerResponse {
    pub(crate) fn success() -> Self {
        Self { status: "success" }
    }
}

impl TranslationRequest {
    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, HandlerError> {
        let body = std::str::from_utf8(bytes)
            .map_err(|e| HandlerError::MalformedPayload(format!("body is not UTF-8: {e}")))?;
        let request: Self = serde_json::from_str(body)
            .map_err(|e| HandlerError::MalformedPayload(e.to_string()))?;
        if request.target_language.trim().is_empty() {
            return Err(HandlerError::MalformedPayload(
                "target_language is empty".to_string(),
            ));
        }
        Ok(request)
    }

    pub(crate) fn into_result(self, translated_text: String) -> TranslationResult {
        TranslationResult {
            original_text: self.text,
            translated_text,
            target_language: self.target_language,
        }
    }
}

impl TranslationResult {
    pub(crate) fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
