use async_trait::async_trait;
use aws_sdk_translate::error::DisplayErrorContext;
use aws_sdk_translate::Client as TranslateClient;
use lambda_runtime::tracing;

use crate::error::HandlerError;

/// Language every incoming text is assumed to be written in.
pub(crate) const SOURCE_LANGUAGE: &str = "en";

#[async_trait]
pub(crate) trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, HandlerError>;
}

#[derive(Clone, Debug)]
pub(crate) struct AwsTranslator {
    client: TranslateClient,
}

impl AwsTranslator {
    pub(crate) fn new(client: TranslateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, HandlerError> {
        tracing::info!(
            chars = text.chars().count(),
            source_language,
            target_language,
            "Translating text"
        );
        let output = self
            .client
            .translate_text()
            .text(text)
            .source_language_code(source_language)
            .target_language_code(target_language)
            .send()
            .await
            .map_err(|e| HandlerError::TranslationError(DisplayErrorContext(&e).to_string()))?;
        Ok(output.translated_text().to_string())
    }
}
