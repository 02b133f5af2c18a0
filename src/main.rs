use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_translate::Client as TranslateClient;
use lambda_runtime::{run, service_fn, tracing, Error};
mod config;
mod error;
mod event_handler;
mod records;
mod storage;
mod translation;
use config::Config;
use event_handler::{function_handler, Collaborators};
use storage::S3Storage;
use translation::AwsTranslator;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt().json().init();
    let config = Config::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let storage = S3Storage::new(S3Client::new(&shared_config));
    let collaborators = Collaborators {
        source: Arc::new(storage.clone()),
        sink: Arc::new(storage),
        translator: Arc::new(AwsTranslator::new(TranslateClient::new(&shared_config))),
        config,
    };
    run(service_fn(|event| function_handler(event, &collaborators))).await
}
