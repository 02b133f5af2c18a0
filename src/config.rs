use crate::error::HandlerError;

/// Environment variable naming the bucket translated objects are written to.
pub(crate) const RESPONSE_BUCKET_VAR: &str = "RESPONSE_BUCKET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) response_bucket: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, HandlerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, HandlerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let response_bucket = lookup(RESPONSE_BUCKET_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(HandlerError::ConfigurationMissing(RESPONSE_BUCKET_VAR))?;
        Ok(Self { response_bucket })
    }
}
