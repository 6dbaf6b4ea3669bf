use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no word list found in payload (expected an array or one of: {expected})")]
    MissingWords { expected: String },
    #[error("invalid engine config: {message}")]
    InvalidConfig { message: String },
}

impl PayloadError {
    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn missing_words(expected: &[&str]) -> Self {
        Self::MissingWords {
            expected: expected.join(", "),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
