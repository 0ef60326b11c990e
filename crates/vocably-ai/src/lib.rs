use vocably_types::WordInsight;

pub mod client;
pub mod prompt;

pub use client::GeminiClient;

/// Word-insight provider interface. The caller treats any error as "no
/// data produced" and never relies on partial fields.
#[async_trait::async_trait]
pub trait InsightProvider: Send + Sync {
    /// Generate the structured record for a bare word.
    async fn word_insight(&self, word: &str) -> Result<WordInsight, AiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("nothing to look up")]
    EmptyWord,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("model returned no usable text")]
    EmptyResponse,

    #[error("malformed model response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
