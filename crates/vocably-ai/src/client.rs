use serde::{Deserialize, Serialize};
use vocably_types::WordInsight;

use crate::prompt::word_insight_prompt;
use crate::{AiError, InsightProvider};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini generateContent client.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, temperature: f32) -> Self {
        Self {
            api_key,
            model,
            temperature,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl InsightProvider for GeminiClient {
    async fn word_insight(&self, word: &str) -> Result<WordInsight, AiError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AiError::EmptyWord);
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(word_insight_prompt(word)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!("{API_BASE}/{}:generateContent?key={}", self.model, self.api_key);

        tracing::debug!("requesting insight for `{word}`");
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api(format!("http {status}: {body}")));
        }

        let body: GenerateContentResponse = response.json().await?;
        insight_from_response(body)
    }
}

fn insight_from_response(body: GenerateContentResponse) -> Result<WordInsight, AiError> {
    let text: String = body
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let insight: WordInsight = serde_json::from_str(text)?;
    if insight.meaning.trim().is_empty() {
        // Partial data without a meaning is useless to the caller.
        return Err(AiError::EmptyResponse);
    }
    Ok(insight)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<Part>,
}
