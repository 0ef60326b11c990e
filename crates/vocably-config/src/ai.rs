use std::env;

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Gemini API key; the `GEMINI_API_KEY` env var is the fallback.
    pub gemini_api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl AiConfig {
    /// Effective API key: config value first, then environment.
    pub fn api_key(&self) -> Option<String> {
        let key = self.gemini_api_key.trim();
        if !key.is_empty() {
            return Some(key.to_string());
        }

        env::var("GEMINI_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
