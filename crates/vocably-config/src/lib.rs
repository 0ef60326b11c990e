use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::ai::AiConfig;
use self::ui::UiConfig;
use self::vocabulary::VocabularyConfig;

pub mod ai;
pub mod paths;
pub mod ui;
pub mod vocabulary;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub ui: UiConfig,
    pub vocabulary: VocabularyConfig,
}

impl Config {
    /// Load the config file, writing defaults back on first run. An
    /// unreadable or malformed file falls back to defaults without
    /// failing startup.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            let config = Config::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("could not write default config to {}: {e}", path.display());
            }
            return config;
        }

        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("malformed config {}: {e}, using defaults", path.display());
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("could not read config {}: {e}, using defaults", path.display());
                Config::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::load_or_default(&path);
        assert!(path.exists());
        assert_eq!(config.ai.model, "gemini-2.0-flash-exp");
        assert_eq!(config.ui.window_width, 500);
        assert!(config.vocabulary.auto_save);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.ui.window_height, 400);
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.ui.window_width = 800;
        config.vocabulary.show_antonyms = false;
        config.save(&path).unwrap();

        let loaded = Config::load_or_default(&path);
        assert_eq!(loaded.ui.window_width, 800);
        assert!(!loaded.vocabulary.show_antonyms);
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"ui": {"window_width": 640}}"#).unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.ui.window_width, 640);
        assert_eq!(config.ui.window_height, 400);
        assert_eq!(config.ai.temperature, 0.3);
    }
}
