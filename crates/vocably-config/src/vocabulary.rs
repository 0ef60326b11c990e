use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    #[serde(default = "default_true")]
    pub auto_save: bool,
    #[serde(default = "default_true")]
    pub show_pronunciation: bool,
    #[serde(default = "default_true")]
    pub show_context: bool,
    #[serde(default = "default_true")]
    pub show_synonyms: bool,
    #[serde(default = "default_true")]
    pub show_antonyms: bool,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            auto_save: true,
            show_pronunciation: true,
            show_context: true,
            show_synonyms: true,
            show_antonyms: true,
        }
    }
}
