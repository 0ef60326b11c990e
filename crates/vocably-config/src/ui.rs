use serde::{Deserialize, Serialize};

fn default_window_width() -> u32 {
    500
}

fn default_window_height() -> u32 {
    400
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_true")]
    pub remember_window_size: bool,
    pub show_advanced_fields: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            remember_window_size: true,
            show_advanced_fields: false,
        }
    }
}
