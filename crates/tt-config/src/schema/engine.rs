//! Content engine hosting preferences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Try GPU-composited hosting before falling back to direct hosting.
    pub prefer_composition: bool,
    /// Engine profile directory. Empty uses `<data_dir>/WebView2`.
    pub user_data_dir: String,
    pub devtools: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefer_composition: true,
            user_data_dir: String::new(),
            devtools: cfg!(debug_assertions),
        }
    }
}
