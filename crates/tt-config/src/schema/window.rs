//! Native window configuration types.

use serde::{Deserialize, Serialize};

/// Top-level host window geometry and close behavior.
///
/// Sizes are logical pixels; the window itself is always frameless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial width (valid range: 320-16384).
    pub width: u32,
    /// Initial height (valid range: 240-16384).
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    /// Hide instead of exiting when the window is closed.
    pub close_to_tray: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "TinyTorrent".into(),
            width: 1280,
            height: 800,
            min_width: 640,
            min_height: 480,
            close_to_tray: false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_config_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "TinyTorrent");
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 800);
        assert_eq!(config.min_width, 640);
        assert_eq!(config.min_height, 480);
        assert!(!config.close_to_tray);
    }

    #[test]
    fn window_config_partial_toml() {
        let toml_str = r#"
width = 1024
close_to_tray = true
"#;
        let config: WindowConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.width, 1024);
        assert!(config.close_to_tray);
        // Defaults preserved
        assert_eq!(config.height, 800);
        assert_eq!(config.title, "TinyTorrent");
    }
}
