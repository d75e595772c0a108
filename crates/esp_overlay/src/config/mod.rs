//! Configuration system
//!
//! [`OverlayConfig`] is plain data handed to [`crate::OverlaySystem::render`]
//! each frame; the host's configuration provider may change any value between
//! frames and the core reads it fresh every pass. The [`Config`] trait adds
//! file load/save for hosts that persist settings to TOML or RON.

use serde::{Deserialize, Serialize};

use crate::assets::selector::SelectionConfig;
use crate::overlay::billboard::ScaleMode;
use crate::overlay::filter::FilterConfig;

/// All tunable overlay settings
///
/// Bounds honored by the core regardless of what the host supplies: the
/// selection index clamps into the directory listing, the scale is floored
/// by the projector, and opacity clamps into `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Which objects receive an overlay
    pub filter: FilterConfig,
    /// Which image each category uses
    pub selection: SelectionConfig,
    /// How the billboard's world-space size is derived
    pub scale: ScaleMode,
    /// Uniform alpha applied to every billboard, `0.0..=1.0`
    pub opacity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            selection: SelectionConfig::default(),
            scale: ScaleMode::default(),
            opacity: 1.0,
        }
    }
}

impl Config for OverlayConfig {}

/// Configuration trait with file persistence
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::selector::ImageChoice;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert!(config.filter.primary_only);
        assert!(!config.filter.target_only);
        assert_eq!(config.selection.primary, ImageChoice::Default);
        assert_eq!(config.scale, ScaleMode::Fixed(1.0));
        assert_eq!(config.opacity, 1.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.ron");
        let path = path.to_str().unwrap();

        let mut config = OverlayConfig::default();
        config.filter.include_secondary = true;
        config.selection.primary = ImageChoice::Named("player.png".to_string());
        config.scale = ScaleMode::ObjectHeight { factor: 0.75 };
        config.opacity = 0.5;

        config.save_to_file(path).unwrap();
        let loaded = OverlayConfig::load_from_file(path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.toml");
        let path = path.to_str().unwrap();

        let mut config = OverlayConfig::default();
        config.selection.secondary = ImageChoice::Index(4);

        config.save_to_file(path).unwrap();
        let loaded = OverlayConfig::load_from_file(path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_unsupported_extension() {
        let config = OverlayConfig::default();
        assert!(matches!(
            config.save_to_file("overlay.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "opacity = 0.25\n").unwrap();

        let loaded = OverlayConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.opacity, 0.25);
        assert!(loaded.filter.primary_only);
    }
}
