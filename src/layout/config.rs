//! Configuration for the sync layer

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Reference density: one dp is one px at this dpi
pub const BASELINE_DPI: u32 = 160;

/// Errors that can occur when loading sync configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid density {0} dpi (must be positive)")]
    InvalidDensity(u32),
}

/// Conversion between pixel geometry and dp lengths
pub trait DpConverter {
    fn px_to_dp(&self, px: i32) -> i32;
    fn dp_to_px(&self, dp: i32) -> i32;
}

/// Screen density used to convert px to dp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub dpi: u32,
}

impl Density {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    fn scale(&self) -> f64 {
        if self.dpi == 0 {
            1.0
        } else {
            self.dpi as f64 / BASELINE_DPI as f64
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::new(BASELINE_DPI)
    }
}

impl DpConverter for Density {
    fn px_to_dp(&self, px: i32) -> i32 {
        (px as f64 / self.scale()).round() as i32
    }

    fn dp_to_px(&self, dp: i32) -> i32 {
        (dp as f64 * self.scale()).round() as i32
    }
}

/// Configuration options for syncing a component tree
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Density used for px/dp conversion
    pub density: Density,

    /// Tag suffixes that make a component a container even without children
    pub container_tags: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            density: Density::default(),
            container_tags: vec!["Layout".to_string()],
        }
    }
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    dpi: Option<u32>,
    container_tags: Option<Vec<String>>,
}

impl SyncConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen density in dpi
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.density = Density::new(dpi);
        self
    }

    /// Replace the container tag suffixes
    pub fn with_container_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.container_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();
        if let Some(dpi) = parsed.dpi {
            if dpi == 0 {
                return Err(ConfigError::InvalidDensity(dpi));
            }
            config = config.with_dpi(dpi);
        }
        if let Some(tags) = parsed.container_tags {
            config = config.with_container_tags(tags);
        }
        Ok(config)
    }

    /// Whether a component with this tag holds children
    pub fn is_container_tag(&self, tag: &str) -> bool {
        self.container_tags.iter().any(|t| tag.ends_with(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.density.dpi, 160);
        assert!(config.is_container_tag("ConstraintLayout"));
        assert!(!config.is_container_tag("Button"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SyncConfig::new()
            .with_dpi(320)
            .with_container_tags(["Group"]);

        assert_eq!(config.density, Density::new(320));
        assert!(config.is_container_tag("ViewGroup"));
        assert!(!config.is_container_tag("LinearLayout"));
    }

    #[test]
    fn test_density_conversion() {
        let xhdpi = Density::new(320);
        assert_eq!(xhdpi.px_to_dp(100), 50);
        assert_eq!(xhdpi.dp_to_px(50), 100);
        assert_eq!(xhdpi.px_to_dp(3), 2);
        assert_eq!(Density::default().px_to_dp(37), 37);
    }

    #[test]
    fn test_from_str() {
        let config = SyncConfig::from_str("dpi = 240\n").unwrap();
        assert_eq!(config.density.dpi, 240);
        assert_eq!(config.container_tags, vec!["Layout".to_string()]);
    }

    #[test]
    fn test_from_str_rejects_zero_dpi() {
        let err = SyncConfig::from_str("dpi = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDensity(0)));
    }

    #[test]
    fn test_from_str_rejects_unknown_keys() {
        assert!(matches!(
            SyncConfig::from_str("dpj = 240\n"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
