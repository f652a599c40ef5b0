//! Embedding configuration
//!
//! TOML-backed settings for hosts embedding the scanner: the camera geometry
//! to seed the overlay with and the plausible-length window for number
//! extraction.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::capture::{CameraFacing, CameraGeometry};
use crate::card::NumberPattern;

/// Scanner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Camera defaults applied at startup
    pub camera: CameraSettings,
    /// Number extraction bounds
    pub extraction: ExtractionSettings,
}

/// Camera-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Preview width in pixels; zero until the camera reports a size
    pub preview_width: u32,
    /// Preview height in pixels; zero until the camera reports a size
    pub preview_height: u32,
    /// Camera facing direction
    pub facing: CameraFacing,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            preview_width: 0,
            preview_height: 0,
            facing: CameraFacing::Back,
        }
    }
}

impl CameraSettings {
    /// Geometry handed to the overlay at startup
    pub fn geometry(&self) -> CameraGeometry {
        CameraGeometry {
            preview_width: self.preview_width,
            preview_height: self.preview_height,
            facing: self.facing,
        }
    }
}

/// Extraction-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Minimum digits for a plausible card number
    pub min_digits: usize,
    /// Maximum digits for a plausible card number
    pub max_digits: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        let pattern = NumberPattern::default();
        Self {
            min_digits: pattern.min_digits,
            max_digits: pattern.max_digits,
        }
    }
}

impl ExtractionSettings {
    /// Pattern handed to the number extractor
    pub fn number_pattern(&self) -> NumberPattern {
        NumberPattern {
            min_digits: self.min_digits,
            max_digits: self.max_digits,
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ScanConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &ScanConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    info!("Saved config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.camera.preview_width, 0);
        assert_eq!(config.camera.preview_height, 0);
        assert_eq!(config.camera.facing, CameraFacing::Back);
        assert_eq!(config.extraction.min_digits, 13);
        assert_eq!(config.extraction.max_digits, 19);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ScanConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ScanConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.extraction.min_digits, config.extraction.min_digits);
        assert_eq!(parsed.camera.facing, config.camera.facing);
    }

    #[test]
    fn test_custom_values() {
        let toml_str = r#"
            [camera]
            preview_width = 640
            preview_height = 480
            facing = "front"

            [extraction]
            min_digits = 14
            max_digits = 16
        "#;
        let config: ScanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.camera.preview_width, 640);
        assert_eq!(config.camera.facing, CameraFacing::Front);
        assert_eq!(config.extraction.number_pattern().min_digits, 14);
        assert_eq!(config.extraction.number_pattern().max_digits, 16);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
            [camera]
            facing = "front"
        "#;
        let config: ScanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.camera.facing, CameraFacing::Front);
        assert_eq!(config.camera.preview_width, 0);
        assert_eq!(config.extraction.max_digits, 19);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.toml");

        let mut config = ScanConfig::default();
        config.camera.preview_width = 640;
        config.camera.preview_height = 480;

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.camera.preview_width, 640);
        assert_eq!(loaded.camera.preview_height, 480);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_config(Path::new("/nonexistent/scan.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.toml");
        fs::write(&path, "not [valid toml").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_camera_settings_to_geometry() {
        let settings = CameraSettings {
            preview_width: 640,
            preview_height: 480,
            facing: CameraFacing::Front,
        };
        let geometry = settings.geometry();
        assert_eq!(geometry.preview_width, 640);
        assert_eq!(geometry.facing, CameraFacing::Front);
    }
}
