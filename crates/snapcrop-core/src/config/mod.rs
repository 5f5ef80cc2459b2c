//! Editor settings, loadable from a TOML file.
//!
//! Every field has a default (see [`defaults`]), so a settings file only
//! needs to name what it changes:
//!
//! ```toml
//! [crop]
//! min_size = 64.0
//!
//! [export]
//! jpeg_quality = 85
//! ```

pub mod defaults;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use defaults::*;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the settings file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`EditorConfig`].
    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be rendered as TOML.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Crop overlay geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Minimum overlay width and height (view units)
    pub min_size: f64,
    /// Side of the square resize handle (view units)
    pub handle_size: f64,
    /// Initial overlay size relative to the display rectangle (0.0 to 1.0)
    pub initial_fraction: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_CROP_MIN_SIZE,
            handle_size: DEFAULT_CROP_HANDLE_SIZE,
            initial_fraction: DEFAULT_CROP_INITIAL_FRACTION,
        }
    }
}

/// Parameters for the preset filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub blur_sigma: f32,
    pub bilateral_radius: u32,
    pub bilateral_range_sigma: f32,
    pub sharpen_sigma: f32,
    pub sharpen_threshold: i32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blur_sigma: DEFAULT_BLUR_SIGMA,
            bilateral_radius: DEFAULT_BILATERAL_RADIUS,
            bilateral_range_sigma: DEFAULT_BILATERAL_RANGE_SIGMA,
            sharpen_sigma: DEFAULT_SHARPEN_SIGMA,
            sharpen_threshold: DEFAULT_SHARPEN_THRESHOLD,
        }
    }
}

/// Watermark placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Margin from the bottom-right corner in pixels
    pub margin: u32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Maximum watermark width as a fraction of the photo width
    pub max_fraction: f32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_WATERMARK_MARGIN,
            opacity: DEFAULT_WATERMARK_OPACITY,
            max_fraction: DEFAULT_WATERMARK_MAX_FRACTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Longest edge of filter thumbnails in pixels
    pub thumbnail_edge: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            thumbnail_edge: DEFAULT_THUMBNAIL_EDGE,
        }
    }
}

/// All editor settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub crop: CropConfig,
    pub filters: FilterConfig,
    pub watermark: WatermarkConfig,
    pub export: ExportConfig,
    pub preview: PreviewConfig,
}

impl EditorConfig {
    /// Parse settings from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load settings from a file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Write settings to a file, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
