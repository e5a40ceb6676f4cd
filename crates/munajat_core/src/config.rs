//! Bridge configuration.
//!
//! # Responsibility
//! - Carry the widget text-bitmap style with defaults matching the shipped widget.
//! - Load overrides from a JSON document.
//!
//! # Invariants
//! - Every field has a default; an empty document yields `BridgeConfig::default()`.
//! - `validate()` must pass before a config reaches the renderer.

use image::Rgba;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "MUNAJAT_BRIDGE_CONFIG";

/// Top-level bridge configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    pub render: RenderConfig,
}

/// Text bitmap style for the widget's primary text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// `#RRGGBB` or `#AARRGGBB`.
    pub text_color: String,
    pub text_size: f32,
    /// Total horizontal inset; the layout width is `canvas_width - horizontal_padding`.
    pub horizontal_padding: u32,
    /// Extra pixels between consecutive lines.
    pub line_spacing_extra: f32,
    pub line_spacing_multiplier: f32,
    pub max_lines: usize,
    /// Bundled font resource tried before the system default.
    pub font_resource: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200,
            canvas_height: 600,
            text_color: "#1B5E20".to_string(),
            text_size: 140.0,
            horizontal_padding: 120,
            line_spacing_extra: 25.0,
            line_spacing_multiplier: 1.0,
            max_lines: 4,
            font_resource: Some("arabic_font".to_string()),
        }
    }
}

impl RenderConfig {
    pub fn layout_width(&self) -> u32 {
        self.canvas_width.saturating_sub(self.horizontal_padding)
    }

    pub fn color(&self) -> Result<Rgba<u8>, ConfigError> {
        parse_hex_color(&self.text_color)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.layout_width() == 0 {
            return Err(ConfigError::Invalid(format!(
                "horizontal_padding {} leaves no room on a {}px canvas",
                self.horizontal_padding, self.canvas_width
            )));
        }
        if !(self.text_size.is_finite() && self.text_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "text_size must be positive, got {}",
                self.text_size
            )));
        }
        if !(self.line_spacing_multiplier.is_finite() && self.line_spacing_multiplier > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "line_spacing_multiplier must be positive, got {}",
                self.line_spacing_multiplier
            )));
        }
        if self.max_lines == 0 {
            return Err(ConfigError::Invalid("max_lines must be at least 1".to_string()));
        }
        self.color()?;
        Ok(())
    }
}

impl BridgeConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.render.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            source: err,
        })?;
        Self::from_json_str(&raw)
    }

    /// Loads the file named by `MUNAJAT_BRIDGE_CONFIG`, or defaults when unset.
    ///
    /// A present but unusable file is reported, not silently replaced.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_path(Path::new(raw.trim())),
            _ => Ok(Self::default()),
        }
    }
}

/// Parses `#RRGGBB` / `#AARRGGBB` (Android color string order).
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, ConfigError> {
    let invalid = || ConfigError::Invalid(format!("unsupported color `{value}`"));
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let byte = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, 0xFF])),
        8 => Ok(Rgba([byte(2)?, byte(4)?, byte(6)?, byte(0)?])),
        _ => Err(invalid()),
    }
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::Invalid(message) => write!(f, "invalid config value: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
