//! Configuration for numrep.
//!
//! Supports loading configuration from:
//! - `~/.config/numrep/config.toml` for user defaults
//! - `numrep.toml` in current directory
//! - Environment variables (NUMREP_*)
//! - Command-line arguments (highest priority, applied by each command)

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use numrep_encoding::{EncodeOptions, FloatLayout, RoundingMode, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::output::OutputFormat;

/// Project-level configuration file name.
pub const PROJECT_CONFIG: &str = "numrep.toml";

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IEEE-754 settings.
    pub float: FloatConfig,
    /// Integer scheme settings.
    pub integer: IntegerConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// IEEE-754 configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
    /// Exponent field width.
    pub exponent_bits: u32,
    /// Mantissa field width.
    pub mantissa_bits: u32,
    /// Rounding mode (round-up, round-down, round-to-even).
    pub rounding: RoundingMode,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            exponent_bits: FloatLayout::SINGLE.exponent_bits(),
            mantissa_bits: FloatLayout::SINGLE.mantissa_bits(),
            rounding: RoundingMode::RoundToEven,
        }
    }
}

/// Integer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegerConfig {
    /// Width used when no `--width` is given.
    pub default_width: usize,
}

impl Default for IntegerConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from default locations, or only from `explicit`
    /// when given. Environment variables apply either way.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        match explicit {
            Some(path) => {
                config = config.merge(Self::load_from_file(path)?);
            }
            None => {
                // User config first, then project config (higher priority).
                let candidates = Self::user_config_path()
                    .into_iter()
                    .chain(std::iter::once(PathBuf::from(PROJECT_CONFIG)));
                for path in candidates {
                    if path.is_file() {
                        config = config.merge(Self::load_from_file(&path)?);
                    }
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get the user configuration file path.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("numrep").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority).
    pub fn merge(mut self, other: Config) -> Self {
        let float_defaults = FloatConfig::default();
        if other.float.exponent_bits != float_defaults.exponent_bits {
            self.float.exponent_bits = other.float.exponent_bits;
        }
        if other.float.mantissa_bits != float_defaults.mantissa_bits {
            self.float.mantissa_bits = other.float.mantissa_bits;
        }
        if other.float.rounding != float_defaults.rounding {
            self.float.rounding = other.float.rounding;
        }

        if other.integer.default_width != DEFAULT_WIDTH {
            self.integer.default_width = other.integer.default_width;
        }

        if other.output.format != OutputFormat::default() {
            self.output.format = other.output.format;
        }

        self
    }

    /// Apply `NUMREP_*` variables read through `lookup`.
    ///
    /// Unparseable values are skipped with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("NUMREP_EXPONENT_BITS") {
            match val.trim().parse() {
                Ok(bits) => self.float.exponent_bits = bits,
                Err(_) => tracing::warn!("ignoring NUMREP_EXPONENT_BITS={val}"),
            }
        }
        if let Some(val) = lookup("NUMREP_MANTISSA_BITS") {
            match val.trim().parse() {
                Ok(bits) => self.float.mantissa_bits = bits,
                Err(_) => tracing::warn!("ignoring NUMREP_MANTISSA_BITS={val}"),
            }
        }
        if let Some(val) = lookup("NUMREP_ROUNDING") {
            match val.parse() {
                Ok(mode) => self.float.rounding = mode,
                Err(_) => tracing::warn!("ignoring NUMREP_ROUNDING={val}"),
            }
        }
        if let Some(val) = lookup("NUMREP_WIDTH") {
            match val.trim().parse() {
                Ok(width) => self.integer.default_width = width,
                Err(_) => tracing::warn!("ignoring NUMREP_WIDTH={val}"),
            }
        }
        if let Some(val) = lookup("NUMREP_FORMAT") {
            match val.trim().to_ascii_lowercase().as_str() {
                "text" => self.output.format = OutputFormat::Text,
                "json" => self.output.format = OutputFormat::Json,
                _ => tracing::warn!("ignoring NUMREP_FORMAT={val}"),
            }
        }
    }

    /// The IEEE-754 layout named by `[float]`.
    pub fn layout(&self) -> Result<FloatLayout, ConfigError> {
        FloatLayout::new(self.float.exponent_bits, self.float.mantissa_bits).map_err(|e| {
            ConfigError::Invalid {
                message: e.to_string(),
            }
        })
    }

    /// Engine options for this configuration.
    pub fn encode_options(&self) -> Result<EncodeOptions, ConfigError> {
        Ok(EncodeOptions {
            width: self.integer.default_width,
            layout: self.layout()?,
            rounding: self.float.rounding,
        })
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }
}

/// Configuration error.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// I/O error reading config.
    #[error("I/O error for {}: {message}", path.display())]
    #[diagnostic(code(config::io))]
    Io { path: PathBuf, message: String },

    /// Parse error in config file.
    #[error("parse error in {}: {message}", path.display())]
    #[diagnostic(code(config::parse))]
    Parse { path: PathBuf, message: String },

    /// Values that parse but cannot be used.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(config::invalid))]
    Invalid { message: String },

    /// Serialization error.
    #[error("serialization error: {message}")]
    #[diagnostic(code(config::serialize))]
    Serialize { message: String },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.float.exponent_bits, 8);
        assert_eq!(config.float.mantissa_bits, 23);
        assert_eq!(config.float.rounding, RoundingMode::RoundToEven);
        assert_eq!(config.integer.default_width, 8);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.layout().unwrap(), FloatLayout::SINGLE);
    }

    #[test]
    fn test_to_toml_sections() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[float]"));
        assert!(toml.contains("[integer]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("rounding = \"round-to-even\""));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[float]
exponent_bits = 5
mantissa_bits = 10
rounding = "down"

[integer]
default_width = 16
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.layout().unwrap(), FloatLayout::HALF);
        assert_eq!(config.float.rounding, RoundingMode::RoundDown);
        assert_eq!(config.integer.default_width, 16);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_merge_keeps_unset_values() {
        let base: Config = toml::from_str("[integer]\ndefault_width = 32\n").unwrap();
        let project: Config = toml::from_str("[output]\nformat = \"json\"\n").unwrap();
        let merged = base.merge(project);
        assert_eq!(merged.integer.default_width, 32);
        assert_eq!(merged.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> = [
            ("NUMREP_EXPONENT_BITS", "11"),
            ("NUMREP_MANTISSA_BITS", "52"),
            ("NUMREP_ROUNDING", "up"),
            ("NUMREP_WIDTH", "not-a-number"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.layout().unwrap(), FloatLayout::DOUBLE);
        assert_eq!(config.float.rounding, RoundingMode::RoundUp);
        assert_eq!(config.integer.default_width, 8);
    }

    #[test]
    fn test_invalid_layout() {
        let mut config = Config::default();
        config.float.exponent_bits = 12;
        assert!(matches!(config.layout(), Err(ConfigError::Invalid { .. })));
        assert!(config.encode_options().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[integer]\ndefault_width = 12").unwrap();
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.integer.default_width, 12);
        assert_eq!(config.encode_options().unwrap().width, 12);
    }

    #[test]
    fn test_load_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load_from_file(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[float\nexponent_bits = ").unwrap();
        assert!(matches!(
            Config::load_from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }
}
