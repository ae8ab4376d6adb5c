use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{PatternError, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub compiler: CompilerConfig,
    pub output: OutputConfig,
    pub upload: UploadConfig,
}

impl AppConfig {
    /// Loads a JSON configuration file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.compiler.default_fade_speed == 0 {
            return Err(PatternError::msg("compiler.default_fade_speed must be at least 1"));
        }
        if self.compiler.default_marker.trim().is_empty() {
            return Err(PatternError::msg("compiler.default_marker must not be empty"));
        }
        Ok(())
    }
}

/// Defaults applied to directives that omit their argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub default_marker: String,
    pub default_fade_speed: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_marker: "default".to_string(),
            default_fade_speed: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Log every frame in the board's tree layout.
    pub pretty: bool,
}

/// Settings for programming the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Display mode selected before writing; 1 plays the pattern memory.
    pub mode: u8,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { mode: 1 }
    }
}
