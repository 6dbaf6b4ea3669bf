//! Engine configuration: provider time scale, playback padding, casing.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::scoring::span::DEFAULT_UNIT_TO_SECONDS;

/// Margins added around a span for playback, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpanPadding {
    pub pre: f64,
    pub post: f64,
}

impl Default for SpanPadding {
    fn default() -> Self {
        Self { pre: 0.05, post: 0.05 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds per provider time unit.
    pub unit_to_seconds: f64,
    pub padding: SpanPadding,
    /// Recapitalize the first letters when the word starts uppercase.
    pub capitalize_letters: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unit_to_seconds: DEFAULT_UNIT_TO_SECONDS,
            padding: SpanPadding::default(),
            capitalize_letters: true,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: EngineConfig = serde_json::from_str(&data)
            .map_err(|e| PayloadError::json("parsing engine config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PayloadError> {
        if !self.unit_to_seconds.is_finite() || self.unit_to_seconds <= 0.0 {
            return Err(PayloadError::invalid_config(format!(
                "unit_to_seconds must be positive, got {}",
                self.unit_to_seconds
            )));
        }
        for (name, value) in [("padding.pre", self.padding.pre), ("padding.post", self.padding.post)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PayloadError::invalid_config(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
