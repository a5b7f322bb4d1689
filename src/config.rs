//! Glow engine configuration.
//!
//! Deserialized from JSON (usually as part of a scene file); every field has
//! a default so partial documents are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::{GlowError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Surface color written by `GlowCanvas::clear`, as `[r, g, b, a]`.
    pub background: [u8; 4],
    /// Skip enqueueing neighbors that cannot beat a value already queued for
    /// the same cell. Never changes the result, only the amount of work.
    pub dedup_frontier: bool,
    /// Upper bound applied to requested glow distances when seeding.
    pub max_glow_distance: u8,
    /// Optional lower bound on the per-step decrement. The default 0 keeps
    /// `floor(adjusted / glow_distance)` unchanged, including a decrement of
    /// 0 for seeds whose adjusted alpha is below their distance.
    pub min_decrement: u8,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 255],
            dedup_frontier: true,
            max_glow_distance: 255,
            min_decrement: 0,
        }
    }
}

impl GlowConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: GlowConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_glow_distance == 0 {
            return Err(GlowError::InvalidConfig(
                "max_glow_distance must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn background_color(&self) -> Rgba8 {
        Rgba8::from_array(self.background)
    }
}
