//! Error type for the glow engine.
//!
//! Most per-frame calls degrade to silent no-ops instead of failing; these
//! variants cover the few cases that are rejected outright.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlowError {
    #[error("glow distance must be at least 1 pixel")]
    ZeroGlowDistance,
    #[error("grid size mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
    #[error("invalid glow config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse glow config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GlowError>;
