//! Errors raised while building or validating render inputs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown built-in scene '{0}'")]
    UnknownPreset(String),

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors in render parameters, rejected before any rendering starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Image dimensions must be positive (got {width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Samples per sub-pixel must be at least 1")]
    NoSamples,
}
