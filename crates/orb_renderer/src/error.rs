//! Render errors.

use orb_core::{SceneError, SettingsError};
use thiserror::Error;

/// Errors surfaced by a render session.
///
/// The light transport itself never fails; these come from input
/// validation, cancellation, or writing the image out.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Render cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
