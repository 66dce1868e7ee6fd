//! Error types for scene setup and platform glue.
//!
//! The per-frame simulation never fails; these only surface while loading
//! settings, choosing a scene or acquiring browser handles.

use std::fmt;

/// Errors that can occur outside the steady-state frame loop.
#[derive(Debug)]
pub enum SceneError {
    /// The drawing surface (canvas context) could not be obtained.
    SurfaceUnavailable,
    /// Settings JSON failed to parse.
    InvalidSettings(serde_json::Error),
    /// No scene is registered under this name.
    UnknownScene(String),
    /// A browser API call failed.
    Platform(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::SurfaceUnavailable => write!(f, "drawing surface is not available"),
            SceneError::InvalidSettings(e) => write!(f, "invalid settings: {}", e),
            SceneError::UnknownScene(name) => write!(f, "unknown scene '{}'", name),
            SceneError::Platform(msg) => write!(f, "platform error: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::InvalidSettings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::InvalidSettings(e)
    }
}
