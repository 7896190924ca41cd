//! Error types for surface operations, editor construction and configuration.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A drawing-surface primitive failed.
///
/// Fatal to the render pass that triggered it; the renderer propagates it
/// rather than leaving a partially drawn frame behind silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("surface operation `{op}` failed: {message}")]
pub struct SurfaceError {
    /// Name of the primitive that failed (e.g. `"arc"`, `"fill_text"`).
    pub op: &'static str,
    /// Host-provided description of the failure.
    pub message: String,
}

impl SurfaceError {
    #[must_use]
    pub fn new(op: &'static str, message: impl Into<String>) -> Self {
        Self { op, message: message.into() }
    }
}

/// Errors produced by the editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The canvas element has no 2D rendering context.
    #[error("missing canvas 2d context")]
    MissingContext,

    /// Looking up the 2D context threw.
    #[error("canvas 2d context unavailable: {0}")]
    ContextUnavailable(String),

    /// A render pass failed on the drawing surface.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl EditorError {
    /// Stable machine-readable code for the host.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingContext => "E_MISSING_CONTEXT",
            Self::ContextUnavailable(_) => "E_CONTEXT_UNAVAILABLE",
            Self::Surface(_) => "E_SURFACE",
        }
    }
}

/// Errors produced while loading an [`crate::config::EditorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Returned by [`crate::events::InputSender::send`] once the editor is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("editor input stream is closed")]
pub struct SendError;
