//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the plume crate.
///
/// Every variant is a startup-time failure: the steady-state frame loop has
/// no error path (pure arithmetic and draw calls).
#[derive(Debug)]
pub enum PlumeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A texture in the set failed to load or decode.
    ///
    /// Asset loading is all-or-nothing: the first failure aborts startup and
    /// no part of the scene is constructed.
    AssetLoad {
        /// Path of the first failing asset.
        path: String,
        /// Underlying decode/read failure.
        reason: String,
    },
    /// A page element required by a scroll/tilt binding is absent from the
    /// layout. Surfaced at binding resolution, never as a silent no-op.
    MissingElement(&'static str),
    /// TOML options or layout parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for PlumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::AssetLoad { path, reason } => {
                write!(
                    f,
                    "failed to load asset {path}: {reason} \
                     (is the assets/ directory present next to the binary?)"
                )
            }
            Self::MissingElement(name) => {
                write!(f, "page layout is missing required element: {name}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for PlumeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for PlumeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for PlumeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
