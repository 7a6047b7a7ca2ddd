//! Error types for the Wallscene engine
//!
//! This module defines the error types used throughout the engine,
//! including graphics device calls, frame graph construction and
//! scene initialization.

use std::fmt;

/// Result type for Wallscene engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wallscene engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, Vulkan, mock, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, shader, mesh, handle, etc.)
    InvalidResource(String),

    /// Initialization failed (graphic manager, scene, subsystems)
    InitializationFailed(String),

    /// A named or versioned resource was never produced
    ResourceNotFound(String),

    /// The frame graph cannot be ordered (dependency cycle, bad declaration)
    GraphConstruction(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ResourceNotFound(msg) => write!(f, "Resource not found: {}", msg),
            Error::GraphConstruction(msg) => write!(f, "Graph construction failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build a `BackendError`, logging it at ERROR level with file:line
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("wallscene::FrameGraph", "pass {} not found", id);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::wallscene::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with a `BackendError`
///
/// # Example
///
/// ```ignore
/// engine_bail!("wallscene::mock", "unknown texture handle {:?}", handle);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
