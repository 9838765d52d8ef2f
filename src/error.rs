// src/error.rs

//! Error types for editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations. None of these are fatal to the
/// process: the application layer turns them into transient status messages.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Coordinate outside the canvas. Only reachable through `Canvas::get`;
    /// the command surface clamps and clips before touching the grid, so
    /// seeing this indicates a rasterizer or controller bug.
    #[error("Coordinates ({x}, {y}) are outside the canvas")]
    OutOfBounds { x: i32, y: i32 },

    /// Save or load failed at the storage layer (I/O, permissions, corrupt
    /// or malformed record). The canvas is left unchanged.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Load was requested but the storage directory holds no records.
    #[error("No saved drawings found")]
    NoSavedRecords,
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        EditorError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::StorageUnavailable(err.to_string())
    }
}
