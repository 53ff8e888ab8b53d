//! Error types for the convid-core library.
//!
//! Probe parse problems are deliberately not represented here: a file whose
//! metadata cannot be read degrades to an empty stream list (see
//! [`crate::external::probe_streams`]). Errors are reserved for systemic
//! conditions such as missing external binaries or I/O failures.

use std::io;
use thiserror::Error;

/// Custom error types for convid
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("No processable video files found")]
    NoFilesFound,
}

/// Result type for convid operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
