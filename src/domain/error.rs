//! Error types for the launcher core.
//!
//! This module defines the centralized error type [`GridlaunchError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Most failure paths in the engine degrade instead of propagating: unreadable roots
//! are skipped, missing icons become `None`, and failed favorites writes leave the
//! in-memory set authoritative. The variants below cover what remains.

use thiserror::Error;

/// The main error type for launcher operations.
///
/// # Examples
///
/// ```
/// use gridlaunch::GridlaunchError;
///
/// fn validate_config() -> Result<(), GridlaunchError> {
///     Err(GridlaunchError::Config("columns must be a number".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum GridlaunchError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value store fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication with the background scan worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page jump named a page that does not exist.
    ///
    /// Returned by [`Pager::jump_to`](crate::app::Pager::jump_to). Callers only
    /// originate indices from the rendered page indicator, so this signals a stale
    /// or malformed request rather than a user mistake.
    #[error("page {requested} is out of range ({page_count} pages)")]
    PageOutOfRange {
        /// The page index that was requested.
        requested: usize,
        /// Number of pages at the time of the request.
        page_count: usize,
    },
}

/// A specialized `Result` type for launcher operations.
///
/// This is a type alias for `std::result::Result<T, GridlaunchError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, GridlaunchError>;
