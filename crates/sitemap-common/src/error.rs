//! Error types for sitemap-common.

use thiserror::Error;

/// Common error type for sitemap value handling.
#[derive(Debug, Error)]
pub enum Error {
    /// Text that is not a W3C datetime in any accepted precision.
    #[error("invalid W3C datetime: {0:?}")]
    InvalidDateTime(String),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
