//! Typed errors for the font inventory.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while persisting or decoding the inventory cache.
///
/// Loading the cache never surfaces these: a broken cache is logged and
/// replaced by an empty one. They reach callers only from explicit
/// encode/decode/save calls.
#[derive(Debug, Error)]
pub enum FontsError {
    /// The cache file could not be read or written.
    #[error("I/O error on font cache '{}': {source}", path.display())]
    Io {
        /// Cache file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The cache contents are not a valid font list.
    #[error("font cache JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
