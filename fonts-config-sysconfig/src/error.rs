//! Typed error variants for the fonts-config-sysconfig crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading, validating or writing sysconfig files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A sysconfig file could not be read or written.
    #[error("I/O error on sysconfig file '{}': {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A value does not fit the option's type.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Sysconfig variable name.
        key: String,
        /// Offending value as written.
        value: String,
    },
}
