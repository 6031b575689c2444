//! Typed errors for charset token parsing.

use thiserror::Error;

/// Errors produced while parsing charset tokens.
///
/// Lenient entry points ([`Charset::from_raw`](crate::Charset::from_raw) and
/// cache deserialization) log and skip tokens failing with these errors; only
/// the strict `FromStr` implementations surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharsetError {
    /// The token is not a hex codepoint or a hex range.
    #[error("invalid charset token '{0}'")]
    InvalidToken(String),

    /// The range bounds are reversed.
    #[error("invalid charset range {min:#x}..{max:#x}: lower bound exceeds upper bound")]
    ReversedRange {
        /// Lower bound as written.
        min: u32,
        /// Upper bound as written.
        max: u32,
    },

    /// The codepoint lies beyond the Unicode codespace.
    #[error("codepoint {0:#x} is outside the Unicode range")]
    OutOfRange(u32),
}
