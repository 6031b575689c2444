//! Canonical codepoint range sets for fonts-config.
//!
//! This crate provides:
//! - [`CharsetRange`], a closed codepoint interval, and the seven-way
//!   [`Relation`] every set operation dispatches on
//! - [`Charset`], an ordered set of coalesced ranges with append, union,
//!   intersect and substract
//! - Parsing of the raw token list reported by `fc-scan` and the `"min..max"`
//!   token form used by the inventory cache
//!
//! # Canonical form
//!
//! A `Charset` is always sorted ascending, its ranges never overlap and no two
//! ranges are adjacent. Every operation re-canonicalizes its own output, so a
//! `Charset` obtained from this crate satisfies the invariant no matter how it
//! was built.

pub mod charset;
pub mod error;
pub mod parse;
pub mod range;

pub use charset::Charset;
pub use error::CharsetError;
pub use range::{CharsetRange, MAX_CODEPOINT, Relation};
