//! Font inventory and glyph blacklisting for fonts-config.
//!
//! This crate provides:
//! - [`Font`] records with their canonical [`Charset`](fonts_config_charset::Charset)
//!   and the identity-keyed [`Collection`] holding them
//! - A JSON inventory cache so unchanged fonts are never rescanned
//! - [`ScanPool`], OS worker threads capped by a fixed token pool, merging into
//!   one mutex-guarded accumulator behind a join barrier
//! - [`Inventory`], the incremental loader diffing the cache against the
//!   installed font files reported by a [`FontSource`]
//! - The emoji blacklist builder, hiding emoji glyphs from text fonts and text
//!   glyphs from emoji fonts
//!
//! # Architecture
//!
//! ```text
//! cache ──► Inventory::load ──► Collection ──► build_blacklist ──► entries
//!                 │                  │
//!            FontSource::scan        └──► encode ──► cache
//!            (via ScanPool)
//! ```

pub mod blacklist;
pub mod collection;
pub mod error;
pub mod font;
pub mod inventory;
pub mod pool;

pub use blacklist::{
    BlacklistConfig, BlacklistEntry, COMMON_EMOJI_CODEPOINTS, EMOJI_THRESHOLD, build_blacklist,
};
pub use collection::{Collection, NameQuery};
pub use error::FontsError;
pub use font::{EMOJI_LANG, Font, FontRecord, IdentityKey};
pub use inventory::{FontSource, Inventory, LoadReport};
pub use pool::{DEFAULT_SCAN_TOKENS, ScanPool, TokenGuard, TokenPool};
