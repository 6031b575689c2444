//! Option set and sysconfig file handling for fonts-config.
//!
//! This crate provides:
//!
//! - [`Options`], the typed option set read from `/etc/sysconfig/fonts-config`
//!   and the per-user `~/.config/fontconfig/fonts-config`
//! - [`OptionKey`], an enum-keyed accessor table mapping each option to its
//!   sysconfig variable name
//! - [`Verbosity`], the explicit output level threaded through every run
//! - Parsing, layered merging and template-preserving rewriting of sysconfig
//!   `KEY="value"` files

pub mod error;
pub mod options;
pub mod sysconfig;
pub mod verbosity;

pub use error::ConfigError;
pub use options::{OptionKey, OptionKind, OptionValue, Options};
pub use verbosity::Verbosity;
