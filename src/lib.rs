// Library exports for testing and potential library use
//
// The generation pipeline lives in the workspace crates:
//
//   - `fonts-config-charset`   : canonical codepoint range sets
//   - `fonts-config-fonts`     : font inventory, scan pool, emoji blacklist
//   - `fonts-config-sysconfig` : option set and sysconfig files
//
// This crate adds the fontconfig tool integration, the XML renderers and the
// command line runner on top of them.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod fc;
pub mod paths;
pub mod render;
pub mod runner;

pub use paths::{Locations, Mode};
pub use runner::{RunSummary, Runner};
