//! Parsing of `fc-scan` charset output and the cache token codec.
//!
//! `fc-scan --format "%{charset}"` prints whitespace separated tokens, each a
//! hex codepoint (`a0`) or a hex range (`20-7e`). The inventory cache stores
//! the canonical form as an array of `"a0"` / `"20..7e"` strings.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::range::CharsetRange;

/// A range glued to the start of the next repetition of the charset.
///
/// Some CJK collections (e.g. `wqy-zenhei.ttc`) repeat their charset once per
/// face without a separator, producing tokens like `2fa15-2fa1c20-7e`. The
/// break point is the `20-7X` that opens the next repetition.
static GLUED_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]+-[0-9a-fA-F]+?)(20-7[0-9a-fA-F])$")
        .expect("Failed to compile charset continuation regex")
});

impl Charset {
    /// Parse the raw token list reported by `fc-scan`.
    ///
    /// Glued continuation tokens are split, duplicate tokens are dropped
    /// before any range is built, and unparseable tokens are skipped.
    pub fn from_raw(raw: &str) -> Charset {
        let mut seen = HashSet::new();
        let mut ranges = Vec::new();
        for token in raw.split_whitespace().flat_map(split_continuation) {
            if !seen.insert(token) {
                continue;
            }
            match token.parse::<CharsetRange>() {
                Ok(range) => ranges.push(range),
                Err(e) => log::debug!("Skipping charset token: {e}"),
            }
        }
        Charset::from_ranges(ranges)
    }

    /// Build from cache tokens, skipping malformed ones.
    pub fn from_tokens<S: AsRef<str>>(tokens: impl IntoIterator<Item = S>) -> Charset {
        Charset::from_ranges(tokens.into_iter().filter_map(|token| {
            token
                .as_ref()
                .parse::<CharsetRange>()
                .inspect_err(|e| log::warn!("Ignoring cached charset token: {e}"))
                .ok()
        }))
    }
}

fn split_continuation(token: &str) -> Vec<&str> {
    match GLUED_CONTINUATION.captures(token) {
        Some(caps) => caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect(),
        None => vec![token],
    }
}

impl Serialize for Charset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.range_count()))?;
        for range in self {
            seq.serialize_element(&range.to_string())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Charset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenVisitor;

        impl<'de> Visitor<'de> for TokenVisitor {
            type Value = Charset;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an array of hex codepoint or range tokens")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Charset, A::Error> {
                let mut tokens: Vec<String> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(token) = seq.next_element::<String>()? {
                    tokens.push(token);
                }
                Ok(Charset::from_tokens(tokens))
            }

            fn visit_unit<E>(self) -> Result<Charset, E> {
                Ok(Charset::new())
            }
        }

        deserializer.deserialize_any(TokenVisitor)
    }
}
