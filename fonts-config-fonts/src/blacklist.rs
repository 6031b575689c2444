//! Emoji glyph blacklisting.
//!
//! Text fonts often ship a handful of emoji glyphs and emoji fonts often ship
//! plain text glyphs. Either way fontconfig may pick the wrong font for a
//! codepoint. The builder computes, per family, the codepoints to hide:
//!
//! - for an emoji font, everything below [`EMOJI_THRESHOLD`]
//! - for a text font, everything it shares with the "true emoji" set, the
//!   union of all emoji fonts' codepoints at or above the threshold minus
//!   [`COMMON_EMOJI_CODEPOINTS`]

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use fonts_config_charset::Charset;
use fonts_config_sysconfig::Verbosity;

use crate::collection::Collection;
use crate::font::Font;
use crate::pool::ScanPool;

/// ZERO WIDTH JOINER. Emoji fonts' codepoints below it are treated as text.
pub const EMOJI_THRESHOLD: u32 = 0x200D;

/// Emoji-presentable codepoints that almost every text font carries.
///
/// They are never blacklisted from text fonts.
pub const COMMON_EMOJI_CODEPOINTS: &[u32] = &[
    0x0, 0x20, 0x23, 0x2a, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0xa9, 0xae,
    0x200d, 0x203c, 0x2049, 0x20e3, 0x2122, 0x2139, 0x2194, 0x2195, 0x2196, 0x2197, 0x2198, 0x2199,
    0x21a9, 0x21aa, 0x25aa, 0x25ab, 0x25b6, 0x25c0, 0x2600, 0x2611, 0x2640, 0x2642, 0x27a1, 0x2b05,
    0x2b06, 0x2b07,
];

/// Tunables of the blacklist builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistConfig {
    /// Emoji fonts' codepoints below this are blacklisted from them.
    pub threshold: u32,
    /// Codepoints never blacklisted from text fonts.
    pub common_glyphs: Charset,
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            threshold: EMOJI_THRESHOLD,
            common_glyphs: Charset::from_codepoints(COMMON_EMOJI_CODEPOINTS.iter().copied()),
        }
    }
}

/// Codepoints to hide from one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistEntry {
    pub family: String,
    pub charset: Charset,
}

/// Split the collection into emoji fonts and text fonts.
pub fn classify(collection: &Collection) -> (Vec<&Font>, Vec<&Font>) {
    collection.iter().partition(|font| font.is_emoji())
}

/// Reduce the emoji fonts to their own blacklist entries and the true-emoji
/// charset text fonts are checked against.
pub fn reduce(emoji_fonts: &[&Font], config: &BlacklistConfig) -> (Vec<BlacklistEntry>, Charset) {
    let mut entries = Vec::new();
    let mut true_emoji = Charset::new();
    for font in emoji_fonts {
        let (text, emoji) = font.charset.split_at(config.threshold);
        if !text.is_empty() {
            entries.push(BlacklistEntry {
                family: font.family().to_string(),
                charset: text,
            });
        }
        true_emoji = true_emoji.union(&emoji);
    }
    (entries, true_emoji.substract(&config.common_glyphs))
}

/// Compute the blacklist for every font in `collection`.
///
/// Entries for the same family are merged by union. The result is sorted by
/// family name, so it does not depend on scan order.
pub fn build_blacklist(
    collection: &Collection,
    config: &BlacklistConfig,
    pool: &ScanPool,
    verbosity: Verbosity,
) -> Vec<BlacklistEntry> {
    let (emoji_fonts, text_fonts) = classify(collection);
    log::info!(
        "Blacklisting glyphs: {} emoji fonts, {} other fonts",
        emoji_fonts.len(),
        text_fonts.len()
    );

    let (emoji_entries, true_emoji) = reduce(&emoji_fonts, config);
    let mut merged = BTreeMap::new();
    for entry in emoji_entries {
        merge_entry(&mut merged, entry);
    }

    if true_emoji.is_empty() {
        log::info!("No emoji glyphs installed, skipping text font scan");
    } else {
        if verbosity.is_debug() {
            log::debug!("True emoji charset: {}", true_emoji);
        }
        merged = pool.run(
            text_fonts,
            merged,
            |font| {
                let overlap = font.charset.intersect(&true_emoji);
                (!overlap.is_empty()).then(|| BlacklistEntry {
                    family: font.family().to_string(),
                    charset: overlap,
                })
            },
            |merged, entry| {
                if let Some(entry) = entry {
                    merge_entry(merged, entry);
                }
            },
        );
    }

    let entries: Vec<BlacklistEntry> = merged
        .into_iter()
        .map(|(family, charset)| BlacklistEntry { family, charset })
        .collect();
    for entry in &entries {
        log::debug!(
            "Blacklisting {} codepoints in {}",
            entry.charset.codepoint_count(),
            entry.family
        );
    }
    entries
}

fn merge_entry(merged: &mut BTreeMap<String, Charset>, entry: BlacklistEntry) {
    match merged.entry(entry.family) {
        Entry::Occupied(mut slot) => {
            let union = slot.get().union(&entry.charset);
            slot.insert(union);
        }
        Entry::Vacant(slot) => {
            slot.insert(entry.charset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::EMOJI_LANG;

    fn font(name: &str, lang: &[&str], charset: &str) -> Font {
        Font {
            name: vec![name.to_string()],
            lang: lang.iter().map(|s| s.to_string()).collect(),
            path: format!("/fonts/{name}.ttf"),
            charset: charset.parse().unwrap(),
            ..Font::default()
        }
    }

    #[test]
    fn test_common_list_is_unaltered() {
        assert_eq!(COMMON_EMOJI_CODEPOINTS.len(), 42);
        let config = BlacklistConfig::default();
        assert_eq!(config.threshold, 0x200D);
        assert_eq!(config.common_glyphs.codepoint_count(), 42);
        assert!(config.common_glyphs.contains(0x2b07));
    }

    #[test]
    fn test_classify() {
        let c = Collection::from_fonts([
            font("Emoji", &[EMOJI_LANG], ""),
            font("Text", &["en"], ""),
        ]);
        let (emoji, text) = classify(&c);
        assert_eq!(emoji.len(), 1);
        assert_eq!(text.len(), 1);
        assert_eq!(emoji[0].family(), "Emoji");
    }

    #[test]
    fn test_reduce_splits_at_threshold() {
        let a = font("A", &[EMOJI_LANG], "20..7e 2122 1f600..1f64f");
        let b = font("B", &[EMOJI_LANG], "1f680..1f6ff");
        let (entries, true_emoji) = reduce(&[&a, &b], &BlacklistConfig::default());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].family, "A");
        assert_eq!(entries[0].charset.to_string(), "20..7e");
        // 0x2122 is a common glyph
        assert_eq!(true_emoji.to_string(), "1f600..1f64f 1f680..1f6ff");
    }

    #[test]
    fn test_merge_entry_unions() {
        let mut merged = BTreeMap::new();
        merge_entry(
            &mut merged,
            BlacklistEntry {
                family: "X".into(),
                charset: "41".parse().unwrap(),
            },
        );
        merge_entry(
            &mut merged,
            BlacklistEntry {
                family: "X".into(),
                charset: "42".parse().unwrap(),
            },
        );
        assert_eq!(merged["X"].to_string(), "41..42");
    }
}
