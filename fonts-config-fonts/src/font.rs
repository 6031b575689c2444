//! Per-font metadata and canonical coverage.

use std::path::Path;

use fonts_config_charset::Charset;
use serde::{Deserialize, Serialize};

/// Language tag fontconfig reports for emoji fonts (undetermined, emoji script).
pub const EMOJI_LANG: &str = "und-zsye";

/// One face as reported by the font introspection tool, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontRecord {
    /// Family aliases in the order the tool reports them.
    pub aliases: Vec<String>,
    pub languages: Vec<String>,
    /// Style integers on fontconfig's 0–200 scale.
    pub width: i32,
    pub weight: i32,
    pub slant: i32,
    pub spacing: i32,
    pub outline: bool,
    /// Whitespace separated hex codepoints and `hex-hex` ranges.
    pub raw_charset: String,
}

/// Which fields make two fonts "the same font" when merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityKey {
    /// The font file path.
    Path,
    /// Aliases plus width, weight and slant.
    Style,
    /// One face of one file: path and style together. Collection files such
    /// as `.ttc` keep one entry per family they contain.
    #[default]
    Face,
}

/// A scanned font with its canonical charset.
///
/// Serialized with the key names of the inventory cache format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Font {
    /// Non-empty family alias list.
    pub name: Vec<String>,
    #[serde(default)]
    pub lang: Vec<String>,
    pub path: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub weight: i32,
    #[serde(default)]
    pub slant: i32,
    #[serde(default)]
    pub spacing: i32,
    #[serde(default)]
    pub outline: bool,
    #[serde(default)]
    pub charset: Charset,
}

impl Font {
    /// Normalize a record for `path`: duplicate aliases and languages are
    /// dropped (first occurrence wins) and the charset is parsed once.
    pub fn from_record(path: &str, record: FontRecord) -> Font {
        let mut name = dedup(record.aliases.into_iter().map(|a| a.trim().to_string()));
        if name.is_empty() {
            name.push(file_stem(path));
        }
        Font {
            name,
            lang: dedup(record.languages.into_iter().map(|l| l.trim().to_string())),
            path: path.to_string(),
            width: record.width,
            weight: record.weight,
            slant: record.slant,
            spacing: record.spacing,
            outline: record.outline,
            charset: Charset::from_raw(&record.raw_charset),
        }
    }

    /// Zero-coverage entry for a file that could not be scanned.
    ///
    /// Keeping the path in the inventory stops the next run from retrying a
    /// broken file forever; it is rescanned once it disappears and returns.
    pub fn unreadable(path: &str) -> Font {
        Font {
            name: vec![file_stem(path)],
            path: path.to_string(),
            ..Font::default()
        }
    }

    pub fn is_emoji(&self) -> bool {
        self.lang.iter().any(|l| l == EMOJI_LANG)
    }

    /// The family name used for blacklist entries: the last alias.
    pub fn family(&self) -> &str {
        self.name.last().map(String::as_str).unwrap_or(&self.path)
    }

    /// The base family name followed by the aliases that are not style
    /// variants of it.
    ///
    /// The shortest alias is the base, with a trailing `UI` qualifier
    /// removed. Aliases containing the base ("Noto Sans Display" for base
    /// "Noto Sans") are style variants and are dropped.
    pub fn unstyled_name(&self) -> Vec<String> {
        let Some(shortest) = self.name.iter().min_by_key(|n| n.chars().count()) else {
            return Vec::new();
        };
        let base = match shortest.strip_suffix("UI") {
            Some(stripped) if !stripped.trim_end().is_empty() => stripped.trim_end(),
            _ => shortest.as_str(),
        };
        let mut out = vec![base.to_string()];
        out.extend(
            self.name
                .iter()
                .filter(|n| *n != shortest && !n.contains(base))
                .cloned(),
        );
        out
    }

    /// Whether `other` denotes the same font under `key`.
    pub fn same_identity(&self, other: &Font, key: IdentityKey) -> bool {
        match key {
            IdentityKey::Path => self.path == other.path,
            IdentityKey::Style => {
                self.name == other.name
                    && self.width == other.width
                    && self.weight == other.weight
                    && self.slant == other.slant
            }
            IdentityKey::Face => {
                self.same_identity(other, IdentityKey::Path)
                    && self.same_identity(other, IdentityKey::Style)
            }
        }
    }

    /// Fold `other` into `self`: union the charsets and append the aliases
    /// and languages `self` lacks, keeping their order.
    pub fn absorb(&mut self, other: Font) {
        self.charset = self.charset.union(&other.charset);
        for alias in other.name {
            if !self.name.contains(&alias) {
                self.name.push(alias);
            }
        }
        for lang in other.lang {
            if !self.lang.contains(&lang) {
                self.lang.push(lang);
            }
        }
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_named(names: &[&str]) -> Font {
        Font {
            name: names.iter().map(|s| s.to_string()).collect(),
            path: "/usr/share/fonts/test.ttf".into(),
            ..Font::default()
        }
    }

    #[test]
    fn test_from_record_normalizes() {
        let record = FontRecord {
            aliases: vec!["Noto Sans".into(), " Noto Sans ".into(), "Noto Sans Display".into()],
            languages: vec!["en".into(), "de".into(), "en".into()],
            width: 100,
            weight: 80,
            raw_charset: "20-7e 20-7e a0".into(),
            ..FontRecord::default()
        };
        let font = Font::from_record("/fonts/NotoSans-Regular.ttf", record);
        assert_eq!(font.name, vec!["Noto Sans", "Noto Sans Display"]);
        assert_eq!(font.lang, vec!["en", "de"]);
        assert_eq!(font.charset.to_string(), "20..7e a0");
        assert_eq!(font.width, 100);
    }

    #[test]
    fn test_from_record_without_aliases_uses_file_stem() {
        let font = Font::from_record("/fonts/Mystery.otf", FontRecord::default());
        assert_eq!(font.name, vec!["Mystery"]);
        assert!(font.charset.is_empty());
    }

    #[test]
    fn test_unreadable_has_zero_coverage() {
        let font = Font::unreadable("/fonts/broken.ttf");
        assert_eq!(font.name, vec!["broken"]);
        assert_eq!(font.path, "/fonts/broken.ttf");
        assert!(font.charset.is_empty());
    }

    #[test]
    fn test_is_emoji() {
        let mut font = font_named(&["Noto Color Emoji"]);
        assert!(!font.is_emoji());
        font.lang = vec!["en".into(), EMOJI_LANG.into()];
        assert!(font.is_emoji());
    }

    #[test]
    fn test_family_is_last_alias() {
        assert_eq!(font_named(&["A", "B"]).family(), "B");
    }

    #[test]
    fn test_unstyled_name_drops_style_variants() {
        let font = font_named(&["Noto Sans Display", "Noto Sans", "Noto Sans Display Light"]);
        assert_eq!(font.unstyled_name(), vec!["Noto Sans"]);
    }

    #[test]
    fn test_unstyled_name_keeps_unrelated_aliases() {
        let font = font_named(&["WenQuanYi Zen Hei", "文泉驿正黑"]);
        assert_eq!(font.unstyled_name(), vec!["文泉驿正黑", "WenQuanYi Zen Hei"]);
    }

    #[test]
    fn test_unstyled_name_strips_ui() {
        let font = font_named(&["Noto Sans UI", "Noto Sans Display UI", "Other Family Name"]);
        assert_eq!(font.unstyled_name(), vec!["Noto Sans", "Other Family Name"]);
    }

    #[test]
    fn test_same_identity() {
        let a = font_named(&["X"]);
        let mut b = font_named(&["Y"]);
        assert!(a.same_identity(&b, IdentityKey::Path));
        assert!(!a.same_identity(&b, IdentityKey::Style));
        b.name = a.name.clone();
        b.path = "/elsewhere.ttf".into();
        assert!(a.same_identity(&b, IdentityKey::Style));
        b.weight = 200;
        assert!(!a.same_identity(&b, IdentityKey::Style));
    }

    #[test]
    fn test_face_identity_needs_path_and_style() {
        let a = font_named(&["Noto Sans CJK JP"]);
        let mut b = font_named(&["Noto Sans CJK SC"]);
        assert!(!a.same_identity(&b, IdentityKey::Face));
        b.name = a.name.clone();
        assert!(a.same_identity(&b, IdentityKey::Face));
        b.path = "/elsewhere.ttc".into();
        assert!(!a.same_identity(&b, IdentityKey::Face));
    }

    #[test]
    fn test_absorb_keeps_every_alias_and_language() {
        let mut a = font_named(&["Noto Sans CJK JP"]);
        a.lang = vec!["ja".into()];
        a.charset = "20..7e".parse().unwrap();
        let mut b = font_named(&["Noto Sans CJK SC", "Noto Sans CJK JP"]);
        b.lang = vec!["zh-cn".into(), "ja".into()];
        b.charset = "7f 4e00".parse().unwrap();
        a.absorb(b);
        assert_eq!(a.name, vec!["Noto Sans CJK JP", "Noto Sans CJK SC"]);
        assert_eq!(a.lang, vec!["ja", "zh-cn"]);
        assert_eq!(a.charset.to_string(), "20..7f 4e00");
    }
}
