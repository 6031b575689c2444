//! The identity-keyed font collection and its JSON cache.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FontsError;
use crate::font::{Font, IdentityKey};

/// A name or path query: plain substring or regular expression.
#[derive(Debug, Clone)]
pub enum NameQuery {
    Substring(String),
    Pattern(Regex),
}

impl NameQuery {
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            NameQuery::Substring(needle) => candidate.contains(needle.as_str()),
            NameQuery::Pattern(re) => re.is_match(candidate),
        }
    }
}

impl From<&str> for NameQuery {
    fn from(s: &str) -> Self {
        NameQuery::Substring(s.to_string())
    }
}

impl From<String> for NameQuery {
    fn from(s: String) -> Self {
        NameQuery::Substring(s)
    }
}

impl From<Regex> for NameQuery {
    fn from(re: Regex) -> Self {
        NameQuery::Pattern(re)
    }
}

/// Installed fonts, at most one entry per identity key.
///
/// Mutated only while the inventory is being loaded; everything downstream
/// reads it through shared references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    fonts: Vec<Font>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, folding records of the same face.
    pub fn from_fonts(fonts: impl IntoIterator<Item = Font>) -> Self {
        let mut collection = Collection::new();
        for font in fonts {
            collection.append_charset_or_font(font, IdentityKey::Face);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Font> {
        self.fonts.iter()
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fonts.iter().map(|f| f.path.as_str())
    }

    /// Fonts having at least one alias matching `query`.
    pub fn find_by_name(&self, query: impl Into<NameQuery>) -> Vec<&Font> {
        let query = query.into();
        self.fonts
            .iter()
            .filter(|f| f.name.iter().any(|n| query.matches(n)))
            .collect()
    }

    /// Fonts whose file name (not the directory part) matches `query`.
    pub fn find_by_path(&self, query: impl Into<NameQuery>) -> Vec<&Font> {
        let query = query.into();
        self.fonts
            .iter()
            .filter(|f| {
                let base = Path::new(&f.path)
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                query.matches(&base)
            })
            .collect()
    }

    /// Merge `font` into an entry with the same identity, or add it.
    ///
    /// A merge is [`Font::absorb`]: the charset becomes the union of both and
    /// aliases and languages missing from the existing entry are appended.
    /// The style fields of the existing entry are kept. The result does not
    /// depend on the order records arrive in, up to alias order.
    pub fn append_charset_or_font(&mut self, font: Font, key: IdentityKey) {
        match self.fonts.iter_mut().find(|f| f.same_identity(&font, key)) {
            Some(existing) => existing.absorb(font),
            None => self.fonts.push(font),
        }
    }

    /// Keep only the fonts for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Font) -> bool) {
        self.fonts.retain(keep);
    }

    /// Names from `names` that match at least one installed font.
    ///
    /// Avoids emitting rules for families that are not installed.
    pub fn filter_name_list<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut installed = Vec::new();
        for name in names {
            let name: &str = name.as_ref();
            if !self.find_by_name(name).is_empty() {
                installed.push(name.to_string());
            }
        }
        installed
    }

    /// Pretty printed JSON cache form.
    pub fn encode(&self) -> Result<String, FontsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode the JSON cache form; duplicate records of one face are folded.
    pub fn decode(json: &str) -> Result<Collection, FontsError> {
        let fonts: Vec<Font> = serde_json::from_str(json)?;
        Ok(Collection::from_fonts(fonts))
    }

    /// Load the inventory cache, falling back to an empty collection.
    ///
    /// A missing, unreadable or corrupt cache only forces a full rescan.
    pub fn load_cache(path: &Path) -> Collection {
        if !path.exists() {
            log::info!("No font cache at {:?}, scanning all fonts", path);
            return Collection::new();
        }
        let decoded = fs::read_to_string(path)
            .map_err(|source| FontsError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|json| Collection::decode(&json));
        match decoded {
            Ok(collection) => {
                log::info!("Loaded {} cached fonts from {:?}", collection.len(), path);
                collection
            }
            Err(e) => {
                log::warn!("Discarding font cache {:?}: {}", path, e);
                Collection::new()
            }
        }
    }

    /// Write the inventory cache.
    pub fn save_cache(&self, path: &Path) -> Result<(), FontsError> {
        let io_err = |source| FontsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = self.encode()?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Font;
    type IntoIter = std::slice::Iter<'a, Font>;

    fn into_iter(self) -> Self::IntoIter {
        self.fonts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fonts_config_charset::Charset;

    fn font(path: &str, names: &[&str], charset: &str) -> Font {
        Font {
            name: names.iter().map(|s| s.to_string()).collect(),
            path: path.into(),
            charset: charset.parse().unwrap(),
            ..Font::default()
        }
    }

    #[test]
    fn test_same_path_collapses_with_union() {
        let mut c = Collection::new();
        c.append_charset_or_font(font("/f/a.ttc", &["A"], "20..7e"), IdentityKey::Path);
        c.append_charset_or_font(font("/f/a.ttc", &["A Bold"], "7f..ff"), IdentityKey::Path);
        assert_eq!(c.len(), 1);
        assert_eq!(c.fonts()[0].charset.to_string(), "20..ff");
        assert_eq!(c.fonts()[0].name, vec!["A", "A Bold"]);
        assert_eq!(c.find_by_name("A Bold").len(), 1);
    }

    #[test]
    fn test_from_fonts_keeps_each_face_of_a_collection_file() {
        let c = Collection::from_fonts([
            font("/f/cjk.ttc", &["Noto Sans CJK JP"], "20..7e"),
            font("/f/cjk.ttc", &["Noto Sans CJK SC"], "20..7e"),
            font("/f/cjk.ttc", &["Noto Sans CJK JP"], "3000"),
        ]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.fonts()[0].charset.to_string(), "20..7e 3000");
        assert_eq!(c.paths().collect::<Vec<_>>(), vec!["/f/cjk.ttc", "/f/cjk.ttc"]);
    }

    #[test]
    fn test_style_identity_merges_across_paths() {
        let mut c = Collection::new();
        c.append_charset_or_font(font("/f/a.ttf", &["A"], "41"), IdentityKey::Style);
        c.append_charset_or_font(font("/g/a.ttf", &["A"], "43"), IdentityKey::Style);
        c.append_charset_or_font(font("/g/b.ttf", &["B"], "43"), IdentityKey::Style);
        assert_eq!(c.len(), 2);
        assert_eq!(c.fonts()[0].charset.to_string(), "41 43");
    }

    #[test]
    fn test_find_by_name_substring_and_pattern() {
        let c = Collection::from_fonts([
            font("/f/NotoSans.ttf", &["Noto Sans"], ""),
            font("/f/NotoSerif.ttf", &["Noto Serif"], ""),
            font("/f/DejaVu.ttf", &["DejaVu Sans"], ""),
        ]);
        assert_eq!(c.find_by_name("Noto").len(), 2);
        assert_eq!(c.find_by_name("Sans").len(), 2);
        let re = Regex::new(r"^Noto S[a-z]+f$").unwrap();
        let found = c.find_by_name(re);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "/f/NotoSerif.ttf");
        assert!(c.find_by_name("Comic").is_empty());
    }

    #[test]
    fn test_find_by_path_matches_file_name_only() {
        let c = Collection::from_fonts([
            font("/usr/share/fonts/noto/NotoSans.ttf", &["Noto Sans"], ""),
            font("/usr/share/fonts/dejavu/DejaVu.ttf", &["DejaVu Sans"], ""),
        ]);
        assert_eq!(c.find_by_path("Noto").len(), 1);
        assert!(c.find_by_path("share").is_empty());
    }

    #[test]
    fn test_filter_name_list() {
        let c = Collection::from_fonts([font("/f/a.ttf", &["Noto Sans CJK SC"], "")]);
        let names = ["Noto Sans CJK SC", "Source Han Sans"];
        assert_eq!(c.filter_name_list(&names), vec!["Noto Sans CJK SC"]);
    }

    #[test]
    fn test_encode_uses_cache_key_names() {
        let c = Collection::from_fonts([font("/f/a.ttf", &["A"], "20..7e 1f600")]);
        let json = c.encode().unwrap();
        assert!(json.contains("\"Name\""));
        assert!(json.contains("\"Path\": \"/f/a.ttf\""));
        assert!(json.contains("\"20..7e\""));
        assert_eq!(Collection::decode(&json).unwrap(), c);
    }

    #[test]
    fn test_decode_fills_missing_fields() {
        let c = Collection::decode(r#"[{"Name":["A"],"Path":"/f/a.ttf"}]"#).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.fonts()[0].charset, Charset::new());
        assert!(Collection::decode("{not json").is_err());
    }
}
