//! Default families and language specific preferences for Noto fonts.

use std::collections::{BTreeMap, HashSet};

use fonts_config_fonts::{Collection, EMOJI_LANG, Font};

use super::{SUFFIX, escape, preamble};
use crate::paths::Mode;

/// Noto families covering many scripts; they carry no language preference.
const NON_LANG_FAMILIES: &[&str] = &[
    "Noto Sans",
    "Noto Sans Disp",
    "Noto Sans Display",
    "Noto Sans Mono",
    "Noto Sans Symbols",
    "Noto Sans Symbols2",
    "Noto Serif",
    "Noto Serif Disp",
    "Noto Serif Display",
    "Noto Mono",
];

/// The generic family a font name falls back to.
pub fn generic_family(name: &str) -> &'static str {
    if name.contains(" Symbols") {
        "symbol"
    } else if name.contains(" Mono") || name.contains(" HW") {
        "monospace"
    } else if name.ends_with("Emoji") {
        "emoji"
    } else if name.contains(" Serif") {
        "serif"
    } else {
        "sans-serif"
    }
}

/// CJK languages get their preferences from the distribution's CJK setup.
fn is_cjk_lang(lang: &str) -> bool {
    lang.starts_with("zh-") || lang.starts_with("ja") || lang.starts_with("ko")
}

/// Noto fonts by file name, ordered by path then name so output is stable.
fn noto_fonts(collection: &Collection) -> Vec<&Font> {
    let mut fonts = collection.find_by_path("Noto");
    fonts.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.name.cmp(&b.name)));
    fonts
}

/// Give every installed Noto family a default generic family.
///
/// Returns `None` when no Noto font is installed.
pub fn render_default_families(collection: &Collection, mode: Mode) -> Option<String> {
    let mut seen = HashSet::new();
    let mut body = String::new();
    for font in noto_fonts(collection) {
        for name in &font.name {
            if !seen.insert(name.as_str()) {
                continue;
            }
            body.push_str(&format!(
                "\t<alias>\n\t\t<family>{}</family>\n\t\t<default>\n\t\t\t<family>{}</family>\n\t\t</default>\n\t</alias>\n\n",
                escape(name),
                generic_family(name)
            ));
        }
    }
    if body.is_empty() {
        return None;
    }
    let mut out = preamble(mode);
    out.push_str("\t<!-- Default families for Noto fonts installed on your system. -->\n");
    out.push_str(&body);
    out.push_str(SUFFIX);
    Some(out)
}

/// Preferred Noto families of one language, per generic family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangPreference {
    pub sans: Vec<String>,
    pub serif: Vec<String>,
    pub monospace: Vec<String>,
}

impl LangPreference {
    fn add(&mut self, family: &str) {
        let list = match generic_family(family) {
            "sans-serif" => &mut self.sans,
            "serif" => &mut self.serif,
            "monospace" => &mut self.monospace,
            _ => return,
        };
        if !list.iter().any(|f| f == family) {
            list.push(family.to_string());
        }
    }

    fn lists(&self) -> [(&'static str, &[String]); 3] {
        [
            ("sans-serif", self.sans.as_slice()),
            ("serif", self.serif.as_slice()),
            ("monospace", self.monospace.as_slice()),
        ]
    }
}

/// Language specific Noto preferences, keyed by language tag.
///
/// Multi-script families and emoji are skipped, and so are CJK languages.
pub fn lang_preferences(collection: &Collection) -> BTreeMap<String, LangPreference> {
    let mut prefs: BTreeMap<String, LangPreference> = BTreeMap::new();
    for font in noto_fonts(collection) {
        if font.name.iter().any(|n| NON_LANG_FAMILIES.contains(&n.as_str())) {
            continue;
        }
        let families = font.unstyled_name();
        for lang in &font.lang {
            if lang == EMOJI_LANG || is_cjk_lang(lang) {
                continue;
            }
            let pref = prefs.entry(lang.clone()).or_default();
            for family in &families {
                pref.add(family);
            }
        }
    }
    prefs
}

/// Prepend the language's Noto families to each generic family.
///
/// Returns `None` when no language has a preference.
pub fn render_lang_preferences(collection: &Collection, mode: Mode) -> Option<String> {
    let mut body = String::new();
    for (lang, pref) in lang_preferences(collection) {
        for (generic, families) in pref.lists() {
            if families.is_empty() {
                continue;
            }
            body.push_str(&format!(
                "\t<match>\n\t\t<test name=\"family\">\n\t\t\t<string>{}</string>\n\t\t</test>\n",
                generic
            ));
            body.push_str(&format!(
                "\t\t<test name=\"lang\">\n\t\t\t<string>{}</string>\n\t\t</test>\n",
                escape(&lang)
            ));
            body.push_str("\t\t<edit name=\"family\" mode=\"prepend\">\n");
            for family in families {
                body.push_str(&format!("\t\t\t<string>{}</string>\n", escape(family)));
            }
            body.push_str("\t\t</edit>\n\t</match>\n\n");
        }
    }
    if body.is_empty() {
        return None;
    }
    let mut out = preamble(mode);
    out.push_str("\t<!-- Language specific family preference list for Noto fonts. -->\n");
    out.push_str(&body);
    out.push_str(SUFFIX);
    Some(out)
}
