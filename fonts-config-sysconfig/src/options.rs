//! The typed option set and its enum-keyed accessor table.

use std::fmt;

use crate::error::ConfigError;
use crate::verbosity::Verbosity;

/// Options controlling the generated fontconfig files.
///
/// Every field maps to one sysconfig variable through [`OptionKey`]. Options
/// that only concern rendering presets fonts-config no longer generates are
/// still carried so that rewriting a sysconfig file never loses a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub verbosity: Verbosity,
    pub force_hintstyle: String,
    pub force_autohint: bool,
    pub force_bw: bool,
    pub force_bw_monospace: bool,
    pub use_lcdfilter: String,
    pub use_rgba: String,
    pub use_embedded_bitmaps: bool,
    pub embedded_bitmaps_languages: String,
    /// Colon separated preferred sans-serif families.
    pub prefer_sans_families: String,
    /// Colon separated preferred serif families.
    pub prefer_serif_families: String,
    /// Colon separated preferred monospace families.
    pub prefer_mono_families: String,
    pub search_metric_compatible: bool,
    /// Bind preferred families strongly instead of as a weak alias.
    pub force_family_preference_lists: bool,
    pub generate_ttcap_entries: bool,
    pub generate_java_font_setup: bool,
}

/// Value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Int,
    Text,
}

/// A dynamically typed option value, as read from or written to sysconfig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl OptionValue {
    /// Parse a raw sysconfig value for an option of the given kind.
    ///
    /// Booleans follow sysconfig convention: anything starting with `y` is
    /// true, everything else false.
    pub fn parse(kind: OptionKind, raw: &str) -> Option<OptionValue> {
        match kind {
            OptionKind::Bool => Some(OptionValue::Bool(
                raw.trim().to_ascii_lowercase().starts_with('y'),
            )),
            OptionKind::Int => raw.trim().parse().ok().map(OptionValue::Int),
            OptionKind::Text => Some(OptionValue::Text(raw.to_string())),
        }
    }
}

/// Sysconfig formatting: booleans as `yes`/`no`.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(true) => f.write_str("yes"),
            OptionValue::Bool(false) => f.write_str("no"),
            OptionValue::Int(i) => write!(f, "{i}"),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

/// Names every option. Replaces lookups of struct fields by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Verbosity,
    ForceHintstyle,
    ForceAutohint,
    ForceBw,
    ForceBwMonospace,
    UseLcdfilter,
    UseRgba,
    UseEmbeddedBitmaps,
    EmbeddedBitmapsLanguages,
    PreferSansFamilies,
    PreferSerifFamilies,
    PreferMonoFamilies,
    SearchMetricCompatible,
    ForceFamilyPreferenceLists,
    GenerateTtcapEntries,
    GenerateJavaFontSetup,
}

impl OptionKey {
    /// All keys in sysconfig file order.
    pub const ALL: [OptionKey; 16] = [
        OptionKey::Verbosity,
        OptionKey::ForceHintstyle,
        OptionKey::ForceAutohint,
        OptionKey::ForceBw,
        OptionKey::ForceBwMonospace,
        OptionKey::UseLcdfilter,
        OptionKey::UseRgba,
        OptionKey::UseEmbeddedBitmaps,
        OptionKey::EmbeddedBitmapsLanguages,
        OptionKey::PreferSansFamilies,
        OptionKey::PreferSerifFamilies,
        OptionKey::PreferMonoFamilies,
        OptionKey::SearchMetricCompatible,
        OptionKey::ForceFamilyPreferenceLists,
        OptionKey::GenerateTtcapEntries,
        OptionKey::GenerateJavaFontSetup,
    ];

    /// The sysconfig variable name, e.g. `PREFER_SANS_FAMILIES`.
    pub fn sysconfig_name(self) -> &'static str {
        match self {
            OptionKey::Verbosity => "VERBOSITY",
            OptionKey::ForceHintstyle => "FORCE_HINTSTYLE",
            OptionKey::ForceAutohint => "FORCE_AUTOHINT",
            OptionKey::ForceBw => "FORCE_BW",
            OptionKey::ForceBwMonospace => "FORCE_BW_MONOSPACE",
            OptionKey::UseLcdfilter => "USE_LCDFILTER",
            OptionKey::UseRgba => "USE_RGBA",
            OptionKey::UseEmbeddedBitmaps => "USE_EMBEDDED_BITMAPS",
            OptionKey::EmbeddedBitmapsLanguages => "EMBEDDED_BITMAPS_LANGUAGES",
            OptionKey::PreferSansFamilies => "PREFER_SANS_FAMILIES",
            OptionKey::PreferSerifFamilies => "PREFER_SERIF_FAMILIES",
            OptionKey::PreferMonoFamilies => "PREFER_MONO_FAMILIES",
            OptionKey::SearchMetricCompatible => "SEARCH_METRIC_COMPATIBLE",
            OptionKey::ForceFamilyPreferenceLists => "FORCE_FAMILY_PREFERENCE_LISTS",
            OptionKey::GenerateTtcapEntries => "GENERATE_TTCAP_ENTRIES",
            OptionKey::GenerateJavaFontSetup => "GENERATE_JAVA_FONT_SETUP",
        }
    }

    pub fn from_sysconfig_name(name: &str) -> Option<OptionKey> {
        OptionKey::ALL
            .into_iter()
            .find(|key| key.sysconfig_name() == name.trim())
    }

    pub fn kind(self) -> OptionKind {
        match self {
            OptionKey::Verbosity => OptionKind::Int,
            OptionKey::ForceHintstyle
            | OptionKey::UseLcdfilter
            | OptionKey::UseRgba
            | OptionKey::EmbeddedBitmapsLanguages
            | OptionKey::PreferSansFamilies
            | OptionKey::PreferSerifFamilies
            | OptionKey::PreferMonoFamilies => OptionKind::Text,
            _ => OptionKind::Bool,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one option.
    pub fn get(&self, key: OptionKey) -> OptionValue {
        match key {
            OptionKey::Verbosity => OptionValue::Int(self.verbosity.as_sysconfig()),
            OptionKey::ForceHintstyle => OptionValue::Text(self.force_hintstyle.clone()),
            OptionKey::ForceAutohint => OptionValue::Bool(self.force_autohint),
            OptionKey::ForceBw => OptionValue::Bool(self.force_bw),
            OptionKey::ForceBwMonospace => OptionValue::Bool(self.force_bw_monospace),
            OptionKey::UseLcdfilter => OptionValue::Text(self.use_lcdfilter.clone()),
            OptionKey::UseRgba => OptionValue::Text(self.use_rgba.clone()),
            OptionKey::UseEmbeddedBitmaps => OptionValue::Bool(self.use_embedded_bitmaps),
            OptionKey::EmbeddedBitmapsLanguages => {
                OptionValue::Text(self.embedded_bitmaps_languages.clone())
            }
            OptionKey::PreferSansFamilies => OptionValue::Text(self.prefer_sans_families.clone()),
            OptionKey::PreferSerifFamilies => {
                OptionValue::Text(self.prefer_serif_families.clone())
            }
            OptionKey::PreferMonoFamilies => OptionValue::Text(self.prefer_mono_families.clone()),
            OptionKey::SearchMetricCompatible => OptionValue::Bool(self.search_metric_compatible),
            OptionKey::ForceFamilyPreferenceLists => {
                OptionValue::Bool(self.force_family_preference_lists)
            }
            OptionKey::GenerateTtcapEntries => OptionValue::Bool(self.generate_ttcap_entries),
            OptionKey::GenerateJavaFontSetup => OptionValue::Bool(self.generate_java_font_setup),
        }
    }

    /// Write one option, rejecting a value of the wrong kind.
    pub fn set(&mut self, key: OptionKey, value: OptionValue) -> Result<(), ConfigError> {
        match (key, value) {
            (OptionKey::Verbosity, OptionValue::Int(v)) => {
                self.verbosity = Verbosity::from_sysconfig(v)
            }
            (OptionKey::ForceHintstyle, OptionValue::Text(v)) => self.force_hintstyle = v,
            (OptionKey::ForceAutohint, OptionValue::Bool(v)) => self.force_autohint = v,
            (OptionKey::ForceBw, OptionValue::Bool(v)) => self.force_bw = v,
            (OptionKey::ForceBwMonospace, OptionValue::Bool(v)) => self.force_bw_monospace = v,
            (OptionKey::UseLcdfilter, OptionValue::Text(v)) => self.use_lcdfilter = v,
            (OptionKey::UseRgba, OptionValue::Text(v)) => self.use_rgba = v,
            (OptionKey::UseEmbeddedBitmaps, OptionValue::Bool(v)) => {
                self.use_embedded_bitmaps = v
            }
            (OptionKey::EmbeddedBitmapsLanguages, OptionValue::Text(v)) => {
                self.embedded_bitmaps_languages = v
            }
            (OptionKey::PreferSansFamilies, OptionValue::Text(v)) => {
                self.prefer_sans_families = v
            }
            (OptionKey::PreferSerifFamilies, OptionValue::Text(v)) => {
                self.prefer_serif_families = v
            }
            (OptionKey::PreferMonoFamilies, OptionValue::Text(v)) => {
                self.prefer_mono_families = v
            }
            (OptionKey::SearchMetricCompatible, OptionValue::Bool(v)) => {
                self.search_metric_compatible = v
            }
            (OptionKey::ForceFamilyPreferenceLists, OptionValue::Bool(v)) => {
                self.force_family_preference_lists = v
            }
            (OptionKey::GenerateTtcapEntries, OptionValue::Bool(v)) => {
                self.generate_ttcap_entries = v
            }
            (OptionKey::GenerateJavaFontSetup, OptionValue::Bool(v)) => {
                self.generate_java_font_setup = v
            }
            (key, value) => {
                return Err(ConfigError::InvalidValue {
                    key: key.sysconfig_name().to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Copy the options named in `touched` from `overrides`.
    ///
    /// Used to layer command line flags over the sysconfig files: only the
    /// flags the user actually passed win.
    pub fn merge(&mut self, overrides: &Options, touched: &[OptionKey]) {
        for &key in touched {
            let value = overrides.get(key);
            if self.get(key) != value {
                log::debug!("Option {} overridden with '{}'", key.sysconfig_name(), value);
                // Same key on both sides, so the kinds always agree.
                let _ = self.set(key, value);
            }
        }
    }

    /// `KEY=value` lines for every option, for debug output.
    pub fn describe(&self) -> String {
        OptionKey::ALL
            .iter()
            .map(|&key| format!("{}={}\n", key.sysconfig_name(), self.get(key)))
            .collect()
    }
}
