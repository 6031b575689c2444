//! Command-line interface for fonts-config.
//!
//! Flags mirror the sysconfig variables. Only flags that were actually passed
//! override the values read from the sysconfig files.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use fonts_config_sysconfig::{OptionKey, Options, Verbosity};

use crate::paths::Mode;

/// fonts-config - fontconfig presets generator
#[derive(Parser, Debug, Default)]
#[command(name = "fonts-config")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("verbosity").args(["quiet", "verbose", "debug"])))]
pub struct Cli {
    /// Run fontconfig setup for the current user
    #[arg(short, long)]
    pub user: bool,

    /// Remove the current user's fontconfig setup and exit
    #[arg(short, long)]
    pub remove_user_setting: bool,

    /// Ignore the font cache and rescan every installed font
    #[arg(short, long)]
    pub force: bool,

    /// Work silently, unless an error occurs
    #[arg(short, long)]
    pub quiet: bool,

    /// Print progress messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a lot of debugging messages
    #[arg(short, long)]
    pub debug: bool,

    /// Hintstyle to enforce globally: hintfull, hintmedium, hintslight or hintnone
    #[arg(long, value_name = "STYLE")]
    pub force_hintstyle: Option<String>,

    /// Use autohint even for well hinted fonts
    #[arg(long)]
    pub autohint: bool,

    /// Do not use antialiasing
    #[arg(long)]
    pub force_bw: bool,

    /// Do not use antialiasing for well instructed monospace fonts
    #[arg(long)]
    pub force_bw_monospace: bool,

    /// LCD filter: lcdnone, lcddefault, lcdlight or lcdlegacy
    #[arg(long, value_name = "FILTER")]
    pub lcdfilter: Option<String>,

    /// Subpixel arrangement: none, rgb, vrgb, bgr, vbgr or unknown
    #[arg(long, value_name = "ORDER")]
    pub rgba: Option<String>,

    /// Use embedded bitmaps
    #[arg(long)]
    pub ebitmaps: bool,

    /// Colon separated languages to use embedded bitmaps for, e.g. "ja:ko:zh-CN"
    #[arg(long, value_name = "LANGS")]
    pub ebitmapslang: Option<String>,

    /// Preferred sans-serif families, colon separated, e.g. "Noto Sans SC:Noto Sans JP"
    #[arg(long, value_name = "LIST")]
    pub sans_serif: Option<String>,

    /// Preferred serif families, colon separated
    #[arg(long, value_name = "LIST")]
    pub serif: Option<String>,

    /// Preferred monospace families, colon separated
    #[arg(long, value_name = "LIST")]
    pub monospace: Option<String>,

    /// Use metric compatible fonts
    #[arg(long)]
    pub metriccompatible: bool,

    /// Bind the preferred families strongly
    #[arg(long = "forceFPL")]
    pub force_fpl: bool,

    /// Generate TTCap entries
    #[arg(long)]
    pub ttcap: bool,

    /// Generate font setup for Java
    #[arg(long)]
    pub java: bool,

    /// Use this inventory cache instead of the default location
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Do not run fc-cache after a system setup
    #[arg(long)]
    pub no_fc_cache: bool,

    /// Print the files used by fonts-config and exit
    #[arg(long)]
    pub info: bool,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.user { Mode::User } else { Mode::System }
    }

    /// The verbosity flag, if one was given.
    pub fn verbosity(&self) -> Option<Verbosity> {
        if self.debug {
            Some(Verbosity::Debug)
        } else if self.verbose {
            Some(Verbosity::Verbose)
        } else if self.quiet {
            Some(Verbosity::Quiet)
        } else {
            None
        }
    }

    /// Options set on the command line and the keys they touch.
    pub fn overrides(&self) -> (Options, Vec<OptionKey>) {
        let mut opts = Options::default();
        let mut touched = Vec::new();

        if let Some(verbosity) = self.verbosity() {
            opts.verbosity = verbosity;
            touched.push(OptionKey::Verbosity);
        }

        let texts = [
            (
                &self.force_hintstyle,
                &mut opts.force_hintstyle,
                OptionKey::ForceHintstyle,
            ),
            (&self.lcdfilter, &mut opts.use_lcdfilter, OptionKey::UseLcdfilter),
            (&self.rgba, &mut opts.use_rgba, OptionKey::UseRgba),
            (
                &self.ebitmapslang,
                &mut opts.embedded_bitmaps_languages,
                OptionKey::EmbeddedBitmapsLanguages,
            ),
            (
                &self.sans_serif,
                &mut opts.prefer_sans_families,
                OptionKey::PreferSansFamilies,
            ),
            (
                &self.serif,
                &mut opts.prefer_serif_families,
                OptionKey::PreferSerifFamilies,
            ),
            (
                &self.monospace,
                &mut opts.prefer_mono_families,
                OptionKey::PreferMonoFamilies,
            ),
        ];
        for (flag, field, key) in texts {
            if let Some(value) = flag {
                *field = value.clone();
                touched.push(key);
            }
        }

        let flags = [
            (self.autohint, &mut opts.force_autohint, OptionKey::ForceAutohint),
            (self.force_bw, &mut opts.force_bw, OptionKey::ForceBw),
            (
                self.force_bw_monospace,
                &mut opts.force_bw_monospace,
                OptionKey::ForceBwMonospace,
            ),
            (
                self.ebitmaps,
                &mut opts.use_embedded_bitmaps,
                OptionKey::UseEmbeddedBitmaps,
            ),
            (
                self.metriccompatible,
                &mut opts.search_metric_compatible,
                OptionKey::SearchMetricCompatible,
            ),
            (
                self.force_fpl,
                &mut opts.force_family_preference_lists,
                OptionKey::ForceFamilyPreferenceLists,
            ),
            (
                self.ttcap,
                &mut opts.generate_ttcap_entries,
                OptionKey::GenerateTtcapEntries,
            ),
            (
                self.java,
                &mut opts.generate_java_font_setup,
                OptionKey::GenerateJavaFontSetup,
            ),
        ];
        for (set, field, key) in flags {
            if set {
                *field = true;
                touched.push(key);
            }
        }

        (opts, touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_flags_do_not_override() {
        let cli = Cli::parse_from(["fonts-config", "--user"]);
        let (_, touched) = cli.overrides();
        assert!(touched.is_empty());
        assert_eq!(cli.mode(), Mode::User);
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::parse_from([
            "fonts-config",
            "-d",
            "--sans-serif",
            "Noto Sans:DejaVu Sans",
            "--forceFPL",
            "--rgba",
            "rgb",
        ]);
        let (opts, touched) = cli.overrides();
        assert_eq!(opts.verbosity, Verbosity::Debug);
        assert_eq!(opts.prefer_sans_families, "Noto Sans:DejaVu Sans");
        assert!(opts.force_family_preference_lists);
        assert_eq!(opts.use_rgba, "rgb");
        assert_eq!(
            touched,
            vec![
                OptionKey::Verbosity,
                OptionKey::UseRgba,
                OptionKey::PreferSansFamilies,
                OptionKey::ForceFamilyPreferenceLists,
            ]
        );
    }

    #[test]
    fn test_verbosity_flags_conflict() {
        assert!(Cli::try_parse_from(["fonts-config", "-q", "-d"]).is_err());
    }
}
