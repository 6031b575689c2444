//! File locations for system and user mode.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Whether the run configures the whole system or one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    System,
    User,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::System => write!(f, "system"),
            Mode::User => write!(f, "user"),
        }
    }
}

const SYSTEM_SYSCONFIG: &str = "/etc/sysconfig/fonts-config";
const SYSTEM_CACHE: &str = "/var/cache/fonts-config/fonts.json";
const SYSTEM_CONF_D: &str = "/etc/fonts/conf.d";

/// Every file a run reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub mode: Mode,
    /// Read first in both modes.
    pub system_sysconfig: PathBuf,
    /// Layered over the system file and rewritten with the merged options.
    pub sysconfig: PathBuf,
    pub cache: PathBuf,
    pub family_prefer: PathBuf,
    pub blacklist: PathBuf,
    pub noto_default: PathBuf,
    pub noto_prefer: PathBuf,
    pub dual_spacing: PathBuf,
    /// Not generated here; listed for `--info` and user setting removal.
    pub rendering_options: PathBuf,
}

impl Locations {
    pub fn for_mode(mode: Mode) -> Result<Locations> {
        match mode {
            Mode::System => Ok(Self::system()),
            Mode::User => {
                let config =
                    dirs::config_dir().context("Cannot determine the user config directory")?;
                let cache =
                    dirs::cache_dir().context("Cannot determine the user cache directory")?;
                Ok(Self::user(&config.join("fontconfig"), &cache.join("fonts-config")))
            }
        }
    }

    fn system() -> Locations {
        let conf_d = Path::new(SYSTEM_CONF_D);
        Locations {
            mode: Mode::System,
            system_sysconfig: PathBuf::from(SYSTEM_SYSCONFIG),
            sysconfig: PathBuf::from(SYSTEM_SYSCONFIG),
            cache: PathBuf::from(SYSTEM_CACHE),
            family_prefer: conf_d.join("58-family-prefer-local.conf"),
            blacklist: conf_d.join("81-emoji-blacklist-glyphs.conf"),
            noto_default: conf_d.join("49-family-default-noto.conf"),
            noto_prefer: conf_d.join("59-family-prefer-lang-specific-noto.conf"),
            dual_spacing: conf_d.join("20-fix-dual-spacing.conf"),
            rendering_options: conf_d.join("10-rendering-options.conf"),
        }
    }

    /// User mode locations below `fontconfig_dir` and `cache_dir`.
    pub fn user(fontconfig_dir: &Path, cache_dir: &Path) -> Locations {
        Locations {
            mode: Mode::User,
            system_sysconfig: PathBuf::from(SYSTEM_SYSCONFIG),
            sysconfig: fontconfig_dir.join("fonts-config"),
            cache: cache_dir.join("fonts.json"),
            family_prefer: fontconfig_dir.join("family-prefer.conf"),
            blacklist: fontconfig_dir.join("emoji-blacklist-glyphs.conf"),
            noto_default: fontconfig_dir.join("family-default-noto.conf"),
            noto_prefer: fontconfig_dir.join("family-prefer-lang-specific-noto.conf"),
            dual_spacing: fontconfig_dir.join("fix-dual-spacing.conf"),
            rendering_options: fontconfig_dir.join("rendering-options.conf"),
        }
    }

    /// Per-user files deleted by `--remove-user-setting`.
    pub fn user_files(&self) -> Vec<&Path> {
        vec![
            self.sysconfig.as_path(),
            self.rendering_options.as_path(),
            self.family_prefer.as_path(),
            self.blacklist.as_path(),
            self.noto_default.as_path(),
            self.noto_prefer.as_path(),
            self.dual_spacing.as_path(),
        ]
    }

    /// The `--info` listing.
    pub fn describe(&self) -> String {
        let mut out = String::from("Involved Files\n");
        let rows = [
            ("sysconfig file", &self.system_sysconfig),
            ("user sysconfig file", &self.sysconfig),
            ("font cache", &self.cache),
            ("family list", &self.family_prefer),
            ("emoji blacklist", &self.blacklist),
            ("noto default families", &self.noto_default),
            ("noto language preferences", &self.noto_prefer),
            ("dual spacing fix", &self.dual_spacing),
            ("rendering config", &self.rendering_options),
        ];
        for (label, path) in rows {
            if label == "user sysconfig file" && self.mode == Mode::System {
                continue;
            }
            out.push_str(&format!("  {}: {}\n", label, path.display()));
        }
        out
    }
}
