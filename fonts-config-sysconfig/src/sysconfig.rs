//! Reading and rewriting sysconfig `KEY="value"` files.
//!
//! Files are layered: the system file is read over the defaults, the user
//! file over that, then command line flags are merged on top with
//! [`Options::merge`]. Rewriting keeps comments and layout of the existing
//! file and only replaces values.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::options::{OptionKey, OptionValue, Options};

/// Header used when no sysconfig file exists yet.
const TEMPLATE_HEADER: &str = "## Path:        System/Fonts\n\
## Description: Font configuration\n\
## Generated by fonts-config; edit values and rerun fonts-config.\n\n";

/// Split a sysconfig line into key and unquoted value.
///
/// Returns `None` for blank lines, comments and lines without `=`. Anything
/// after an unquoted `#` is an inline comment. Inside double quotes the shell
/// escapes `\"`, `\\`, `\$` and `` \` `` are undone.
fn split_assignment(line: &str) -> Option<(&str, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, rest) = line.split_once('=')?;
    let rest = rest.trim();
    let value = match rest.strip_prefix('"') {
        Some(quoted) => unquote(quoted),
        None => rest.split('#').next().unwrap_or_default().trim().to_string(),
    };
    Some((key.trim(), value))
}

/// Characters the shell interprets inside double quotes.
const SHELL_SPECIAL: [char; 4] = ['"', '\\', '$', '`'];

fn unquote(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some(next) if SHELL_SPECIAL.contains(&next) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            c => out.push(c),
        }
    }
    out
}

/// `KEY="value"` with the value escaped for a double quoted shell string.
fn assignment(key: OptionKey, value: &OptionValue) -> String {
    let mut out = format!("{}=\"", key.sysconfig_name());
    for c in value.to_string().chars() {
        if SHELL_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("\"\n");
    out
}

impl Options {
    /// Apply the assignments of a sysconfig text over `base`.
    ///
    /// Empty values keep the base value; unknown keys and values that do not
    /// fit the option's type are logged and ignored.
    pub fn parse_sysconfig(text: &str, base: Options) -> Options {
        let mut opts = base;
        for line in text.lines() {
            let Some((name, raw)) = split_assignment(line) else {
                continue;
            };
            let Some(key) = OptionKey::from_sysconfig_name(name) else {
                log::debug!("Ignoring unknown sysconfig variable {name}");
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            match OptionValue::parse(key.kind(), &raw) {
                Some(value) => {
                    if let Err(e) = opts.set(key, value) {
                        log::warn!("{e}");
                    }
                }
                None => log::warn!(
                    "{}",
                    ConfigError::InvalidValue {
                        key: name.to_string(),
                        value: raw,
                    }
                ),
            }
        }
        opts
    }

    /// Read a sysconfig file over `base`. A missing file leaves `base` as is.
    pub fn load_file(path: &Path, base: Options) -> Result<Options, ConfigError> {
        if !path.exists() {
            log::debug!("Sysconfig file {:?} not found, keeping defaults", path);
            return Ok(base);
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading options from {:?}", path);
        Ok(Self::parse_sysconfig(&text, base))
    }

    /// Rewrite the values of `template` with the current options.
    ///
    /// Comments, blank lines and unknown assignments are copied through.
    /// Options missing from the template are appended at the end.
    pub fn fill_template(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut written = Vec::new();
        for line in template.lines() {
            match split_assignment(line).and_then(|(name, _)| OptionKey::from_sysconfig_name(name))
            {
                Some(key) => {
                    out.push_str(&assignment(key, &self.get(key)));
                    written.push(key);
                }
                None => {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        for key in OptionKey::ALL {
            if !written.contains(&key) {
                out.push_str(&assignment(key, &self.get(key)));
            }
        }
        out
    }

    /// Write the options to `path`, preserving the layout of an existing file.
    pub fn write_file(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let template = if path.exists() {
            fs::read_to_string(path).map_err(io_err)?
        } else {
            TEMPLATE_HEADER.to_string()
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, self.fill_template(&template)).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;
        Ok(())
    }
}
