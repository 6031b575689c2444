//! fontconfig command line tools as the font source.
//!
//! `fc-list` reports the installed font files and `fc-scan` reports every
//! face of one file, one tab separated line per face.

use std::collections::HashSet;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use fonts_config_fonts::{FontRecord, FontSource};
use fonts_config_sysconfig::Verbosity;
use regex::Regex;

/// `fc-scan` output format: one line per face.
pub const SCAN_FORMAT: &str =
    "%{family}\t%{lang}\t%{width}\t%{weight}\t%{slant}\t%{spacing}\t%{outline}\t%{charset}\n";

const LIST_FORMAT: &str = "%{file}\n";

/// Font formats not used for display, and font directory index files.
static REJECTED_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\.pcf\.gz|\.pfa|\.pfb|\.afm|\.otb|\.dir)$|^fonts\.")
        .expect("Failed to compile rejected font file regex")
});

/// Whether `path` names a font worth scanning.
pub fn is_display_font(path: &str) -> bool {
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    !name.is_empty() && !REJECTED_FILE.is_match(&name)
}

/// Installed display fonts from `fc-list` output, deduplicated in order.
pub fn parse_list_output(output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    output
        .lines()
        .map(str::trim)
        .filter(|path| is_display_font(path) && seen.insert(*path))
        .map(str::to_string)
        .collect()
}

/// Parse `fc-scan` output in [`SCAN_FORMAT`]. Blank lines are skipped.
pub fn parse_scan_output(output: &str) -> Vec<FontRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_scan_line)
        .collect()
}

fn parse_scan_line(line: &str) -> FontRecord {
    let mut fields = line.split('\t');
    let mut next = || fields.next().unwrap_or("").trim();
    let aliases = split_escaped(next(), ',');
    let languages = split_escaped(next(), '|');
    let width = parse_int(next());
    let weight = parse_int(next());
    let slant = parse_int(next());
    let spacing = parse_int(next());
    let outline = next().eq_ignore_ascii_case("true");
    let raw_charset = next().to_string();
    FontRecord {
        aliases,
        languages,
        width,
        weight,
        slant,
        spacing,
        outline,
        raw_charset,
    }
}

/// fontconfig prints integers for style values but doubles are legal.
fn parse_int(value: &str) -> i32 {
    value
        .parse::<i32>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|v| v as i32))
        .unwrap_or(0)
}

/// Split a fontconfig list value on `sep`, honouring backslash escapes.
fn split_escaped(value: &str, sep: char) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => current.extend(chars.next()),
            c if c == sep => items.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    items.push(current);
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn run(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run {}", program))?;
    if !output.status.success() {
        bail!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// [`FontSource`] backed by `fc-list` and `fc-scan`.
#[derive(Debug, Clone, Default)]
pub struct FcTool;

impl FontSource for FcTool {
    fn installed_paths(&self) -> Result<Vec<String>> {
        let output = run("fc-list", &["--format", LIST_FORMAT])?;
        Ok(parse_list_output(&output))
    }

    fn scan(&self, path: &str) -> Result<Vec<FontRecord>> {
        let output = run("fc-scan", &["--format", SCAN_FORMAT, path])?;
        Ok(parse_scan_output(&output))
    }
}

/// Regenerate the fontconfig caches.
pub fn run_fc_cache(verbosity: Verbosity) -> Result<()> {
    log::info!("Creating fontconfig cache files");
    let args: &[&str] = if verbosity >= Verbosity::Verbose {
        &["--verbose"]
    } else {
        &[]
    };
    let output = run("fc-cache", args)?;
    if verbosity.is_debug() {
        for line in output.lines() {
            log::debug!("fc-cache: {}", line);
        }
    }
    Ok(())
}
