//! One fonts-config run, from option resolution to the written files.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use fonts_config_fonts::{
    BlacklistConfig, Collection, FontSource, Inventory, ScanPool, build_blacklist,
};
use fonts_config_sysconfig::{OptionKey, Options};

use crate::cli::Cli;
use crate::fc::{self, FcTool};
use crate::paths::{Locations, Mode};
use crate::{debug, render};

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fonts: usize,
    pub scanned: usize,
    pub pruned: usize,
    pub failed: usize,
    /// Families with a blacklist rule.
    pub blacklisted: usize,
}

/// Layer the system sysconfig, the user sysconfig (user mode) and the
/// command line, then write the result back to the mode's sysconfig file.
pub fn resolve_options(
    locations: &Locations,
    overrides: &Options,
    touched: &[OptionKey],
) -> Result<Options> {
    let mut options = Options::load_file(&locations.system_sysconfig, Options::default())
        .context("Failed to read the system sysconfig file")?;
    log::debug!("System configuration:\n{}", options.describe());

    if locations.mode == Mode::User {
        options = Options::load_file(&locations.sysconfig, options)
            .context("Failed to read the user sysconfig file")?;
        log::debug!("With user configuration:\n{}", options.describe());
    }

    options.merge(overrides, touched);
    log::debug!("With command line configuration:\n{}", options.describe());

    options
        .write_file(&locations.sysconfig)
        .context("Failed to write the sysconfig file")?;
    Ok(options)
}

/// Generates the configuration files from the installed fonts.
pub struct Runner<'a, S: FontSource + ?Sized> {
    locations: &'a Locations,
    source: &'a S,
    pool: ScanPool,
    blacklist: BlacklistConfig,
}

impl<'a, S: FontSource + ?Sized> Runner<'a, S> {
    pub fn new(locations: &'a Locations, source: &'a S) -> Self {
        Self {
            locations,
            source,
            pool: ScanPool::default(),
            blacklist: BlacklistConfig::default(),
        }
    }

    pub fn with_pool(mut self, pool: ScanPool) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_blacklist_config(mut self, config: BlacklistConfig) -> Self {
        self.blacklist = config;
        self
    }

    /// Update the inventory, write the generated files and save the cache.
    ///
    /// With `force_rescan` the cache is ignored and every font is scanned.
    pub fn run(&self, options: &Options, force_rescan: bool) -> Result<RunSummary> {
        let locations = self.locations;
        let mode = locations.mode;

        let cached = if force_rescan {
            log::info!("Ignoring font cache, rescanning all fonts");
            Collection::new()
        } else {
            Collection::load_cache(&locations.cache)
        };
        let report =
            Inventory::new(self.source, self.pool.clone(), options.verbosity).load(cached);
        let collection = report.collection;

        let fpl = render::fpl::render(options, &collection, mode);
        write_file(&locations.family_prefer, &fpl)?;

        let entries = build_blacklist(
            &collection,
            &self.blacklist,
            &self.pool,
            options.verbosity,
        );
        if entries.is_empty() {
            log::info!("No glyphs to blacklist");
        }
        write_or_remove(
            &locations.blacklist,
            render::blacklist::render(&entries, mode),
        )?;

        write_or_remove(
            &locations.noto_default,
            render::noto::render_default_families(&collection, mode),
        )?;
        write_or_remove(
            &locations.noto_prefer,
            render::noto::render_lang_preferences(&collection, mode),
        )?;
        write_or_remove(
            &locations.dual_spacing,
            render::dual::render(&collection, mode),
        )?;

        collection
            .save_cache(&locations.cache)
            .context("Failed to save the font cache")?;

        Ok(RunSummary {
            fonts: collection.len(),
            scanned: report.scanned.len(),
            pruned: report.pruned.len(),
            failed: report.failed.len(),
            blacklisted: entries.len(),
        })
    }
}

/// Write `contents` to `path`, creating parent directories.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    log::debug!("Writing {:?}", path);

    // Atomic save: write to temp file then rename to prevent corruption on crash
    let temp_path = path.with_extension("conf.tmp");
    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write {:?}", temp_path))?;
    fs::rename(&temp_path, path).with_context(|| format!("Failed to replace {:?}", path))?;
    Ok(())
}

/// Write the generated file, or remove a stale one when there is nothing
/// to configure.
fn write_or_remove(path: &Path, contents: Option<String>) -> Result<()> {
    match contents {
        Some(xml) => write_file(path, &xml),
        None => remove_file(path),
    }
}

/// Remove `path`; a file that is already gone is fine.
fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("Removed {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
    }
}

/// Delete the per-user configuration files.
pub fn remove_user_setting(locations: &Locations) -> Result<()> {
    for path in locations.user_files() {
        remove_file(path)?;
    }
    Ok(())
}

/// Entry point used by `main`.
pub fn run(cli: &Cli) -> Result<()> {
    let mode = cli.mode();
    let mut locations = Locations::for_mode(mode)?;
    if let Some(cache) = &cli.cache {
        locations.cache = cache.clone();
    }

    if cli.info {
        print!("{}", locations.describe());
        return Ok(());
    }

    if cli.remove_user_setting {
        // Only per-user files can be removed; the system setup is left alone.
        let user = match mode {
            Mode::User => locations,
            Mode::System => Locations::for_mode(Mode::User)?,
        };
        return remove_user_setting(&user);
    }

    log::info!("Running in {} mode", mode);
    let (overrides, touched) = cli.overrides();
    let options = resolve_options(&locations, &overrides, &touched)?;
    debug::set_verbosity(options.verbosity);

    let summary = Runner::new(&locations, &FcTool).run(&options, cli.force)?;
    log::info!(
        "{} fonts ({} scanned, {} removed, {} unreadable), {} families blacklisted",
        summary.fonts,
        summary.scanned,
        summary.pruned,
        summary.failed,
        summary.blacklisted
    );

    if mode == Mode::System && !cli.no_fc_cache {
        fc::run_fc_cache(options.verbosity)?;
    }
    Ok(())
}
