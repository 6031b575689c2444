//! Incremental font inventory.
//!
//! The cache from the previous run is diffed against the installed font
//! files: entries for removed files are pruned and only files the cache has
//! never seen are scanned. Each face of a scanned file becomes its own entry.

use std::collections::HashSet;

use fonts_config_sysconfig::Verbosity;

use crate::collection::Collection;
use crate::font::{Font, FontRecord, IdentityKey};
use crate::pool::ScanPool;

/// Where installed fonts and their metadata come from.
///
/// Implemented on top of the fontconfig command line tools by the binary
/// and by in-memory fakes in tests. Called concurrently from scan workers.
pub trait FontSource: Sync {
    /// Paths of every installed font file.
    fn installed_paths(&self) -> anyhow::Result<Vec<String>>;

    /// Every face contained in the file at `path`.
    fn scan(&self, path: &str) -> anyhow::Result<Vec<FontRecord>>;
}

/// Outcome of [`Inventory::load`].
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// The up to date inventory.
    pub collection: Collection,
    /// Paths that were scanned this run.
    pub scanned: Vec<String>,
    /// Cached paths dropped because the file is gone.
    pub pruned: Vec<String>,
    /// Paths that could not be scanned and were recorded with no coverage.
    pub failed: Vec<String>,
}

/// Result of scanning one path, produced inside a worker.
enum ScanOutcome {
    Scanned(Vec<Font>),
    Failed { path: String, reason: String },
}

/// Scan accumulator, only ever touched through the pool's merge step.
struct Delta {
    collection: Collection,
    failed: Vec<String>,
}

/// Incremental loader over a [`FontSource`].
pub struct Inventory<'a, S: FontSource + ?Sized> {
    source: &'a S,
    pool: ScanPool,
    verbosity: Verbosity,
}

impl<'a, S: FontSource + ?Sized> Inventory<'a, S> {
    pub fn new(source: &'a S, pool: ScanPool, verbosity: Verbosity) -> Self {
        Self {
            source,
            pool,
            verbosity,
        }
    }

    /// Bring `cached` up to date with the installed fonts.
    ///
    /// If the installed font list cannot be obtained the cache is returned
    /// unchanged.
    pub fn load(&self, mut cached: Collection) -> LoadReport {
        let installed = match self.source.installed_paths() {
            Ok(paths) => paths,
            Err(e) => {
                log::warn!("Failed to list installed fonts, using cache as is: {:#}", e);
                return LoadReport {
                    collection: cached,
                    ..LoadReport::default()
                };
            }
        };

        let installed_set: HashSet<&str> = installed.iter().map(String::as_str).collect();
        let mut pruned = Vec::new();
        cached.retain(|font| {
            let keep = installed_set.contains(font.path.as_str());
            if !keep {
                pruned.push(font.path.clone());
            }
            keep
        });
        for path in &pruned {
            log::debug!("Font removed: {}", path);
        }

        let known: HashSet<&str> = cached.paths().collect();
        let mut queued = HashSet::new();
        let pending: Vec<String> = installed
            .iter()
            .filter(|path| !known.contains(path.as_str()) && queued.insert(path.as_str()))
            .cloned()
            .collect();

        log::info!(
            "{} fonts installed, {} cached, {} to scan, {} removed",
            installed_set.len(),
            cached.len(),
            pending.len(),
            pruned.len()
        );

        let debug = self.verbosity.is_debug();
        let delta = self.pool.run(
            pending.clone(),
            Delta {
                collection: cached,
                failed: Vec::new(),
            },
            |path| self.scan_one(path),
            |delta: &mut Delta, outcome| match outcome {
                ScanOutcome::Scanned(fonts) => {
                    for font in fonts {
                        if debug {
                            log::debug!(
                                "Scanned {} [{}]: {}",
                                font.path,
                                font.family(),
                                font.charset
                            );
                        }
                        delta.collection.append_charset_or_font(font, IdentityKey::Face);
                    }
                }
                ScanOutcome::Failed { path, reason } => {
                    log::warn!("Cannot scan {}: {}", path, reason);
                    delta
                        .collection
                        .append_charset_or_font(Font::unreadable(&path), IdentityKey::Face);
                    delta.failed.push(path);
                }
            },
        );

        LoadReport {
            collection: delta.collection,
            scanned: pending,
            pruned,
            failed: delta.failed,
        }
    }

    fn scan_one(&self, path: String) -> ScanOutcome {
        match self.source.scan(&path) {
            Ok(records) if records.is_empty() => ScanOutcome::Failed {
                path,
                reason: "no font faces found".to_string(),
            },
            Ok(records) => ScanOutcome::Scanned(
                records
                    .into_iter()
                    .map(|record| Font::from_record(&path, record))
                    .collect(),
            ),
            Err(e) => ScanOutcome::Failed {
                path,
                reason: format!("{:#}", e),
            },
        }
    }
}
