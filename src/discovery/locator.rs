use super::{BackendId, SourcePattern};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::fmt;
use ohno::IntoAppError;
use std::fs;
use std::io;

const LOG_TARGET: &str = " discovery";

/// One metric file and the backend it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSource {
    pub backend: BackendId,
    pub path: Utf8PathBuf,
}

/// Why discovery found nothing to report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoDataReason {
    DirectoryMissing(Utf8PathBuf),
    NoMatchingFiles(Utf8PathBuf),
}

impl fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryMissing(dir) => write!(f, "result directory '{dir}' does not exist or is not a directory"),
            Self::NoMatchingFiles(dir) => write!(f, "no metric files found in '{dir}'"),
        }
    }
}

/// Outcome of scanning a result directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Found {
        /// Metric files in traversal order. Never empty.
        sources: Vec<MetricSource>,

        /// Files dropped because a later file named the same backend.
        replaced: Vec<MetricSource>,
    },

    /// Nothing to report on. This is a normal outcome, not an error.
    NoData(NoDataReason),
}

/// Finds metric files by naming convention.
#[derive(Debug, Clone)]
pub struct MetricFileLocator {
    patterns: Vec<SourcePattern>,
}

impl MetricFileLocator {
    #[must_use]
    pub const fn new(patterns: Vec<SourcePattern>) -> Self {
        Self { patterns }
    }

    /// Scan `dir` for metric files.
    ///
    /// Files are visited in lexicographic filename order. When two files resolve
    /// to the same backend the later one replaces the earlier and takes its
    /// place at the later position. The earlier file is reported in `replaced`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn locate(&self, dir: &Utf8Path) -> Result<Discovery> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                return Ok(Discovery::NoData(NoDataReason::DirectoryMissing(dir.to_path_buf())));
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("listing result directory '{dir}'")),
        };

        let mut file_names = Vec::new();
        for entry in entries {
            let entry = entry.into_app_err_with(|| format!("listing result directory '{dir}'"))?;

            // Follows symlinks
            if !entry.path().is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => file_names.push(name),
                Err(name) => log::debug!(target: LOG_TARGET, "Ignoring non UTF-8 file name {}", name.display()),
            }
        }

        let (sources, replaced) = self.select(dir, file_names);
        if sources.is_empty() {
            return Ok(Discovery::NoData(NoDataReason::NoMatchingFiles(dir.to_path_buf())));
        }

        log::info!(target: LOG_TARGET, "Found {} metric file(s) in '{dir}'", sources.len());
        Ok(Discovery::Found { sources, replaced })
    }

    /// Pick the metric files out of `file_names` and order them.
    ///
    /// Returns the selected sources and the ones replaced by a later file.
    fn select(&self, dir: &Utf8Path, mut file_names: Vec<String>) -> (Vec<MetricSource>, Vec<MetricSource>) {
        file_names.sort_unstable();

        let mut sources: Vec<MetricSource> = Vec::new();
        let mut replaced = Vec::new();
        for name in file_names {
            let Some(backend) = self.patterns.iter().find_map(|pattern| pattern.backend_for(&name)) else {
                log::trace!(target: LOG_TARGET, "Skipping '{name}', it does not match any metric file pattern");
                continue;
            };

            if let Some(index) = sources.iter().position(|s| s.backend == backend) {
                let earlier = sources.remove(index);
                log::debug!(target: LOG_TARGET, "'{name}' replaces '{}' for backend '{backend}'", earlier.path);
                replaced.push(earlier);
            }

            log::debug!(target: LOG_TARGET, "Discovered backend '{backend}' in '{name}'");
            sources.push(MetricSource {
                backend,
                path: dir.join(&name),
            });
        }

        (sources, replaced)
    }
}
