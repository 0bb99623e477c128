//! Bulk workspace loading.
//!
//! Populates a [`ProjectIndex`] at startup: discover candidate files under
//! a root, sniff their shebangs, and analyze the eligible ones. Every
//! per-file failure is logged and skipped; the loader never aborts the
//! files that remain.

use std::path::Path;
use std::time::Instant;

use globset::{Glob, GlobMatcher};
use tracing::{debug, info, warn};
use url::Url;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::index::{FileIndexer, ProjectIndex, TextDocument};
use crate::parser::shebang;

pub struct WorkspaceLoader {
    glob_pattern: String,
    max_files: usize,
}

impl WorkspaceLoader {
    pub fn new(glob_pattern: impl Into<String>, max_files: usize) -> Self {
        Self {
            glob_pattern: glob_pattern.into(),
            max_files,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.workspace.glob_pattern.clone(),
            config.workspace.max_files,
        )
    }

    /// Discover and analyze shell files under `root`.
    ///
    /// Enumeration follows symbolic links, silently drops unreadable
    /// directory entries, and stops once `max_files` files have matched
    /// the glob. Files whose shebang names an unsupported interpreter are
    /// skipped without touching the index. Returns the URIs that were fed
    /// into the indexer.
    pub fn load(
        &self,
        root: &Path,
        indexer: &mut FileIndexer,
        index: &mut ProjectIndex,
    ) -> Vec<Url> {
        info!(
            root = %root.display(),
            pattern = %self.glob_pattern,
            "analyzing workspace"
        );
        let started = Instant::now();

        let matcher = match self.build_matcher() {
            Ok(matcher) => matcher,
            Err(error) => {
                // Degraded mode: keep serving whatever is already indexed.
                warn!(%error, "failed to discover shell files; the experience will be degraded");
                return Vec::new();
            }
        };

        let paths = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                matcher.is_match(relative)
            })
            .map(|entry| entry.into_path())
            .take(self.max_files);

        let mut loaded = Vec::new();
        for path in paths {
            let uri = match Url::from_file_path(&path)
                .or_else(|()| path.canonicalize().map_err(|_| ()).and_then(Url::from_file_path))
            {
                Ok(uri) => uri,
                Err(()) => {
                    warn!(path = %path.display(), "skipping path that is not a valid file URI");
                    continue;
                }
            };

            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(source) => {
                    warn!(error = %Error::Read { path, source }, "skipping unreadable file");
                    continue;
                }
            };

            if let Some(shebang) = shebang::get_shebang(&text) {
                if !shebang::is_supported_shell(shebang) {
                    debug!(%uri, shebang, "skipping file with unsupported interpreter");
                    continue;
                }
            }

            debug!(%uri, "analyzing");
            indexer.analyze(index, &TextDocument::new(uri.as_str(), text));
            loaded.push(uri);
        }

        info!(
            files = loaded.len(),
            elapsed = ?started.elapsed(),
            "workspace analysis finished"
        );
        loaded
    }

    fn build_matcher(&self) -> Result<GlobMatcher, Error> {
        Glob::new(&self.glob_pattern)
            .map(|glob| glob.compile_matcher())
            .map_err(|source| Error::InvalidGlob {
                pattern: self.glob_pattern.clone(),
                source,
            })
    }
}
