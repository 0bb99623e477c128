//! Error types for the fallible edges of the analyzer.
//!
//! Query operations never fail; "no result" is an empty collection or
//! `None`. Only parser construction and the workspace-load path touch
//! fallible I/O, and the loader converts every per-file failure into a
//! logged skip rather than propagating it.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bash grammar could not be loaded into the parser. This only
    /// happens on a tree-sitter ABI mismatch between the core library and
    /// the grammar crate.
    #[error("failed to load the bash grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern {pattern:?}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
