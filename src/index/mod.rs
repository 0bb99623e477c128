//! The project-wide declaration index.
//!
//! One [`ProjectIndex`] holds the complete analyzed state of every file:
//! its text snapshot, its syntax tree, and its declaration table. The only
//! way to mutate the index is [`FileIndexer::analyze`], which installs a
//! file's state as a single replacement, so a reader can never observe a
//! half-updated file.

mod indexer;

pub use indexer::FileIndexer;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use tree_sitter::Tree;

/// 0-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Where a symbol lives: a file URI plus the range it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

/// The kind of a declared symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Variable,
}

/// A named definition site found while walking a file's syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolInformation {
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
}

/// A parse-level problem in a document.
///
/// `analyze` returns these; the current policy is to return an empty list
/// even for imperfect parses, since the tree-sitter grammar is
/// error-tolerant and still indexes declarations outside broken regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
}

/// An immutable text snapshot of one file.
///
/// Replacing a document's text means constructing a new value; the index
/// never mutates text in place.
#[derive(Debug, Clone)]
pub struct TextDocument {
    uri: String,
    text: String,
}

impl TextDocument {
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Per-file mapping from name to its declarations, in document order.
/// Duplicate names accumulate rather than overwrite.
pub type DeclarationTable = IndexMap<String, Vec<SymbolInformation>>;

/// The complete analyzed state of one file. Replaced wholesale on every
/// re-analysis.
pub struct FileState {
    pub text: String,
    pub tree: Tree,
    pub declarations: DeclarationTable,
}

/// URI-keyed store of every analyzed file's state.
///
/// `BTreeMap` keeps URI iteration deterministic, which the query layer
/// relies on for its URI-then-insertion result ordering.
#[derive(Default)]
pub struct ProjectIndex {
    files: BTreeMap<String, FileState>,
}

impl ProjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The analyzed state for a URI, if it has been analyzed.
    pub fn file(&self, uri: &str) -> Option<&FileState> {
        self.files.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.files.contains_key(uri)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// All analyzed URIs, in sorted order.
    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Every declaration in the project, URI order then document order.
    pub fn all_symbols(&self) -> Vec<SymbolInformation> {
        let mut symbols = Vec::new();
        for state in self.files.values() {
            for declarations in state.declarations.values() {
                symbols.extend(declarations.iter().cloned());
            }
        }
        symbols
    }

    /// Every declaration in one file, document order. Empty for an
    /// unknown URI.
    pub fn file_symbols(&self, uri: &str) -> Vec<SymbolInformation> {
        match self.files.get(uri) {
            Some(state) => state
                .declarations
                .values()
                .flat_map(|declarations| declarations.iter().cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn files(&self) -> &BTreeMap<String, FileState> {
        &self.files
    }

    /// Install a file's new state, discarding any previous state for that
    /// URI. This is the index's single mutation point.
    pub(crate) fn install(&mut self, uri: String, state: FileState) {
        self.files.insert(uri, state);
    }
}
