//! Read-side queries over a [`ProjectIndex`].
//!
//! Every operation here is an infallible read: "no result" is an empty
//! vector, never an error. Definition lookups come straight from the
//! declaration tables; reference lookups re-walk each file's syntax tree,
//! which is O(total nodes) per query and fine at shell-project scale.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tracing::debug;

use crate::index::{Location, ProjectIndex, SymbolInformation, SymbolKind};
use crate::parser::{self, NodeKind};

pub struct QueryEngine<'a> {
    index: &'a ProjectIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a ProjectIndex) -> Self {
        Self { index }
    }

    /// Every location where something named `name` is defined, in URI
    /// order then document order. Exact, case-sensitive, unranked.
    pub fn find_definition(&self, name: &str) -> Vec<Location> {
        let mut locations = Vec::new();
        for state in self.index.files().values() {
            if let Some(declarations) = state.declarations.get(name) {
                locations.extend(declarations.iter().map(|d| d.location.clone()));
            }
        }
        locations
    }

    /// Every occurrence of `name` across the whole project.
    ///
    /// Occurrences are nodes classified as definitions or references;
    /// assignments count as both, so the defining occurrence is included.
    /// Not scope-aware: a name is treated as globally visible.
    pub fn find_references(&self, name: &str) -> Vec<Location> {
        self.index
            .uris()
            .flat_map(|uri| self.find_occurrences(uri, name))
            .collect()
    }

    /// Every occurrence of `query` in one file. Empty for an unknown URI.
    pub fn find_occurrences(&self, uri: &str, query: &str) -> Vec<Location> {
        let Some(state) = self.index.file(uri) else {
            return Vec::new();
        };

        let mut locations = Vec::new();
        parser::walk(state.tree.root_node(), &mut |node| {
            let kind = NodeKind::of(node);
            if kind.is_definition() || kind.is_reference() {
                if let Some(name) = parser::declaration_name(node, &state.text) {
                    if name == query {
                        locations.push(Location {
                            uri: uri.to_string(),
                            range: parser::node_range(node),
                        });
                    }
                }
            }
            true
        });
        locations
    }

    /// Fuzzy subsequence search over every declared name in the project.
    ///
    /// Case-sensitive; results come back in the matcher's score order
    /// (ties keep index order) and are not de-duplicated across files.
    pub fn search(&self, query: &str) -> Vec<SymbolInformation> {
        let matcher = SkimMatcherV2::default().respect_case();
        let mut scored: Vec<(i64, SymbolInformation)> = self
            .index
            .all_symbols()
            .into_iter()
            .filter_map(|symbol| {
                matcher
                    .fuzzy_match(&symbol.name, query)
                    .map(|score| (score, symbol))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        debug!(query, matches = scored.len(), "workspace symbol search");
        scored.into_iter().map(|(_, symbol)| symbol).collect()
    }

    /// All declarations in one file. Empty for an unknown URI.
    pub fn find_symbols_for_file(&self, uri: &str) -> Vec<SymbolInformation> {
        self.index.file_symbols(uri)
    }

    /// Completion candidates for a word: exact-name matches, or
    /// prefix matches when `exact_match` is false. An empty word under
    /// prefix matching returns every declaration in the project.
    pub fn find_symbols_matching_word(
        &self,
        word: &str,
        exact_match: bool,
    ) -> Vec<SymbolInformation> {
        let mut symbols = Vec::new();
        for state in self.index.files().values() {
            for (name, declarations) in &state.declarations {
                let matched = if exact_match {
                    name == word
                } else {
                    name.starts_with(word)
                };
                if matched {
                    symbols.extend(declarations.iter().cloned());
                }
            }
        }
        symbols
    }

    /// Every variable declaration in the project.
    pub fn all_variable_symbols(&self) -> Vec<SymbolInformation> {
        self.index
            .all_symbols()
            .into_iter()
            .filter(|symbol| symbol.kind == SymbolKind::Variable)
            .collect()
    }
}
