//! Single-file analysis: parse, walk, and install declarations.

use tracing::{debug, warn};

use crate::error::Error;
use crate::parser::{self, NodeKind, ShellParser};

use super::{
    DeclarationTable, Diagnostic, FileState, Location, ProjectIndex, SymbolInformation,
    SymbolKind, TextDocument,
};

/// Turns one document into its syntax tree and declaration table.
///
/// Owns the parser; `analyze` is the only path that writes to a
/// [`ProjectIndex`].
pub struct FileIndexer {
    parser: ShellParser,
}

impl FileIndexer {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            parser: ShellParser::new()?,
        })
    }

    /// Analyze a document and replace its state in the index.
    ///
    /// Walks the parsed tree once, collecting a declaration for every
    /// assignment and function definition, then installs the new tree and
    /// table for the document's URI in one step. Other URIs are never
    /// touched. Returns the diagnostics produced by parsing; the current
    /// policy yields an empty list even for imperfect parses.
    pub fn analyze(&mut self, index: &mut ProjectIndex, document: &TextDocument) -> Vec<Diagnostic> {
        let text = document.text();

        let Some(tree) = self.parser.parse(text) else {
            // No usable tree: leave whatever state the URI had before.
            warn!(uri = document.uri(), "parser produced no tree");
            return Vec::new();
        };

        let mut declarations = DeclarationTable::default();
        parser::walk(tree.root_node(), &mut |node| {
            let kind = match NodeKind::of(node) {
                NodeKind::Assignment => Some(SymbolKind::Variable),
                NodeKind::FunctionDeclaration => Some(SymbolKind::Function),
                NodeKind::Other => None,
            };
            if let Some(kind) = kind {
                if let Some(name) = parser::declaration_name(node, text) {
                    declarations
                        .entry(name.to_string())
                        .or_default()
                        .push(SymbolInformation {
                            name: name.to_string(),
                            kind,
                            location: Location {
                                uri: document.uri().to_string(),
                                range: parser::node_range(node),
                            },
                        });
                }
            }
            true
        });

        debug!(
            uri = document.uri(),
            names = declarations.len(),
            "analyzed document"
        );

        index.install(
            document.uri().to_string(),
            FileState {
                text: text.to_string(),
                tree,
                declarations,
            },
        );

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(index: &mut ProjectIndex, uri: &str, text: &str) {
        let mut indexer = FileIndexer::new().unwrap();
        let diagnostics = indexer.analyze(index, &TextDocument::new(uri, text));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_indexes_variables_and_functions() {
        let mut index = ProjectIndex::new();
        analyze(
            &mut index,
            "file:///a.sh",
            "foo=1\n\nmy_func() {\n  echo hi\n}\n",
        );

        let symbols = index.file_symbols("file:///a.sh");
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "foo");
        assert_eq!(symbols[0].kind, SymbolKind::Variable);
        assert_eq!(symbols[1].name, "my_func");
        assert_eq!(symbols[1].kind, SymbolKind::Function);
    }

    #[test]
    fn test_duplicate_names_accumulate_in_document_order() {
        let mut index = ProjectIndex::new();
        analyze(&mut index, "file:///a.sh", "foo=1\nfoo=2\n");

        let state = index.file("file:///a.sh").unwrap();
        let declarations = &state.declarations["foo"];
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].location.range.start.line, 0);
        assert_eq!(declarations[1].location.range.start.line, 1);
    }

    #[test]
    fn test_reanalysis_replaces_prior_state() {
        let mut index = ProjectIndex::new();
        analyze(&mut index, "file:///a.sh", "old_name=1\n");
        analyze(&mut index, "file:///b.sh", "other=1\n");
        analyze(&mut index, "file:///a.sh", "new_name=1\n");

        let names: Vec<String> = index
            .file_symbols("file:///a.sh")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["new_name"]);
        // Other URIs are untouched.
        assert_eq!(index.file_symbols("file:///b.sh").len(), 1);
    }

    #[test]
    fn test_file_symbols_only_contain_their_uri() {
        let mut index = ProjectIndex::new();
        analyze(&mut index, "file:///a.sh", "a=1\n");
        analyze(&mut index, "file:///b.sh", "b=1\n");

        for symbol in index.file_symbols("file:///a.sh") {
            assert_eq!(symbol.location.uri, "file:///a.sh");
        }
        assert!(index.file_symbols("file:///missing.sh").is_empty());
    }

    #[test]
    fn test_broken_syntax_still_indexes_valid_regions() {
        let mut index = ProjectIndex::new();
        analyze(&mut index, "file:///a.sh", "foo=1\nif then fi (((\nbar=2\n");

        let names: Vec<String> = index
            .file_symbols("file:///a.sh")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert!(names.contains(&"foo".to_string()));
    }
}
