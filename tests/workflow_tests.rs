//! End-to-end tests: load a workspace, then answer queries against it.

use std::fs;

use tempfile::tempdir;

use shellscope::{docs, FileIndexer, ProjectIndex, QueryEngine, TextDocument, WorkspaceLoader};

const INSTALL_SH: &str = "\
#!/bin/bash

# The npm log level used during installation.
# Overridden by the --loglevel flag.
npm_config_loglevel=warn

install_deps() {
  echo \"installing with $npm_config_loglevel\"
}

install_deps
";

const COMMON_SH: &str = "\
npm_config_loglevel=silent
retries=3
";

#[test]
fn test_load_then_query_definitions_and_references() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("install.sh"), INSTALL_SH).unwrap();
    fs::write(dir.path().join("common.sh"), COMMON_SH).unwrap();

    let mut index = ProjectIndex::new();
    let mut indexer = FileIndexer::new().unwrap();
    let loaded = WorkspaceLoader::new("**/*.sh", 500).load(dir.path(), &mut indexer, &mut index);
    assert_eq!(loaded.len(), 2);

    let query = QueryEngine::new(&index);

    // Definitions are found across files, exact and case-sensitive.
    let definitions = query.find_definition("npm_config_loglevel");
    assert_eq!(definitions.len(), 2);

    // Assignments count as occurrences in both files.
    let references = query.find_references("npm_config_loglevel");
    assert_eq!(references.len(), 2);

    // Fuzzy search tolerates dropped separators.
    let matches = query.search("npmloglevel");
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|s| s.name == "npm_config_loglevel"));

    // Function declarations are indexed too.
    assert_eq!(query.find_definition("install_deps").len(), 1);
}

#[test]
fn test_documentation_for_a_loaded_symbol() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("install.sh"), INSTALL_SH).unwrap();

    let mut index = ProjectIndex::new();
    let mut indexer = FileIndexer::new().unwrap();
    let loaded = WorkspaceLoader::new("**/*.sh", 500).load(dir.path(), &mut indexer, &mut index);

    let query = QueryEngine::new(&index);
    let definition = &query.find_definition("npm_config_loglevel")[0];
    assert_eq!(definition.uri, loaded[0].as_str());

    let state = index.file(&definition.uri).unwrap();
    let documentation = docs::comments_above(&state.text, definition.range.start.line);
    assert_eq!(
        documentation.as_deref(),
        Some(
            "```txt\nThe npm log level used during installation.\nOverridden by the --loglevel flag.\n```"
        )
    );

    // The function has a blank line above it, so no documentation.
    let function = &query.find_definition("install_deps")[0];
    assert_eq!(
        docs::comments_above(&state.text, function.range.start.line),
        None
    );
}

#[test]
fn test_edit_path_replaces_one_file_without_reload() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("install.sh"), INSTALL_SH).unwrap();
    fs::write(dir.path().join("common.sh"), COMMON_SH).unwrap();

    let mut index = ProjectIndex::new();
    let mut indexer = FileIndexer::new().unwrap();
    let loaded = WorkspaceLoader::new("**/*.sh", 500).load(dir.path(), &mut indexer, &mut index);

    // Simulate an in-editor edit of common.sh: analyze new text directly.
    let common = loaded
        .iter()
        .find(|uri| uri.as_str().ends_with("common.sh"))
        .unwrap();
    indexer.analyze(
        &mut index,
        &TextDocument::new(common.as_str(), "renamed_level=silent\n"),
    );

    let query = QueryEngine::new(&index);
    assert_eq!(query.find_definition("renamed_level").len(), 1);
    assert!(query.find_definition("retries").is_empty());
    // The untouched file keeps its declarations.
    assert_eq!(query.find_definition("npm_config_loglevel").len(), 1);
}

#[test]
fn test_completion_candidates_and_variable_listing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("install.sh"), INSTALL_SH).unwrap();
    fs::write(dir.path().join("common.sh"), COMMON_SH).unwrap();

    let mut index = ProjectIndex::new();
    let mut indexer = FileIndexer::new().unwrap();
    WorkspaceLoader::new("**/*.sh", 500).load(dir.path(), &mut indexer, &mut index);

    let query = QueryEngine::new(&index);

    // Prefix completion.
    let candidates = query.find_symbols_matching_word("npm", false);
    assert_eq!(candidates.len(), 2);

    // "Expand all variables" completion: empty word, prefix mode.
    let everything = query.find_symbols_matching_word("", false);
    assert_eq!(everything.len(), index.all_symbols().len());

    // Variables only, no functions.
    let variables = query.all_variable_symbols();
    assert!(!variables.iter().any(|s| s.name == "install_deps"));
    assert!(variables.iter().any(|s| s.name == "retries"));
}
