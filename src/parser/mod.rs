//! Tree-sitter adapter for shell scripts.
//!
//! Wraps the bash grammar behind the small surface the analyzer needs:
//! parsing, a depth-first walk with caller-controlled descent, node
//! classification, and position/text accessors. Tree-sitter rows and
//! columns are 0-based, which is also the convention of every range the
//! analyzer hands out, so no conversion happens here.

pub mod shebang;

use tree_sitter::{Node, Parser, Tree};

use crate::error::Error;
use crate::index::{Position, Range};

/// Classification of a syntax node, closed over the kinds the analyzer
/// cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A variable assignment (`foo=1`, including `declare`/`export` forms)
    Assignment,
    /// A function definition (`foo() { ...; }`)
    FunctionDeclaration,
    /// Any other node
    Other,
}

impl NodeKind {
    /// Classify a tree-sitter node.
    pub fn of(node: &Node) -> Self {
        match node.kind() {
            "variable_assignment" => NodeKind::Assignment,
            "function_definition" => NodeKind::FunctionDeclaration,
            _ => NodeKind::Other,
        }
    }

    /// Whether a node of this kind declares a name.
    pub fn is_definition(self) -> bool {
        match self {
            NodeKind::Assignment | NodeKind::FunctionDeclaration => true,
            NodeKind::Other => false,
        }
    }

    /// Whether a node of this kind counts as a matchable occurrence
    /// during reference scans. Assignments count both as definitions and
    /// as references, so the defining occurrence shows up in
    /// find-references results.
    pub fn is_reference(self) -> bool {
        match self {
            NodeKind::Assignment => true,
            NodeKind::FunctionDeclaration | NodeKind::Other => false,
        }
    }
}

/// A parser configured with the bash grammar.
///
/// Holds one tree-sitter `Parser` instance which is reused across parse
/// operations, as parser construction is not free.
pub struct ShellParser {
    parser: Parser,
}

impl ShellParser {
    /// Create a parser with the bash grammar loaded.
    pub fn new() -> Result<Self, Error> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_bash::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parse source text into a syntax tree.
    ///
    /// Tree-sitter is error-tolerant: malformed input still yields a tree
    /// containing error nodes. `None` means no tree could be produced at
    /// all, which callers treat as "no tree available".
    pub fn parse(&mut self, text: &str) -> Option<Tree> {
        self.parser.parse(text, None)
    }
}

/// Visit `node` and its descendants depth-first.
///
/// The visitor sees every node exactly once and its return value controls
/// descent: `false` skips the node's children.
pub fn walk<'tree, F>(node: Node<'tree>, visitor: &mut F)
where
    F: FnMut(&Node<'tree>) -> bool,
{
    if !visitor(&node) {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, visitor);
    }
}

/// The source text covered by a node.
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// The 0-based range covered by a node.
pub fn node_range(node: &Node) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range {
        start: Position {
            line: start.row as u32,
            character: start.column as u32,
        },
        end: Position {
            line: end.row as u32,
            character: end.column as u32,
        },
    }
}

/// The declared name of a definition node: the variable name of an
/// assignment or the word of a function definition. `None` for nodes
/// without a `name` field (including error nodes).
pub fn declaration_name<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name("name")
        .map(|name| node_text(&name, source))
}
