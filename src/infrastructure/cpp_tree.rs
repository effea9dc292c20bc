//! C++ Syntax Tree Source
//!
//! tree-sitter backed implementation of [`SyntaxNode`] plus the analyzer
//! entry point that ties parsing to trace building.

use tree_sitter::{Node, Parser, Tree};
use tracing::debug;

use crate::domain::analyzer::{build_trace, AnalyzerLimits};
use crate::domain::trace::TraceSpec;
use crate::error::AnalyzeError;
use crate::ports::SyntaxNode;

/// A tree-sitter node paired with the source it was parsed from.
#[derive(Clone, Copy)]
pub struct CppNode<'t> {
    node: Node<'t>,
    source: &'t str,
}

impl<'t> CppNode<'t> {
    pub fn root(tree: &'t Tree, source: &'t str) -> Self {
        Self { node: tree.root_node(), source }
    }

    fn wrap(&self, node: Node<'t>) -> Self {
        Self { node, source: self.source }
    }
}

impl<'t> SyntaxNode for CppNode<'t> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn start_row(&self) -> usize {
        self.node.start_position().row
    }

    fn child_by_field(&self, field: &str) -> Option<Self> {
        self.node.child_by_field_name(field).map(|n| self.wrap(n))
    }

    fn child(&self, index: usize) -> Option<Self> {
        let mut cursor = self.node.walk();
        let child = self.node.children(&mut cursor).nth(index);
        child.map(|n| self.wrap(n))
    }

    fn named_children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .map(|n| self.wrap(n))
            .collect()
    }

    fn text(&self) -> &str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Parse C++ source into a tree. A fresh parser is built per call, so
/// concurrent callers never share parser state.
pub fn parse_cpp(source: &str) -> Result<Tree, AnalyzeError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_cpp::LANGUAGE.into())
        .map_err(|e| AnalyzeError::ParserInit(e.to_string()))?;
    parser.parse(source, None).ok_or(AnalyzeError::ParseFailed)
}

/// C++ analyzer: parse, then build the trace specification.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppAnalyzer {
    limits: AnalyzerLimits,
}

impl CppAnalyzer {
    pub fn new(limits: AnalyzerLimits) -> Self {
        Self { limits }
    }

    pub fn analyze(&self, source: &str) -> Result<TraceSpec, AnalyzeError> {
        let tree = parse_cpp(source)?;
        if tree.root_node().has_error() {
            debug!("syntax tree contains error nodes; continuing best-effort");
        }
        build_trace(CppNode::root(&tree, source), self.limits)
    }
}

/// Analyze C++ source with no traversal limits.
pub fn analyze(source: &str) -> Result<TraceSpec, AnalyzeError> {
    CppAnalyzer::default().analyze(source)
}
