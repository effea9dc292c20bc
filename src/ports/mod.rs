use crate::domain::trace::FileTrace;

pub mod flowchart_exporter;

/// Read-only view of one syntax-tree node.
///
/// This is the whole contract the analyzer has with the parser. Every lookup
/// may come back empty; callers treat absence as normal.
pub trait SyntaxNode: Sized {
    /// Grammar kind tag, e.g. `"init_declarator"`.
    fn kind(&self) -> &str;
    /// 0-based row of the first character.
    fn start_row(&self) -> usize;
    fn child_by_field(&self, field: &str) -> Option<Self>;
    /// Positional child, anonymous tokens included.
    fn child(&self, index: usize) -> Option<Self>;
    fn named_children(&self) -> Vec<Self>;
    /// Verbatim source text covered by the node.
    fn text(&self) -> &str;
}

pub trait TraceExporter: Send + Sync {
    fn render(&self, traces: &[FileTrace]) -> anyhow::Result<String>;
}
