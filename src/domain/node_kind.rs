//! Node Kind Module
//!
//! Closed set of C++ syntax-tree node kinds the analyzer understands.
//! Anything else decodes to `NodeKind::Other`, which classifies nothing but
//! is still descended into.

/// Syntax-tree node kinds relevant to trace classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    InitDeclarator,
    AssignmentExpression,
    FunctionDefinition,
    ForStatement,
    IfStatement,
    CallExpression,
    ReturnStatement,
    StructSpecifier,
    ClassSpecifier,
    NewExpression,
    FieldDeclaration,
    /// `a->b` / `a.b` (`member_expression` is accepted as an alias).
    FieldExpression,
    PointerDeclarator,
    ReferenceDeclarator,
    FunctionDeclarator,
    Other,
}

impl NodeKind {
    /// Decode a tree-sitter kind tag.
    pub fn from_tag(tag: &str) -> NodeKind {
        match tag {
            "init_declarator" => NodeKind::InitDeclarator,
            "assignment_expression" => NodeKind::AssignmentExpression,
            "function_definition" => NodeKind::FunctionDefinition,
            "for_statement" => NodeKind::ForStatement,
            "if_statement" => NodeKind::IfStatement,
            "call_expression" => NodeKind::CallExpression,
            "return_statement" => NodeKind::ReturnStatement,
            "struct_specifier" => NodeKind::StructSpecifier,
            "class_specifier" => NodeKind::ClassSpecifier,
            "new_expression" => NodeKind::NewExpression,
            "field_declaration" => NodeKind::FieldDeclaration,
            "field_expression" | "member_expression" => NodeKind::FieldExpression,
            "pointer_declarator" => NodeKind::PointerDeclarator,
            "reference_declarator" => NodeKind::ReferenceDeclarator,
            "function_declarator" => NodeKind::FunctionDeclarator,
            _ => NodeKind::Other,
        }
    }

    /// Canonical tree-sitter tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::InitDeclarator => "init_declarator",
            NodeKind::AssignmentExpression => "assignment_expression",
            NodeKind::FunctionDefinition => "function_definition",
            NodeKind::ForStatement => "for_statement",
            NodeKind::IfStatement => "if_statement",
            NodeKind::CallExpression => "call_expression",
            NodeKind::ReturnStatement => "return_statement",
            NodeKind::StructSpecifier => "struct_specifier",
            NodeKind::ClassSpecifier => "class_specifier",
            NodeKind::NewExpression => "new_expression",
            NodeKind::FieldDeclaration => "field_declaration",
            NodeKind::FieldExpression => "field_expression",
            NodeKind::PointerDeclarator => "pointer_declarator",
            NodeKind::ReferenceDeclarator => "reference_declarator",
            NodeKind::FunctionDeclarator => "function_declarator",
            NodeKind::Other => "other",
        }
    }

    /// Declarators that wrap another declarator under their `declarator` field.
    pub fn is_wrapping_declarator(&self) -> bool {
        matches!(self, NodeKind::PointerDeclarator | NodeKind::ReferenceDeclarator)
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Other
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
