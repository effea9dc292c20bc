//! Trace Builder
//!
//! Single pre-order walk over a syntax tree that classifies nodes and
//! appends to a fresh [`TraceSpec`]. Every node is descended into whether or
//! not it matched, so constructs nested under unknown syntax are still found.

use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use crate::domain::heuristics;
use crate::domain::node_kind::NodeKind;
use crate::domain::trace::*;
use crate::error::AnalyzeError;
use crate::ports::SyntaxNode;

/// Optional bounds on traversal cost. Unset means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyzerLimits {
    pub max_depth: Option<usize>,
    pub max_nodes: Option<usize>,
}

/// Context carried from a node to its children.
struct Visit<N> {
    node: N,
    parent: NodeKind,
    /// Innermost enclosing function name.
    enclosing: Option<Rc<str>>,
    depth: usize,
}

/// Walk the tree under `root` and build its trace specification.
///
/// Uses an explicit work stack; the visiting order is the same as a
/// recursive pre-order walk over named children.
pub fn build_trace<N: SyntaxNode>(root: N, limits: AnalyzerLimits) -> Result<TraceSpec, AnalyzeError> {
    let mut spec = TraceSpec::new();
    let mut stack = vec![Visit {
        node: root,
        parent: NodeKind::Other,
        enclosing: None,
        depth: 0,
    }];
    let mut visited = 0usize;

    while let Some(Visit { node, parent, enclosing, depth }) = stack.pop() {
        visited += 1;
        if let Some(max) = limits.max_nodes {
            if visited > max {
                return Err(AnalyzeError::LimitExceeded { limit: "max_nodes", value: max });
            }
        }
        if let Some(max) = limits.max_depth {
            if depth > max {
                return Err(AnalyzeError::LimitExceeded { limit: "max_depth", value: max });
            }
        }

        let kind = NodeKind::from_tag(node.kind());
        let enclosing = classify(&node, kind, parent, enclosing, &mut spec);

        for child in node.named_children().into_iter().rev() {
            stack.push(Visit {
                node: child,
                parent: kind,
                enclosing: enclosing.clone(),
                depth: depth + 1,
            });
        }
    }

    debug!(
        nodes = visited,
        steps = spec.steps.len(),
        variables = spec.variables.len(),
        "trace built"
    );
    Ok(spec)
}

/// Record whatever `node` contributes and return the function context for
/// its children.
fn classify<N: SyntaxNode>(
    node: &N,
    kind: NodeKind,
    parent: NodeKind,
    enclosing: Option<Rc<str>>,
    spec: &mut TraceSpec,
) -> Option<Rc<str>> {
    match kind {
        NodeKind::InitDeclarator => record_declaration(node, parent, spec),
        NodeKind::AssignmentExpression => record_assignment(node, spec),
        NodeKind::FunctionDefinition => return record_function(node, spec),
        NodeKind::ForStatement => record_for_loop(node, spec),
        NodeKind::IfStatement => record_if(node, spec),
        NodeKind::CallExpression => record_call(node, enclosing.as_deref(), spec),
        NodeKind::ReturnStatement => record_return(node, spec),
        NodeKind::StructSpecifier => record_data_structure(node, StructKind::Struct, spec),
        NodeKind::ClassSpecifier => record_data_structure(node, StructKind::Class, spec),
        NodeKind::NewExpression => record_allocation(node, spec),
        _ => {}
    }
    enclosing
}

fn line_of<N: SyntaxNode>(node: &N) -> usize {
    node.start_row() + 1
}

fn field_text<N: SyntaxNode>(node: &N, field: &str) -> Option<String> {
    node.child_by_field(field).map(|c| c.text().to_string())
}

fn record_declaration<N: SyntaxNode>(node: &N, parent: NodeKind, spec: &mut TraceSpec) {
    let Some(name) = field_text(node, "declarator") else {
        return;
    };
    let line = line_of(node);
    let value = field_text(node, "value");

    let shape = if heuristics::declares_pointer(&name, parent) {
        VariableShape::Pointer { value: value.clone() }
    } else {
        match value.as_deref() {
            Some(v) if heuristics::is_brace_initializer(v) => VariableShape::Array {
                values: Some(heuristics::parse_int_list(v)),
                value: None,
            },
            Some(v) if heuristics::is_call_style_initializer(v) => VariableShape::Array {
                values: None,
                value: Some(v.to_string()),
            },
            other => VariableShape::Int {
                value: other.map(heuristics::parse_int),
            },
        }
    };

    spec.variables.push(Variable { name: name.clone(), line, shape });
    spec.steps.push(Step::Declare { line, var: name, value });
}

fn record_assignment<N: SyntaxNode>(node: &N, spec: &mut TraceSpec) {
    let (Some(left), Some(right)) = (node.child_by_field("left"), node.child_by_field("right")) else {
        return;
    };
    let line = line_of(node);
    let left_text = left.text().to_string();
    let value = right.text().to_string();

    if heuristics::targets_member(NodeKind::from_tag(left.kind()), &left_text) {
        // Named children skip the anonymous `->` / `.` token.
        let parts = left.named_children();
        spec.pointer_assignments.push(PointerAssignment {
            from: parts.first().map(|p| p.text().to_string()),
            field: parts.get(1).map(|p| p.text().to_string()),
            value: value.clone(),
            full_left: left_text.clone(),
            line,
        });
        spec.steps.push(Step::PointerAssign { line, target: left_text, value });
    } else {
        spec.variable_updates.push(VariableUpdate {
            name: left_text.clone(),
            value: value.clone(),
            line,
        });
        spec.steps.push(Step::Assign { line, var: left_text, value });
    }
}

fn record_function<N: SyntaxNode>(node: &N, spec: &mut TraceSpec) -> Option<Rc<str>> {
    let declarator = node.child_by_field("declarator")?;
    let signature = declarator.text().to_string();
    let name = function_identifier(declarator);

    spec.flow.push(FlowNode::FunctionDefinition {
        name: name.clone(),
        signature,
        body: field_text(node, "body"),
        line: line_of(node),
    });
    Some(Rc::from(name))
}

/// Peel pointer/reference declarators down to the function declarator and
/// return the name it declares. Falls back to the declarator's own text.
fn function_identifier<N: SyntaxNode>(declarator: N) -> String {
    match NodeKind::from_tag(declarator.kind()) {
        NodeKind::FunctionDeclarator => declarator
            .child_by_field("declarator")
            .map(|d| d.text().to_string())
            .unwrap_or_else(|| declarator.text().to_string()),
        kind if kind.is_wrapping_declarator() => {
            let inner = declarator
                .child_by_field("declarator")
                .or_else(|| declarator.named_children().into_iter().next());
            match inner {
                Some(inner) => function_identifier(inner),
                None => declarator.text().to_string(),
            }
        }
        _ => declarator.text().to_string(),
    }
}

fn record_for_loop<N: SyntaxNode>(node: &N, spec: &mut TraceSpec) {
    let line = line_of(node);
    let condition = field_text(node, "condition");

    spec.flow.push(FlowNode::ForLoop {
        initializer: field_text(node, "initializer"),
        condition: condition.clone(),
        update: field_text(node, "update"),
        body: field_text(node, "body"),
        line,
    });
    spec.steps.push(Step::LoopStart { line, condition });
}

fn record_if<N: SyntaxNode>(node: &N, spec: &mut TraceSpec) {
    let line = line_of(node);
    let condition = field_text(node, "condition");

    spec.flow.push(FlowNode::If {
        condition: condition.clone(),
        consequence: field_text(node, "consequence"),
        line,
    });
    spec.steps.push(Step::ConditionCheck { line, condition });
}

fn record_call<N: SyntaxNode>(node: &N, enclosing: Option<&str>, spec: &mut TraceSpec) {
    let line = line_of(node);
    let name = node
        .child(0)
        .map(|c| c.text().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let arguments = field_text(node, "arguments");

    spec.flow.push(FlowNode::FunctionCall {
        name: name.clone(),
        arguments: arguments.clone(),
        line,
    });
    spec.steps.push(Step::Call {
        line,
        function: name.clone(),
        args: arguments.clone().unwrap_or_default(),
    });

    // Direct self-recursion only: plain name match against the enclosing function.
    if enclosing == Some(name.as_str()) {
        spec.call_stack.push(CallFrame { function: name, args: arguments, line });
    }
}

fn record_return<N: SyntaxNode>(node: &N, spec: &mut TraceSpec) {
    let line = line_of(node);
    let value = node
        .named_children()
        .first()
        .map(|expr| expr.text().to_string())
        .unwrap_or_else(|| "void".to_string());

    spec.steps.push(Step::Return { line, value: value.clone() });
    spec.returns.push(ReturnRecord { line, value });
}

fn record_data_structure<N: SyntaxNode>(node: &N, kind: StructKind, spec: &mut TraceSpec) {
    let fields = node
        .child_by_field("body")
        .map(|body| {
            body.named_children()
                .iter()
                .filter(|c| NodeKind::from_tag(c.kind()) == NodeKind::FieldDeclaration)
                .map(|decl| {
                    let name = field_text(decl, "declarator");
                    StructField {
                        type_text: field_text(decl, "type"),
                        is_pointer: heuristics::field_is_pointer(name.as_deref()),
                        name,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    spec.data_structures.push(DataStructure {
        kind,
        name: field_text(node, "name"),
        fields,
        line: line_of(node),
    });
}

fn record_allocation<N: SyntaxNode>(node: &N, spec: &mut TraceSpec) {
    let line = line_of(node);
    let type_name = field_text(node, "type");
    let args = node
        .child_by_field("arguments")
        .map(|a| heuristics::strip_delimiters(a.text()).to_string());

    spec.allocations.push(Allocation {
        type_name: type_name.clone(),
        args: args.clone(),
        line,
    });
    spec.steps.push(Step::Allocate { line, type_name, args });
}
