//! Trace Specification Data Model
//!
//! The document the analyzer builds for the visualizer front end. Every
//! collection is append-only and ordered by traversal, and every record
//! carries the 1-based source line it came from.

use serde::{Serialize, Serializer};

/// Result of lenient integer parsing.
///
/// `NaN` marks initializer text that does not start with a number. It is
/// serialized as the string `"NaN"` so the marker survives JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInt {
    Number(i64),
    NaN,
}

impl ParsedInt {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            ParsedInt::Number(n) => Some(*n),
            ParsedInt::NaN => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, ParsedInt::NaN)
    }
}

impl Serialize for ParsedInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParsedInt::Number(n) => serializer.serialize_i64(*n),
            ParsedInt::NaN => serializer.serialize_str("NaN"),
        }
    }
}

/// A declared name with an inferred shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub line: usize,
    #[serde(flatten)]
    pub shape: VariableShape,
}

impl Variable {
    pub fn kind(&self) -> VarKind {
        match self.shape {
            VariableShape::Int { .. } => VarKind::Int,
            VariableShape::Pointer { .. } => VarKind::Pointer,
            VariableShape::Array { .. } => VarKind::Array,
        }
    }
}

/// Inferred variable shape. Exactly one per variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VariableShape {
    Int {
        value: Option<ParsedInt>,
    },
    Pointer {
        value: Option<String>,
    },
    /// `values` is set for brace initializers, `value` for call-style ones.
    Array {
        values: Option<Vec<ParsedInt>>,
        value: Option<String>,
    },
}

/// Field-less view of [`VariableShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Int,
    Pointer,
    Array,
}

/// A plain assignment such as `x = y + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableUpdate {
    pub name: String,
    pub value: String,
    pub line: usize,
}

/// A write through a member access: `a->b = v` or `a.b = v`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerAssignment {
    pub from: Option<String>,
    pub field: Option<String>,
    pub value: String,
    pub full_left: String,
    pub line: usize,
}

/// A structural construct met during traversal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FlowNode {
    FunctionDefinition {
        name: String,
        signature: String,
        body: Option<String>,
        line: usize,
    },
    ForLoop {
        initializer: Option<String>,
        condition: Option<String>,
        update: Option<String>,
        body: Option<String>,
        line: usize,
    },
    If {
        condition: Option<String>,
        consequence: Option<String>,
        line: usize,
    },
    FunctionCall {
        name: String,
        arguments: Option<String>,
        line: usize,
    },
}

impl FlowNode {
    pub fn line(&self) -> usize {
        match self {
            FlowNode::FunctionDefinition { line, .. }
            | FlowNode::ForLoop { line, .. }
            | FlowNode::If { line, .. }
            | FlowNode::FunctionCall { line, .. } => *line,
        }
    }
}

/// One event of the visualization timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Declare {
        line: usize,
        var: String,
        value: Option<String>,
    },
    Assign {
        line: usize,
        var: String,
        value: String,
    },
    PointerAssign {
        line: usize,
        target: String,
        value: String,
    },
    LoopStart {
        line: usize,
        condition: Option<String>,
    },
    ConditionCheck {
        line: usize,
        condition: Option<String>,
    },
    Call {
        line: usize,
        function: String,
        args: String,
    },
    Return {
        line: usize,
        value: String,
    },
    Allocate {
        line: usize,
        #[serde(rename = "type")]
        type_name: Option<String>,
        args: Option<String>,
    },
}

impl Step {
    pub fn line(&self) -> usize {
        match self {
            Step::Declare { line, .. }
            | Step::Assign { line, .. }
            | Step::PointerAssign { line, .. }
            | Step::LoopStart { line, .. }
            | Step::ConditionCheck { line, .. }
            | Step::Call { line, .. }
            | Step::Return { line, .. }
            | Step::Allocate { line, .. } => *line,
        }
    }

    /// Wire name of the step's action.
    pub fn action(&self) -> &'static str {
        match self {
            Step::Declare { .. } => "declare",
            Step::Assign { .. } => "assign",
            Step::PointerAssign { .. } => "pointer-assign",
            Step::LoopStart { .. } => "loop-start",
            Step::ConditionCheck { .. } => "condition-check",
            Step::Call { .. } => "call",
            Step::Return { .. } => "return",
            Step::Allocate { .. } => "allocate",
        }
    }
}

/// A direct self-recursive call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallFrame {
    pub function: String,
    pub args: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnRecord {
    pub line: usize,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StructKind {
    Struct,
    Class,
}

/// Shape of a struct or class declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataStructure {
    #[serde(rename = "type")]
    pub kind: StructKind,
    pub name: Option<String>,
    pub fields: Vec<StructField>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructField {
    #[serde(rename = "type")]
    pub type_text: Option<String>,
    pub name: Option<String>,
    pub is_pointer: bool,
}

/// A `new` expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub type_name: Option<String>,
    pub args: Option<String>,
    pub line: usize,
}

/// The complete output of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSpec {
    pub variables: Vec<Variable>,
    pub flow: Vec<FlowNode>,
    pub steps: Vec<Step>,
    pub variable_updates: Vec<VariableUpdate>,
    pub call_stack: Vec<CallFrame>,
    pub returns: Vec<ReturnRecord>,
    pub data_structures: Vec<DataStructure>,
    pub pointer_assignments: Vec<PointerAssignment>,
    pub allocations: Vec<Allocation>,
}

impl TraceSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no construct was recorded at all.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
            && self.flow.is_empty()
            && self.steps.is_empty()
            && self.variable_updates.is_empty()
            && self.call_stack.is_empty()
            && self.returns.is_empty()
            && self.data_structures.is_empty()
            && self.pointer_assignments.is_empty()
            && self.allocations.is_empty()
    }
}

/// Analysis outcome for one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileTrace {
    pub file: String,
    pub trace: Option<TraceSpec>,
    pub error: Option<String>,
}

impl FileTrace {
    pub fn ok(file: impl Into<String>, trace: TraceSpec) -> Self {
        Self { file: file.into(), trace: Some(trace), error: None }
    }

    pub fn failed(file: impl Into<String>, error: impl ToString) -> Self {
        Self { file: file.into(), trace: None, error: Some(error.to_string()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_spec_serializes_all_collections() {
        let value = serde_json::to_value(TraceSpec::new()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "variables",
            "flow",
            "steps",
            "variableUpdates",
            "callStack",
            "returns",
            "dataStructures",
            "pointerAssignments",
            "allocations",
        ] {
            assert_eq!(obj.get(key), Some(&json!([])), "missing {}", key);
        }
    }

    #[test]
    fn test_variable_shape_is_flattened() {
        let var = Variable {
            name: "x".to_string(),
            line: 3,
            shape: VariableShape::Int { value: Some(ParsedInt::Number(5)) },
        };
        assert_eq!(
            serde_json::to_value(&var).unwrap(),
            json!({"name": "x", "line": 3, "type": "int", "value": 5})
        );

        let arr = Variable {
            name: "arr[]".to_string(),
            line: 1,
            shape: VariableShape::Array {
                values: Some(vec![ParsedInt::Number(1), ParsedInt::NaN]),
                value: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&arr).unwrap(),
            json!({"name": "arr[]", "line": 1, "type": "array", "values": [1, "NaN"], "value": null})
        );
        assert_eq!(arr.kind(), VarKind::Array);
    }

    #[test]
    fn test_step_and_flow_tags() {
        let step = Step::PointerAssign {
            line: 10,
            target: "curr->next".to_string(),
            value: "newNode".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&step).unwrap(),
            json!({"action": "pointer-assign", "line": 10, "target": "curr->next", "value": "newNode"})
        );
        assert_eq!(step.action(), "pointer-assign");

        let alloc = Step::Allocate { line: 2, type_name: Some("Node".to_string()), args: None };
        assert_eq!(
            serde_json::to_value(&alloc).unwrap(),
            json!({"action": "allocate", "line": 2, "type": "Node", "args": null})
        );

        let flow = FlowNode::If { condition: None, consequence: None, line: 4 };
        assert_eq!(serde_json::to_value(&flow).unwrap()["type"], json!("if"));
        assert_eq!(flow.line(), 4);
    }

    #[test]
    fn test_struct_field_keys() {
        let ds = DataStructure {
            kind: StructKind::Class,
            name: Some("Node".to_string()),
            fields: vec![StructField {
                type_text: Some("Node".to_string()),
                name: Some("*next".to_string()),
                is_pointer: true,
            }],
            line: 1,
        };
        let value = serde_json::to_value(&ds).unwrap();
        assert_eq!(value["type"], json!("class"));
        assert_eq!(value["fields"][0]["isPointer"], json!(true));
        assert_eq!(value["fields"][0]["type"], json!("Node"));
    }
}
