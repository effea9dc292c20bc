// Infrastructure implementations for Stepwise.

pub mod concurrency;
pub mod cpp_tree;
pub mod source_loader;

pub use cpp_tree::{analyze, CppAnalyzer, CppNode};
pub use source_loader::SourceLoader;

use std::fmt::Write;

use anyhow::Result;

use crate::domain::trace::{FileTrace, Step};
use crate::ports::TraceExporter;

/// JSON output. A single file renders as its bare trace specification.
pub struct JsonExporter;
impl TraceExporter for JsonExporter {
    fn render(&self, traces: &[FileTrace]) -> Result<String> {
        let json = match traces {
            [single] => match &single.trace {
                Some(trace) => serde_json::to_string_pretty(trace)?,
                None => serde_json::to_string_pretty(single)?,
            },
            many => serde_json::to_string_pretty(many)?,
        };
        Ok(json)
    }
}

/// Plain text timeline, one numbered line per step.
pub struct TimelineExporter;
impl TraceExporter for TimelineExporter {
    fn render(&self, traces: &[FileTrace]) -> Result<String> {
        let mut out = String::new();
        for ft in traces {
            writeln!(out, "== {} ==", ft.file)?;
            match (&ft.trace, &ft.error) {
                (Some(trace), _) => {
                    for (i, step) in trace.steps.iter().enumerate() {
                        writeln!(out, "{:>4}  L{:<5} {}", i + 1, step.line(), describe_step(step))?;
                    }
                    if !trace.call_stack.is_empty() {
                        writeln!(out, "  recursive calls: {}", trace.call_stack.len())?;
                    }
                }
                (None, Some(err)) => writeln!(out, "  error: {}", err)?,
                (None, None) => {}
            }
        }
        Ok(out)
    }
}

/// Short human-readable summary of a step.
pub fn describe_step(step: &Step) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    match step {
        Step::Declare { var, value, .. } => format!("declare {} = {}", var, opt(value)),
        Step::Assign { var, value, .. } => format!("assign {} = {}", var, value),
        Step::PointerAssign { target, value, .. } => format!("pointer-assign {} = {}", target, value),
        Step::LoopStart { condition, .. } => format!("loop-start {}", opt(condition)),
        Step::ConditionCheck { condition, .. } => format!("condition-check {}", opt(condition)),
        Step::Call { function, args, .. } => format!("call {}{}", function, args),
        Step::Return { value, .. } => format!("return {}", value),
        Step::Allocate { type_name, args, .. } => {
            format!("allocate {}({})", opt(type_name), opt(args))
        }
    }
}
