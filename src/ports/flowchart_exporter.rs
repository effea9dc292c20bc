//! Flowchart DOT Exporter
//!
//! Renders the step timeline of each trace as a Graphviz flowchart: one node
//! per step, edges in timeline order, one cluster per file.

use anyhow::Result;

use crate::domain::trace::{FileTrace, Step};
use crate::infrastructure::describe_step;
use crate::ports::TraceExporter;

pub struct FlowchartExporter;

impl TraceExporter for FlowchartExporter {
    fn render(&self, traces: &[FileTrace]) -> Result<String> {
        Ok(Self::to_dot(traces))
    }
}

impl FlowchartExporter {
    /// Convert traces to a DOT string.
    pub fn to_dot(traces: &[FileTrace]) -> String {
        let mut lines = Vec::new();

        lines.push("digraph FlowChart {".to_string());
        lines.push("    rankdir=TB;".to_string());
        lines.push("    nodesep=0.8;".to_string());
        lines.push("    ranksep=0.6;".to_string());
        lines.push("    node [fontname=\"Helvetica\", fontsize=12];".to_string());
        lines.push("    edge [fontname=\"Helvetica\", fontsize=10];".to_string());

        for (file_idx, ft) in traces.iter().enumerate() {
            let Some(trace) = &ft.trace else { continue };

            lines.push("".to_string());
            lines.push(format!("    subgraph cluster_{} {{", file_idx));
            lines.push(format!("        label=\"{}\";", Self::escape_label(&ft.file)));

            for (i, step) in trace.steps.iter().enumerate() {
                let (shape, color, style) = Self::node_style(step);
                let label = format!("L{}: {}", step.line(), describe_step(step));
                lines.push(format!(
                    "        \"f{}s{}\" [label=\"{}\", shape={}, style=\"{}\", fillcolor=\"{}\", color=\"{}\"];",
                    file_idx,
                    i,
                    Self::escape_label(&label),
                    shape,
                    style,
                    color,
                    Self::border_color(step)
                ));
            }

            for i in 1..trace.steps.len() {
                lines.push(format!(
                    "        \"f{}s{}\" -> \"f{}s{}\" [label=\"{}\"];",
                    file_idx,
                    i - 1,
                    file_idx,
                    i,
                    i
                ));
            }
            lines.push("    }".to_string());
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    fn node_style(step: &Step) -> (&'static str, &'static str, &'static str) {
        match step {
            Step::Declare { .. } => ("box", "#a6e3a1", "filled,rounded"),       // Green
            Step::Assign { .. } => ("box", "#89b4fa", "filled"),                // Blue
            Step::PointerAssign { .. } => ("box", "#94e2d5", "filled"),         // Teal
            Step::ConditionCheck { .. } => ("diamond", "#f9e2af", "filled"),    // Yellow
            Step::LoopStart { .. } => ("hexagon", "#cba6f7", "filled"),         // Purple
            Step::Call { .. } => ("box", "#89dceb", "filled"),                  // Sky
            Step::Return { .. } => ("box", "#f38ba8", "filled,rounded"),        // Red
            Step::Allocate { .. } => ("box3d", "#fab387", "filled"),            // Peach
        }
    }

    fn border_color(step: &Step) -> &'static str {
        match step {
            Step::Declare { .. } => "#40a02b",
            Step::Assign { .. } => "#1e66f5",
            Step::PointerAssign { .. } => "#179299",
            Step::ConditionCheck { .. } => "#df8e1d",
            Step::LoopStart { .. } => "#8839ef",
            Step::Call { .. } => "#04a5e5",
            Step::Return { .. } => "#d20f39",
            Step::Allocate { .. } => "#fe640b",
        }
    }

    fn escape_label(label: &str) -> String {
        label
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}
