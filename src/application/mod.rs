use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::trace::FileTrace;
use crate::infrastructure::CppAnalyzer;
use crate::ports::TraceExporter;

pub struct AnalyzeUsecase<'a> {
    pub analyzer: &'a CppAnalyzer,
    pub exporter: &'a dyn TraceExporter,
}

impl<'a> AnalyzeUsecase<'a> {
    /// Analyze every (path, source) pair in parallel, keeping input order.
    /// A failing file is recorded in its `FileTrace` instead of aborting the batch.
    pub fn analyze_all(&self, sources: &[(String, String)]) -> Vec<FileTrace> {
        let analyzer = self.analyzer;
        sources
            .par_iter()
            .map(|(path, code)| match analyzer.analyze(code) {
                Ok(trace) => FileTrace::ok(path.as_str(), trace),
                Err(e) => {
                    warn!(file = %path, error = %e, "analysis failed");
                    FileTrace::failed(path.as_str(), e)
                }
            })
            .collect()
    }

    /// Analyze, render with the exporter, and write to `output` (stdout when `None`).
    pub fn run(&self, sources: &[(String, String)], output: Option<&str>) -> Result<Vec<FileTrace>> {
        let traces = self.analyze_all(sources);
        let rendered = self.exporter.render(&traces)?;

        match output {
            Some(path) => {
                fs::write(path, &rendered).with_context(|| format!("Failed to write {}", path))?;
                info!(files = traces.len(), output = path, "analysis written");
            }
            None => println!("{}", rendered),
        }
        Ok(traces)
    }
}
