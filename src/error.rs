use thiserror::Error;

/// Failures surfaced by an analysis. Classification gaps are never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("failed to configure C++ parser: {0}")]
    ParserInit(String),

    #[error("parser produced no syntax tree")]
    ParseFailed,

    #[error("traversal limit exceeded: {limit} = {value}")]
    LimitExceeded { limit: &'static str, value: usize },
}
