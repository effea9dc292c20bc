// Main library entry point for Stepwise.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use domain::analyzer::AnalyzerLimits;
pub use domain::trace::TraceSpec;
pub use error::AnalyzeError;
pub use infrastructure::{analyze, CppAnalyzer};
