pub mod analyzer;
pub mod heuristics;
pub mod node_kind;
pub mod trace;
