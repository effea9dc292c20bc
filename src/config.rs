//! Configuration
//!
//! Optional TOML file; every field has a default so an absent file or an
//! empty table is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::domain::analyzer::AnalyzerLimits;
use crate::infrastructure::{JsonExporter, TimelineExporter};
use crate::ports::flowchart_exporter::FlowchartExporter;
use crate::ports::TraceExporter;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analyzer: AnalyzerLimits,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// File analyzed when an ANALYZE request names no source.
    pub default_source: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            default_source: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
    Dot,
}

impl OutputFormat {
    pub fn exporter(&self) -> Box<dyn TraceExporter> {
        match self {
            OutputFormat::Json => Box::new(JsonExporter),
            OutputFormat::Text => Box::new(TimelineExporter),
            OutputFormat::Dot => Box::new(FlowchartExporter),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let text = fs::read_to_string(p)
                    .with_context(|| format!("Cannot read config file {}", p.display()))?;
                Self::from_toml_str(&text)
                    .with_context(|| format!("Invalid config file {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
