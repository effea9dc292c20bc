use serde::{Deserialize, Serialize};

/// One request line: `{"command": "...", "params": {...}}`.
#[derive(Debug, Deserialize)]
pub struct CommandReq {
    pub command: String,
    pub params: Option<serde_json::Value>,
}

/// Parameters of `ANALYZE`. With neither field set the server falls back to
/// its configured default source file.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub source: Option<String>,
    pub path: Option<String>,
}

/// One response line.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CommandResp {
    Success { data: serde_json::Value },
    Error { message: String },
}

impl From<anyhow::Result<serde_json::Value>> for CommandResp {
    fn from(result: anyhow::Result<serde_json::Value>) -> Self {
        match result {
            Ok(data) => CommandResp::Success { data },
            Err(e) => CommandResp::Error { message: format!("{:#}", e) },
        }
    }
}
