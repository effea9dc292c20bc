use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{error, info, warn};

use crate::api::dto::{AnalyzeParams, CommandReq, CommandResp};
use crate::config::AppConfig;
use crate::infrastructure::CppAnalyzer;

/// Shared, read-only state for all connections.
#[derive(Debug, Clone, Default)]
pub struct ServerState {
    pub analyzer: CppAnalyzer,
    pub default_source: Option<PathBuf>,
}

impl ServerState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            analyzer: CppAnalyzer::new(config.analyzer),
            default_source: config.server.default_source.clone(),
        }
    }
}

pub fn start_server(config: &AppConfig) -> Result<()> {
    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!(%address, "Stepwise API server listening");
    serve(listener, Arc::new(ServerState::from_config(config)))
}

/// Accept connections forever, one thread per connection.
pub fn serve(listener: TcpListener, state: Arc<ServerState>) -> Result<()> {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    if let Err(e) = handle_connection(stream, &state) {
                        error!(error = %e, "connection error");
                    }
                });
            }
            Err(e) => warn!(error = %e, "accept error"),
        }
    }
    Ok(())
}

fn handle_connection(mut stream: TcpStream, state: &ServerState) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request = serde_json::from_str::<CommandReq>(trimmed).context("Invalid JSON format");
        let shutdown = matches!(&request, Ok(req) if req.command == "SHUTDOWN");
        let response = CommandResp::from(request.and_then(|req| process_command(req, state)));

        let response_str = serde_json::to_string(&response)?;
        stream.write_all(response_str.as_bytes())?;
        stream.write_all(b"\n")?;

        if shutdown {
            info!("shutdown requested");
            stream.flush()?;
            std::process::exit(0);
        }
    }
    Ok(())
}

fn process_command(req: CommandReq, state: &ServerState) -> Result<serde_json::Value> {
    match req.command.as_str() {
        "PING" => Ok(json!("PONG")),
        "ANALYZE" => handle_analyze(req.params, state),
        "SHUTDOWN" => Ok(json!("Shutting down...")),
        _ => anyhow::bail!("Unknown command: {}", req.command),
    }
}

fn handle_analyze(params: Option<serde_json::Value>, state: &ServerState) -> Result<serde_json::Value> {
    let params: AnalyzeParams = match params {
        Some(value) => serde_json::from_value(value).context("Invalid params for ANALYZE")?,
        None => AnalyzeParams::default(),
    };

    let source = match (params.source, params.path) {
        (Some(source), _) => source,
        (None, Some(path)) => read_source(Path::new(&path))?,
        (None, None) => {
            let path = state
                .default_source
                .as_deref()
                .context("Failed to read code file: no source given and no default_source configured")?;
            read_source(path)?
        }
    };

    let trace = state.analyzer.analyze(&source).context("Failed to parse code")?;
    info!(steps = trace.steps.len(), "analysis served");
    Ok(serde_json::to_value(trace)?)
}

fn read_source(path: &Path) -> Result<String> {
    info!(path = %path.display(), "reading source file");
    fs::read_to_string(path).with_context(|| format!("Failed to read code file {}", path.display()))
}
