// Command-line entry point for Stepwise.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stepwise::api::server;
use stepwise::application::AnalyzeUsecase;
use stepwise::config::{AppConfig, OutputFormat};
use stepwise::infrastructure::concurrency;
use stepwise::infrastructure::{CppAnalyzer, SourceLoader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input C++ source file (can specify multiple)
    #[arg(short, long)]
    input: Vec<String>,

    /// Input source folder(s), scanned recursively
    #[arg(short = 'd', long)]
    folder: Vec<String>,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format, overrides the config file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the analysis server instead of a one-shot analysis (optional port)
    #[arg(long, num_args = 0..=1, default_missing_value = "0")]
    serve: Option<u16>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    if let Err(e) = run(Cli::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    if let Some(port) = cli.serve {
        if port != 0 {
            config.server.port = port;
        }
        return server::start_server(&config);
    }

    let mut sources = SourceLoader::load_files(&cli.input)?;
    for folder in &cli.folder {
        sources.extend(SourceLoader::load_folder(Path::new(folder))?);
    }
    if sources.is_empty() {
        bail!("Please provide at least one --input <file> or --folder <dir>, or use --serve");
    }
    info!(files = sources.len(), "collected sources");

    if let Err(e) = concurrency::init_thread_pool() {
        info!(error = %e, "using existing thread pool");
    }

    let analyzer = CppAnalyzer::new(config.analyzer);
    let exporter = config.output.format.exporter();
    let usecase = AnalyzeUsecase {
        analyzer: &analyzer,
        exporter: exporter.as_ref(),
    };

    let traces = usecase.run(&sources, cli.output.as_deref())?;
    let failed = traces.iter().filter(|t| t.error.is_some()).count();
    if failed > 0 {
        bail!("{} of {} files failed to analyze", failed, traces.len());
    }
    Ok(())
}
