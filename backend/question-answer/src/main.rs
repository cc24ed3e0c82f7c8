use anyhow::{Context, Result};
use clap::Parser;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use question_answer::{
    config::{Config, LogFormat},
    metrics::render_metrics,
    services::HydrationService,
};

/// Hydrate question-answer JSON into its typed form and print the normalized result
#[derive(Debug, Parser)]
#[command(name = "qa-hydrate", version)]
struct Args {
    /// Input files; reads stdin when empty or `-`
    files: Vec<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Print Prometheus metrics to stderr before exiting
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    tracing::info!(
        "Starting qa-hydrate (unknown answer types: {})",
        config.unknown_answer_type.as_str()
    );

    let service = HydrationService::new(&config);

    let sources = if args.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.files.clone()
    };

    for source in &sources {
        let document = read_source(source)?;
        let hydrated = service
            .hydrate_document(&document)
            .with_context(|| format!("Failed to hydrate {}", source.display()))?;

        let output = if args.pretty {
            serde_json::to_string_pretty(&hydrated)?
        } else {
            serde_json::to_string(&hydrated)?
        };
        println!("{}", output);
    }

    if args.metrics {
        eprintln!("{}", render_metrics()?);
    }

    Ok(())
}

fn read_source(source: &Path) -> Result<String> {
    if source.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source.display()))
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "question_answer=info,qa_hydrate=info".into());

    let (text_layer, json_layer) = match format {
        LogFormat::Text => (Some(fmt::layer().with_writer(io::stderr)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_writer(io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .init();
}
