use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_forecast::{validate_input, DataLoader, PipelineReport};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

/// Validate smart grid energy records and render a forecast report
#[derive(Debug, Parser)]
#[command(name = "grid_report", version, about)]
struct Cli {
    /// JSON or CSV payload to read; `-` or omitted reads stdin
    input: Option<PathBuf>,

    /// Document format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log per-row detail
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "grid_forecast=debug"
    } else {
        "grid_forecast=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the payload from `input`, falling back to `stdin` for `-` or no path
fn read_payload(input: Option<&Path>, mut stdin: impl Read) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => DataLoader::read_input(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display())),
        _ => {
            let mut payload = String::new();
            stdin
                .read_to_string(&mut payload)
                .context("Failed to read input from stdin")?;
            Ok(payload)
        }
    }
}

fn render(payload: &str, format: OutputFormat) -> Result<String> {
    let batch = validate_input(payload);
    let report = PipelineReport::from_batch(&batch)?;
    let document = match format {
        OutputFormat::Markdown => report.to_markdown(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    Ok(document)
}

fn write_document(document: &str, output: Option<&Path>, mut stdout: impl Write) -> Result<()> {
    match output {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("Failed to write report to '{}'", path.display()))?,
        None => {
            stdout.write_all(document.as_bytes())?;
            if !document.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let payload = read_payload(cli.input.as_deref(), io::stdin())?;
    info!(bytes = payload.len(), "processing payload");

    let document = render(&payload, cli.format)?;
    write_document(&document, cli.output.as_deref(), io::stdout().lock())
}
