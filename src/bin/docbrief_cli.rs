use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use docbrief::{
    config::Config,
    logging,
    processing::{Document, LengthTier, Provenance, SummaryPipeline, SummaryReport},
};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "docbrief-cli",
    version,
    about = "Extract text from a PDF or image and summarize it"
)]
struct Cli {
    /// Document to summarize (pdf, png, jpg, jpeg, tiff, bmp, gif).
    path: PathBuf,
    /// Summary length.
    #[arg(long, value_enum, default_value_t = LengthArg::Medium)]
    length: LengthArg,
    /// Skip the remote provider and always use the extractive summary.
    #[arg(long)]
    offline: bool,
    /// Print a JSON object instead of the bare summary.
    #[arg(long)]
    json: bool,
    /// Log pipeline progress to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LengthArg {
    Short,
    Medium,
    Long,
}

impl From<LengthArg> for LengthTier {
    fn from(value: LengthArg) -> Self {
        match value {
            LengthArg::Short => LengthTier::Short,
            LengthArg::Medium => LengthTier::Medium,
            LengthArg::Long => LengthTier::Long,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOutput<'a> {
    original_name: &'a str,
    extracted_text: &'a str,
    summary: &'a str,
    summary_length: LengthTier,
    provenance: Provenance,
}

impl<'a> From<&'a SummaryReport> for CliOutput<'a> {
    fn from(report: &'a SummaryReport) -> Self {
        Self {
            original_name: &report.original_name,
            extracted_text: report.extracted.as_str(),
            summary: &report.summary.text,
            summary_length: report.tier,
            provenance: report.summary.provenance,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_tracing(cli.verbose);

    let config = Config::load().context("failed to load configuration")?;
    let mut pipeline = SummaryPipeline::from_config(&config).context("failed to build pipeline")?;
    if cli.offline {
        pipeline = pipeline.without_generation();
    }

    let bytes = tokio::fs::read(&cli.path)
        .await
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let name = cli
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", cli.path.display()))?;
    let document = Document::new(name, bytes)?;

    let report = pipeline
        .process(document, cli.length.into())
        .await
        .with_context(|| format!("failed to summarize {}", cli.path.display()))?;

    if cli.json {
        let output = serde_json::to_string_pretty(&CliOutput::from(&report))
            .context("failed to encode output")?;
        println!("{output}");
    } else {
        println!("{}", report.summary.text);
    }
    Ok(())
}
