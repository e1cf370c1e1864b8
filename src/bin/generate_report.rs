//! Generate a crop analysis report from a saved classification response.
//!
//! Usage:
//!   generate_report <response.json> <crop> [--date YYYY-MM-DD] [--json]
//!
//! Output directory, brand and locale overlay come from REPORT_OUTPUT_DIR,
//! REPORT_BRAND and REPORT_LOCALE_FILE.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_report::report::sink::{DrawSink, PdfSink, RecordingSink};
use crop_report::{ClassificationResponse, CropLabel, DirectoryStore, ReportConfig, ReportGenerator};

#[derive(Debug, Parser)]
#[command(name = "generate_report")]
#[command(about = "Render a crop analysis report from a classification response")]
struct Args {
    /// JSON body returned by the classification service
    response: PathBuf,

    /// rice, wheat, corn, potato or sugarcane
    crop: CropLabel,

    /// Report date (defaults to today, UTC)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Write the draw command list as JSON instead of a PDF
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_report=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ReportConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  REPORT_OUTPUT_DIR: {}", config.output_dir.display());
    tracing::info!("  REPORT_BRAND: {}", config.brand);
    if let Some(path) = &config.locale_file {
        tracing::info!("  REPORT_LOCALE_FILE: {}", path.display());
    }

    let body = std::fs::read_to_string(&args.response)
        .with_context(|| format!("Failed to read response file: {}", args.response.display()))?;
    let result = ClassificationResponse::from_json(&body)
        .and_then(ClassificationResponse::into_diagnosis)
        .with_context(|| format!("Failed to decode {}", args.response.display()))?;

    let store = DirectoryStore::new(config.output_dir.clone());
    let generator = ReportGenerator::from_config(config).context("Failed to load locale")?;

    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let mut sink: Box<dyn DrawSink> = if args.json {
        Box::new(RecordingSink::new())
    } else {
        Box::new(PdfSink::new())
    };

    let artifact = generator
        .synthesize_with(sink.as_mut(), &result, args.crop, date)
        .context("Report generation failed")?;

    let path = artifact
        .save(&store)
        .context("Report was generated but could not be saved; retry the download")?;

    println!("{}", path.display());
    Ok(())
}
