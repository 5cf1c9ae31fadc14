//! Extract command - read load fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use drayscan_core::{native_extractor, Document, LoadDraft};

use super::output::{format_draft, format_fields, OutputFormat};
use super::{load_config, resolve_models, MANUAL_ENTRY_HINT};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (scanned image or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Print the new-load draft filled from the fields instead of the raw fields
    #[arg(long)]
    draft: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    resolve_models(&mut config, args.model_dir.as_deref())?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading document...");
    pb.set_position(10);
    let document = Document::from_path(&args.input)?;

    pb.set_message("Running OCR...");
    pb.set_position(30);
    let extractor = native_extractor(&config);
    let result = match extractor.extract_detailed(&document) {
        Ok(result) => result,
        Err(e) => {
            pb.abandon_with_message("Failed");
            eprintln!("{} {}", style("✗").red(), MANUAL_ENTRY_HINT);
            return Err(e.into());
        }
    };

    pb.finish_with_message("Done");

    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let output = if args.draft {
        format_draft(&LoadDraft::from_extracted(&result.fields), args.format)?
    } else {
        format_fields(&result.fields, args.format)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
