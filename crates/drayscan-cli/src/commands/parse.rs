//! Parse command - run the field rules on recognized text.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use drayscan_core::{FieldParser, LoadDraft, RuleBasedParser};

use super::output::{format_draft, format_fields, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file to parse (default: stdin)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the new-load draft filled from the fields
    #[arg(long)]
    draft: bool,

    /// List the fields that could not be detected
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ParseArgs) -> anyhow::Result<()> {
    let text = match &args.input {
        Some(path) => {
            info!("Parsing text from {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let result = RuleBasedParser::new().parse(&text);

    let output = if args.draft {
        format_draft(&LoadDraft::from_extracted(&result.fields), args.format)?
    } else {
        format_fields(&result.fields, args.format)?
    };
    println!("{}", output);

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("!").yellow(), warning);
        }
    }

    Ok(())
}
