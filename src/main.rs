// parcel-auditor CLI - audit parcelamento statements into a table and spreadsheet
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parcel_auditor::config::{default_config_path, AuditorConfig};
use parcel_auditor::pdf_extraction::{ExtractionRouter, TesseractOcr};
use parcel_auditor::report::{self, SPREADSHEET_FILE_NAME, SPREADSHEET_MIME};
use parcel_auditor::run_paths;

#[derive(Parser, Debug)]
#[command(author, version, about = "Audit parcelamento PDF statements: extract, classify, export")]
struct Args {
    /// Explicit config file (otherwise $PARCEL_AUDITOR_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and classify each PDF, print the table and write the spreadsheet
    Audit {
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,

        /// Spreadsheet path
        #[arg(short, long, default_value = SPREADSHEET_FILE_NAME)]
        output: PathBuf,

        /// Skip writing the spreadsheet
        #[arg(long)]
        no_export: bool,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Pages read per document (overrides config)
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Check that pdftoppm and tesseract can be found
    Doctor,
    /// Print the resolved configuration
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Table,
    Json,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut config = AuditorConfig::resolve(args.config.as_deref())?;

    match args.command {
        Command::Audit {
            pdfs,
            output,
            no_export,
            format,
            pages,
        } => {
            if let Some(pages) = pages {
                config.page_limit = pages;
                config.validate().context("--pages")?;
            }
            audit(&config, &pdfs, &output, no_export, format)
        }
        Command::Doctor => {
            let status = TesseractOcr::is_available(&config);
            println!("pdftoppm:  {} ({})", mark(status.pdftoppm), config.tools.pdftoppm().display());
            println!(
                "tesseract: {} ({})",
                mark(status.tesseract),
                config.tools.tesseract_cmd.display()
            );
            Ok(if status.ready() { ExitCode::SUCCESS } else { ExitCode::from(2) })
        }
        Command::Config => {
            if let Some(path) = default_config_path() {
                println!("# default location: {}", path.display());
            }
            print!("{}", config.to_toml_string()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn audit(
    config: &AuditorConfig,
    pdfs: &[PathBuf],
    output: &Path,
    no_export: bool,
    format: Format,
) -> Result<ExitCode> {
    let router = ExtractionRouter::from_config(config);
    let outcome = run_paths(&router, pdfs);

    match format {
        Format::Table => print!("{}", report::render_table(&outcome)),
        Format::Json => println!("{}", report::to_json(&outcome)?),
    }

    if !no_export && !outcome.records.is_empty() {
        let written = report::write_xlsx(&outcome.records, output)?;
        info!("spreadsheet written to {} ({}, {} bytes)", output.display(), SPREADSHEET_MIME, written);
    }

    Ok(if outcome.is_clean() { ExitCode::SUCCESS } else { ExitCode::from(2) })
}

fn mark(ok: bool) -> &'static str {
    if ok { "found" } else { "missing" }
}
