//! drugline - DrugBank export to analysis tables
//!
//! Extracts drugs, products, pathways, targets, interactions and prices
//! from a DrugBank XML export into Parquet, and answers pathway-count
//! lookups against the same export.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use drugline_core::{SharedProgress, Verbosity};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "drugline")]
#[command(about = "DrugBank XML export to analysis tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./drugline.toml or ~/.config/drugline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract every table from an export into parquet files
    Extract(cmd::extract::ExtractArgs),
    /// Look up how many pathways reference a drug
    Lookup(cmd::lookup::LookupArgs),
    /// Print approval, pathway and target summaries
    Report(cmd::report::ReportArgs),
    /// Append synthetic drugs to an export
    Generate(cmd::generate::GenerateArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress: SharedProgress = Arc::new(drugline_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug, spinners show activity
    //   non-TTY: info unless --debug, logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    drugline_core::init_logging(Verbosity::from_flags(is_tty, cli.debug), multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Extract(args) => cmd::extract::run(args, &config, &progress),
        Command::Lookup(args) => cmd::lookup::run(args, &config),
        Command::Report(args) => cmd::report::run(args, &config),
        Command::Generate(args) => cmd::generate::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Output directory",
                &config.output.default_dir.display().to_string(),
            ]);
            table.add_row(vec![
                "Compression level",
                &config.output.compression_level.to_string(),
            ]);
            table.add_row(vec![
                "DrugBank input",
                &config.drugbank.input.display().to_string(),
            ]);
            table.add_row(vec!["Namespace", &config.drugbank.namespace]);
            table.add_row(vec!["Report rows", &config.report.top_n.to_string()]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
