//! `drugline extract` - DrugBank export to parquet tables

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{
    Cell, CellAlignment, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use drugline_core::{ProgressContext, fmt_num};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// DrugBank XML export, plain or gzipped (default: from config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory for parquet files (default: from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Zstd compression level
    #[arg(long)]
    pub zstd_level: Option<i32>,
}

pub fn run(args: ExtractArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let mut pipeline = config.pipeline(args.input, args.output);
    if let Some(level) = args.zstd_level {
        pipeline.zstd_level = level;
    }

    let summary = drugline_drugbank::run(&pipeline, progress)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Table").fg(Color::Cyan),
            Cell::new("Rows").fg(Color::Cyan),
        ]);
    for (name, rows) in &summary.tables {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(fmt_num(*rows)).set_alignment(CellAlignment::Right),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Wrote {} tables to {} in {:.1}s",
        summary.tables.len(),
        pipeline.output_dir.display(),
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}
