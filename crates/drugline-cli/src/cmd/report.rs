//! `drugline report` - summary tables for an export

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{
    Cell, CellAlignment, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use drugline_core::fmt_num;
use drugline_drugbank::{Document, derive, extract};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// DrugBank XML export (default: from config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Rows shown in ranked tables (default: from config)
    #[arg(long)]
    pub top: Option<usize>,
}

fn counts_table(label: &str, rows: &[(String, usize)], top: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(label).fg(Color::Cyan),
            Cell::new("Count").fg(Color::Cyan),
        ]);
    for (value, count) in rows.iter().take(top) {
        table.add_row(vec![
            Cell::new(value),
            Cell::new(fmt_num(*count)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn run(args: ReportArgs, config: &Config) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.drugbank.input.clone());
    let top = args.top.unwrap_or(config.report.top_n);
    let doc = Document::from_path(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let ns = config.namespace();
    let root = doc.root();

    let statuses = extract::extract_drug_approval_status(root, &ns)?;
    let summary: Vec<(String, usize)> = derive::summarise_drug_approval_status(&statuses)
        .into_iter()
        .map(|row| (row.status, row.number_of_drugs as usize))
        .collect();

    let pathways = extract::extract_pathways(root, &ns)?;
    let pathways = derive::append_pathway_drugs(root, &ns, &pathways)?;
    let frequency = derive::pathway_drug_frequency(&derive::explode_pathways(&pathways));
    let locations = derive::cellular_location_counts(&extract::extract_targets(root, &ns)?);

    eprintln!("\nApproval status ({} drugs)", fmt_num(statuses.len()));
    eprintln!("{}", counts_table("Status", &summary, summary.len()));
    eprintln!("\nDrugs in most pathways (top {top})");
    eprintln!("{}", counts_table("Drug", &frequency, top));
    eprintln!("\nTarget cellular locations (top {top})");
    eprintln!("{}", counts_table("Location", &locations, top));
    Ok(())
}
