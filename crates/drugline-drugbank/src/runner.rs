//! Main runner for the DrugBank pipeline

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use drugline_core::{ProgressContext, Table, cleanup_tmp_files, fmt_num, write_table};

use crate::config::Config;
use crate::derive;
use crate::document::{Document, Element, Namespace};
use crate::extract;
use crate::transform;

/// Every table the pipeline produces from one export
#[derive(Debug)]
pub struct Tables {
    pub drugs: Table,
    pub synonyms: Table,
    pub products: Table,
    /// Pathways with member drug names attached
    pub pathways: Table,
    pub pathway_drug_counts: Table,
    pub pathway_members: Table,
    pub targets: Table,
    pub approval_status: Table,
    pub approval_summary: Table,
    pub interactions: Table,
    pub prices: Table,
    pub filtered_prices: Table,
}

impl Tables {
    /// Tables in output order
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        [
            &self.drugs,
            &self.synonyms,
            &self.products,
            &self.pathways,
            &self.pathway_drug_counts,
            &self.pathway_members,
            &self.targets,
            &self.approval_status,
            &self.approval_summary,
            &self.interactions,
            &self.prices,
            &self.filtered_prices,
        ]
        .into_iter()
    }
}

/// Extract and derive every table from a loaded export
pub fn build_tables(root: &Element, ns: &Namespace) -> crate::Result<Tables> {
    let drugs = extract::extract_drugs(root, ns)?;
    let pathways = extract::extract_pathways(root, ns)?;
    let pathways = derive::append_pathway_drugs(root, ns, &pathways)?;
    let counts = derive::extract_pathway_ids(root, ns, &drugs)?;
    let statuses = extract::extract_drug_approval_status(root, ns)?;
    let interactions = extract::extract_drug_interactions(root, ns)?;
    let prices = extract::extract_prices(root, ns)?;

    Ok(Tables {
        drugs: transform::drugs_table(&drugs)?,
        synonyms: transform::synonyms_table(&extract::extract_synonyms(root, ns)?)?,
        products: transform::products_table(&extract::extract_products(root, ns)?),
        pathways: transform::enriched_pathways_table(&pathways),
        pathway_drug_counts: transform::pathway_drug_counts_table(&counts)?,
        pathway_members: transform::exploded_pathways_table(&derive::explode_pathways(&pathways)),
        targets: transform::targets_table(&extract::extract_targets(root, ns)?),
        approval_status: transform::approval_status_table(&statuses),
        approval_summary: transform::approval_summary_table(
            &derive::summarise_drug_approval_status(&statuses),
        ),
        interactions: transform::interactions_table(&interactions),
        prices: transform::prices_table(&prices),
        filtered_prices: transform::filtered_prices_table(&derive::filter_prices(&prices)),
    })
}

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    /// (table name, rows written)
    pub tables: Vec<(&'static str, usize)>,
    pub elapsed: Duration,
}

impl Summary {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|(_, rows)| rows).sum()
    }
}

/// Run the DrugBank pipeline: load the export, build every table, write parquet
pub fn run(config: &Config, progress: &ProgressContext) -> Result<Summary> {
    let start = Instant::now();

    std::fs::create_dir_all(&config.output_dir).context("Failed to create output directory")?;
    cleanup_tmp_files(&config.output_dir).context("Failed to remove stale temp files")?;

    let pb = progress.stage_line("load");
    pb.set_message(config.input.display().to_string());
    log::info!("Loading {}", config.input.display());
    let doc = Document::from_path(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;
    pb.finish_and_clear();

    let ns = config.namespace();
    let tables = build_tables(doc.root(), &ns)?;
    log::info!("Built tables from {} drugs", fmt_num(tables.drugs.num_rows()));

    let mut written = Vec::new();
    for table in tables.iter() {
        let pb = progress.stage_line(table.name());
        pb.set_message(format!("{} rows", fmt_num(table.num_rows())));
        let rows = write_table(table, &config.output_dir, config.zstd_level)
            .with_context(|| format!("Failed to write {}", table.name()))?;
        pb.finish_and_clear();

        let (r, c) = table.shape();
        log::info!("{}: {} rows x {} columns", table.name(), fmt_num(r), c);
        written.push((table.name(), rows));
    }

    let summary = Summary {
        tables: written,
        elapsed: start.elapsed(),
    };

    log::info!("=== DrugBank Pipeline Summary ===");
    log::info!("Tables: {}", summary.tables.len());
    log::info!("Rows: {}", fmt_num(summary.total_rows()));
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tests::{SAMPLE_XML, sample};
    use drugline_core::is_valid_parquet;

    #[test]
    fn build_tables_shapes() {
        let tables = build_tables(sample().root(), &Namespace::drugbank()).unwrap();
        assert_eq!(tables.drugs.shape(), (2, 6));
        assert_eq!(tables.pathways.shape(), (1, 4));
        assert_eq!(tables.pathway_drug_counts.shape(), (3, 1));
        assert_eq!(tables.pathway_members.shape(), (2, 1));
        assert_eq!(tables.targets.num_rows(), 2);
        assert_eq!(tables.approval_summary.shape(), (5, 2));
        assert_eq!(tables.prices.num_rows(), 3);
        assert_eq!(tables.filtered_prices.num_rows(), 2);
        assert_eq!(tables.iter().count(), 12);
    }

    #[test]
    fn table_names_are_unique() {
        let tables = build_tables(sample().root(), &Namespace::drugbank()).unwrap();
        let mut names: Vec<&str> = tables.iter().map(Table::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn run_writes_parquet_per_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("drugbank.xml");
        std::fs::write(&input, SAMPLE_XML).unwrap();
        let config = Config {
            input,
            output_dir: dir.path().join("out"),
            ..Config::default()
        };

        let summary = run(&config, &ProgressContext::hidden()).unwrap();
        assert_eq!(summary.tables.len(), 12);
        for (name, _) in &summary.tables {
            let path = config.output_dir.join(format!("{name}.parquet"));
            assert!(is_valid_parquet(&path), "{name} not written");
        }
        assert!(summary.tables.contains(&("drugs", 2)));
    }

    #[test]
    fn run_missing_input_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            input: dir.path().join("absent.xml"),
            output_dir: dir.path().join("out"),
            ..Config::default()
        };
        let err = run(&config, &ProgressContext::hidden()).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
