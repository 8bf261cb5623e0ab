//! Integration tests for drugline-drugbank
//!
//! These tests need the 100-drug DrugBank sample export and are marked
//! #[ignore] by default. Point DRUGBANK_SAMPLE at the file (defaults to
//! `drugbank_partial.xml` in the working directory).
//! Run with: cargo test -p drugline-drugbank --test integration -- --ignored

use drugline_drugbank::derive::{append_pathway_drugs, extract_pathway_ids, filter_prices};
use drugline_drugbank::extract::{
    extract_drug_interactions, extract_drugs, extract_pathways, extract_prices, extract_products,
    extract_synonyms,
};
use drugline_drugbank::transform::{drugs_table, pathway_drug_counts_table, products_table};
use drugline_drugbank::{Config, Document, Namespace, PathwayCountIndex, build_tables, transform};
use parquet::file::reader::{FileReader, SerializedFileReader};
use tempfile::TempDir;

fn sample_path() -> std::path::PathBuf {
    std::env::var("DRUGBANK_SAMPLE")
        .unwrap_or_else(|_| "drugbank_partial.xml".to_string())
        .into()
}

fn load_sample() -> Document {
    let path = sample_path();
    Document::from_path(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
#[ignore]
fn sample_table_shapes() {
    let doc = load_sample();
    let ns = Namespace::drugbank();
    let root = doc.root();

    let drugs = extract_drugs(root, &ns).unwrap();
    assert_eq!(drugs_table(&drugs).unwrap().shape(), (100, 6));

    let products = products_table(&extract_products(root, &ns).unwrap());
    assert_eq!(products.shape(), (4584, 9));

    let interactions = extract_drug_interactions(root, &ns).unwrap();
    assert_eq!(interactions.len(), 50688);

    let prices = extract_prices(root, &ns).unwrap();
    assert_eq!(prices.len(), 499);
    assert_eq!(filter_prices(&prices).len(), 176);

    let counts = extract_pathway_ids(root, &ns, &drugs).unwrap();
    assert_eq!(pathway_drug_counts_table(&counts).unwrap().shape(), (102, 1));

    let pathways = extract_pathways(root, &ns).unwrap();
    let enriched = append_pathway_drugs(root, &ns, &pathways).unwrap();
    let plain = transform::pathways_table(&pathways);
    assert_eq!(plain.shape(), (pathways.len(), 3));
    let enriched = transform::enriched_pathways_table(&enriched);
    assert_eq!(enriched.shape(), (pathways.len(), 4));
}

#[test]
#[ignore]
fn sample_first_drug() {
    let doc = load_sample();
    let ns = Namespace::drugbank();
    let drugs = extract_drugs(doc.root(), &ns).unwrap();
    assert_eq!(drugs[0].id, "DB00001");
    assert_eq!(drugs[0].name.as_deref(), Some("Lepirudin"));

    let synonyms = extract_synonyms(doc.root(), &ns).unwrap();
    let db00100 = synonyms
        .iter()
        .find(|s| s.id == "DB00100")
        .expect("DB00100 present in sample");
    assert_eq!(db00100.synonyms.len(), 7);
}

#[test]
#[ignore]
fn sample_lookup_matches_counts() {
    let doc = load_sample();
    let ns = Namespace::drugbank();
    let index = PathwayCountIndex::from_root(doc.root(), &ns).unwrap();
    assert_eq!(index.len(), 102);

    let body = index.handle(r#"{"drug_id": "DB99999"}"#).unwrap();
    assert_eq!(body, r#"{"error":"Drug not found"}"#);
}

#[test]
#[ignore]
fn sample_pipeline_writes_all_tables() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        input: sample_path(),
        output_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    };

    let summary = drugline_drugbank::run(&config, &drugline_core::ProgressContext::hidden())
        .expect("Pipeline should succeed");
    assert_eq!(summary.tables.len(), 12);

    let doc = load_sample();
    let tables = build_tables(doc.root(), &Namespace::drugbank()).unwrap();
    for table in tables.iter() {
        let path = temp_dir.path().join(format!("{}.parquet", table.name()));
        let file = std::fs::File::open(&path).unwrap();
        let reader = SerializedFileReader::new(file)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let rows = reader.metadata().file_metadata().num_rows();
        assert_eq!(rows as usize, table.num_rows(), "{}", table.name());
    }
}
