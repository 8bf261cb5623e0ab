//! DrugBank pipeline configuration

use std::path::PathBuf;

use crate::document::Namespace;

/// Runtime configuration for the extraction pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// DrugBank XML export (`.xml` or `.xml.gz`)
    pub input: PathBuf,
    /// Output directory for parquet files
    pub output_dir: PathBuf,
    /// Namespace URI the export's elements live in
    pub namespace: String,
    /// Zstd compression level for parquet output
    pub zstd_level: i32,
}

impl Config {
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.namespace.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("drugbank_partial.xml"),
            output_dir: PathBuf::from("output"),
            namespace: Namespace::DRUGBANK_URI.to_string(),
            zstd_level: 3,
        }
    }
}
