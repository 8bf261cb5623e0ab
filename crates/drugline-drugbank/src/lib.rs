//! Drugline DrugBank - DrugBank XML export to tables
//!
//! Loads a DrugBank export once and derives flat tables from it: drugs,
//! synonyms, products, pathways, targets, approval groups, drug-drug
//! interactions and prices, plus tables derived from those (pathway drug
//! counts, approval summary, normalised prices).
//!
//! # Example
//!
//! ```ignore
//! use drugline_drugbank::{Document, Namespace, extract};
//!
//! let doc = Document::from_path("drugbank_partial.xml")?;
//! let drugs = extract::extract_drugs(doc.root(), &Namespace::drugbank())?;
//! println!("{} drugs", drugs.len());
//! ```

pub mod config;
pub mod derive;
pub mod document;
pub mod error;
pub mod extract;
pub mod generator;
pub mod lookup;
pub mod model;
pub mod runner;
pub mod schema;
pub mod transform;

// Re-exports
pub use config::Config;
pub use document::{Document, Element, Namespace};
pub use error::{ExtractError, Result};
pub use lookup::{LookupResponse, PathwayCountIndex};
pub use runner::{Summary, Tables, build_tables, run};
