//! Drugline Core - Common infrastructure for drug data pipelines
//!
//! Tables, Parquet output, logging and progress reporting shared by the
//! DrugBank extraction crate and the CLI.

pub mod logging;
pub mod progress;
pub mod sink;
pub mod table;

// Re-exports for convenience
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use sink::{ParquetSink, cleanup_tmp_files, is_valid_parquet, write_table};
pub use table::Table;
