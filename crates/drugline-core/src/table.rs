//! Named Arrow tables with an optional key column
//!
//! Extracted entities are materialised as a single [`RecordBatch`]. Some
//! tables are keyed (one row per drug id); the key is stored as a regular
//! column but excluded from [`Table::shape`], so the reported width counts
//! value columns only.

use arrow::array::{ArrayRef, RecordBatch};

#[derive(Debug, Clone)]
pub struct Table {
    name: &'static str,
    key: Option<&'static str>,
    batch: RecordBatch,
}

impl Table {
    /// Unkeyed table: every column is a value column
    pub fn new(name: &'static str, batch: RecordBatch) -> Self {
        Self {
            name,
            key: None,
            batch,
        }
    }

    /// Table keyed by `key`, which must be a column of `batch`
    pub fn keyed(name: &'static str, key: &'static str, batch: RecordBatch) -> Self {
        debug_assert!(
            batch.schema().column_with_name(key).is_some(),
            "key column {key} missing from {name}"
        );
        Self {
            name,
            key: Some(key),
            batch,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> Option<&'static str> {
        self.key
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of value columns (key excluded)
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns() - usize::from(self.key.is_some())
    }

    /// (rows, value columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    /// Names of the value columns, in schema order
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .filter(|name| Some(name.as_str()) != self.key)
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};

    fn counts_batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("count", DataType::Int64, false),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(StringArray::from(vec!["DB00001", "DB00002", "DB00003"])),
                Arc::new(Int64Array::from(vec![2, 0, 5])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn keyed_shape_excludes_key() {
        let table = Table::keyed("counts", "id", counts_batch());
        assert_eq!(table.shape(), (3, 1));
        assert_eq!(table.column_names(), vec!["count".to_string()]);
        assert_eq!(table.key(), Some("id"));
    }

    #[test]
    fn unkeyed_shape_counts_all_columns() {
        let table = Table::new("counts", counts_batch());
        assert_eq!(table.shape(), (3, 2));
        assert!(table.key().is_none());
    }

    #[test]
    fn column_lookup() {
        let table = Table::keyed("counts", "id", counts_batch());
        assert!(table.column("count").is_some());
        assert!(table.column("missing").is_none());
    }
}
