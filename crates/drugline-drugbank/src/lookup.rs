//! Pathway-count lookup by drug id
//!
//! Answers `{"drug_id": ...}` requests with `{"count": n}`, or
//! `{"error": "Drug not found"}` for ids missing from the counts table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::derive::extract_pathway_ids;
use crate::document::{Element, Namespace};
use crate::error::Result;
use crate::extract::extract_drugs;
use crate::model::PathwayDrugCount;

pub const NOT_FOUND: &str = "Drug not found";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupRequest {
    pub drug_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupResponse {
    Found { count: i64 },
    NotFound { error: &'static str },
}

/// Precomputed pathway-drug counts, built once per document
#[derive(Debug, Default)]
pub struct PathwayCountIndex {
    counts: FxHashMap<String, i64>,
}

impl PathwayCountIndex {
    pub fn new(rows: impl IntoIterator<Item = PathwayDrugCount>) -> Self {
        Self {
            counts: rows.into_iter().map(|r| (r.id, r.count)).collect(),
        }
    }

    pub fn from_root(root: &Element, ns: &Namespace) -> Result<Self> {
        let drugs = extract_drugs(root, ns)?;
        Ok(Self::new(extract_pathway_ids(root, ns, &drugs)?))
    }

    pub fn lookup(&self, drug_id: &str) -> LookupResponse {
        match self.counts.get(drug_id) {
            Some(&count) => LookupResponse::Found { count },
            None => LookupResponse::NotFound { error: NOT_FOUND },
        }
    }

    /// Answer one JSON request body with a JSON response body
    pub fn handle(&self, body: &str) -> serde_json::Result<String> {
        let request: LookupRequest = serde_json::from_str(body)?;
        serde_json::to_string(&self.lookup(&request.drug_id))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tests::sample;

    #[test]
    fn lookup_from_document() {
        let doc = sample();
        let index = PathwayCountIndex::from_root(doc.root(), &Namespace::drugbank()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("DB00001"), LookupResponse::Found { count: 1 });
        assert_eq!(index.lookup("DB00002"), LookupResponse::Found { count: 0 });
        assert_eq!(
            index.lookup("DB99999"),
            LookupResponse::NotFound { error: NOT_FOUND }
        );
    }

    #[test]
    fn response_json_shapes() {
        let found = serde_json::to_string(&LookupResponse::Found { count: 4 }).unwrap();
        assert_eq!(found, r#"{"count":4}"#);
        let not_found = LookupResponse::NotFound { error: NOT_FOUND };
        let missing = serde_json::to_string(&not_found).unwrap();
        assert_eq!(missing, r#"{"error":"Drug not found"}"#);
    }

    #[test]
    fn handle_request_body() {
        let index = PathwayCountIndex::new(vec![PathwayDrugCount {
            id: "DB00005".to_string(),
            count: 2,
        }]);
        assert_eq!(
            index.handle(r#"{"drug_id": "DB00005"}"#).unwrap(),
            r#"{"count":2}"#
        );
        assert_eq!(
            index.handle(r#"{"drug_id": "DB00006"}"#).unwrap(),
            r#"{"error":"Drug not found"}"#
        );
        assert!(index.handle(r#"{"id": "DB00005"}"#).is_err());
    }
}
