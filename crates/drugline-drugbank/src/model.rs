//! Typed rows of the extracted tables
//!
//! Leaf text that may be absent in the export is `Option<String>`; ids that
//! key a table are plain `String`.

/// Approval group labels, in the order their flags are reported
pub const APPROVAL_GROUPS: [&str; 5] = [
    "approved",
    "withdrawn",
    "experimental",
    "investigational",
    "vet_approved",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drug {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub indication: Option<String>,
    pub mechanism_of_action: Option<String>,
    /// `None` when the drug has no food-interactions element at all
    pub food_interactions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synonym {
    pub id: String,
    pub name: Option<String>,
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub drug_id: String,
    pub name: Option<String>,
    pub labeller: Option<String>,
    pub ndc_product_code: Option<String>,
    pub dosage_form: Option<String>,
    pub route: Option<String>,
    pub strength: Option<String>,
    pub country: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pathway {
    pub smpdb_id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    /// Member drug names; filled in by `derive::append_pathway_drugs`
    pub drugs: Option<Vec<String>>,
}

/// Number of pathways a drug takes part in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayDrugCount {
    pub id: String,
    pub count: i64,
}

/// One (pathway, member drug) pair with the pathway columns dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayDrug {
    pub drug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Target {
    pub drug_id: String,
    pub target_id: Option<String>,
    pub source: Option<String>,
    pub source_id: Option<String>,
    pub polypeptide_name: Option<String>,
    pub gene_name: Option<String>,
    pub genatlas_id: Option<String>,
    pub chromosome_location: Option<String>,
    pub cellular_location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalStatus {
    pub drug_id: String,
    pub name: Option<String>,
    pub approved: bool,
    pub withdrawn: bool,
    pub experimental: bool,
    pub investigational: bool,
    pub vet_approved: bool,
}

impl ApprovalStatus {
    /// Flags in [`APPROVAL_GROUPS`] order
    pub fn flags(&self) -> [bool; 5] {
        [
            self.approved,
            self.withdrawn,
            self.experimental,
            self.investigational,
            self.vet_approved,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalSummary {
    pub status: String,
    pub number_of_drugs: i64,
}

/// A directed drug-drug interaction as listed under the source drug
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    pub drug_name: Option<String>,
    pub drug_id: String,
    pub interacts_with: Option<String>,
    pub interactee_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Price {
    pub description: Option<String>,
    pub cost: f64,
    pub unit: Option<String>,
    /// Quantity parsed from the description; set by `derive::filter_prices`
    pub amount: Option<f64>,
}
