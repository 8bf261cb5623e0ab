//! Typed rows to Arrow tables

use std::sync::Arc;

use arrow::array::*;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use drugline_core::Table;
use rustc_hash::FxHashSet;

use crate::error::{ExtractError, Result};
use crate::model::{
    ApprovalStatus, ApprovalSummary, Drug, Interaction, Pathway, PathwayDrug, PathwayDrugCount,
    Price, Product, Synonym, Target,
};
use crate::schema;

fn batch(schema: &SchemaRef, arrays: Vec<ArrayRef>) -> RecordBatch {
    RecordBatch::try_new(Arc::clone(schema), arrays).expect("schema mismatch")
}

fn keys<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}

fn strings<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ArrayRef {
    Arc::new(values.collect::<StringArray>())
}

fn string_lists<'a>(rows: impl Iterator<Item = Option<&'a [String]>>) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for row in rows {
        match row {
            Some(items) => {
                for item in items {
                    builder.values().append_value(item);
                }
                builder.append(true);
            }
            None => builder.append(false),
        }
    }
    Arc::new(builder.finish())
}

fn flags(values: impl Iterator<Item = bool>) -> ArrayRef {
    Arc::new(values.map(Some).collect::<BooleanArray>())
}

/// Keyed tables reject repeated keys instead of silently keeping both rows
fn ensure_unique<'a>(table: &'static str, values: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for value in values {
        if !seen.insert(value) {
            return Err(ExtractError::DuplicateKey {
                table,
                key: value.to_string(),
            });
        }
    }
    Ok(())
}

pub fn drugs_table(rows: &[Drug]) -> Result<Table> {
    ensure_unique("drugs", rows.iter().map(|r| r.id.as_str()))?;
    let arrays = vec![
        keys(rows.iter().map(|r| r.id.as_str())),
        strings(rows.iter().map(|r| r.name.as_deref())),
        strings(rows.iter().map(|r| r.description.as_deref())),
        strings(rows.iter().map(|r| r.state.as_deref())),
        strings(rows.iter().map(|r| r.indication.as_deref())),
        strings(rows.iter().map(|r| r.mechanism_of_action.as_deref())),
        string_lists(rows.iter().map(|r| r.food_interactions.as_deref())),
    ];
    Ok(Table::keyed("drugs", "id", batch(&schema::DRUGS, arrays)))
}

pub fn synonyms_table(rows: &[Synonym]) -> Result<Table> {
    ensure_unique("synonyms", rows.iter().map(|r| r.id.as_str()))?;
    let arrays = vec![
        keys(rows.iter().map(|r| r.id.as_str())),
        strings(rows.iter().map(|r| r.name.as_deref())),
        string_lists(rows.iter().map(|r| Some(r.synonyms.as_slice()))),
    ];
    Ok(Table::keyed("synonyms", "id", batch(&schema::SYNONYMS, arrays)))
}

pub fn products_table(rows: &[Product]) -> Table {
    let arrays = vec![
        keys(rows.iter().map(|r| r.drug_id.as_str())),
        strings(rows.iter().map(|r| r.name.as_deref())),
        strings(rows.iter().map(|r| r.labeller.as_deref())),
        strings(rows.iter().map(|r| r.ndc_product_code.as_deref())),
        strings(rows.iter().map(|r| r.dosage_form.as_deref())),
        strings(rows.iter().map(|r| r.route.as_deref())),
        strings(rows.iter().map(|r| r.strength.as_deref())),
        strings(rows.iter().map(|r| r.country.as_deref())),
        strings(rows.iter().map(|r| r.source.as_deref())),
    ];
    Table::new("products", batch(&schema::PRODUCTS, arrays))
}

fn pathway_columns(rows: &[Pathway]) -> Vec<ArrayRef> {
    vec![
        strings(rows.iter().map(|r| r.smpdb_id.as_deref())),
        strings(rows.iter().map(|r| r.name.as_deref())),
        strings(rows.iter().map(|r| r.category.as_deref())),
    ]
}

/// Pathways as extracted: smpdb id, name and category. Member drugs are ignored.
pub fn pathways_table(rows: &[Pathway]) -> Table {
    Table::new("pathways", batch(&schema::PATHWAYS, pathway_columns(rows)))
}

/// Output of `derive::append_pathway_drugs`, always with the `drugs` column.
/// A row whose member names were never attached gets a null list.
pub fn enriched_pathways_table(rows: &[Pathway]) -> Table {
    let mut arrays = pathway_columns(rows);
    arrays.push(string_lists(rows.iter().map(|r| r.drugs.as_deref())));
    Table::new("pathways", batch(&schema::PATHWAYS_WITH_DRUGS, arrays))
}

pub fn pathway_drug_counts_table(rows: &[PathwayDrugCount]) -> Result<Table> {
    ensure_unique("pathway_drug_counts", rows.iter().map(|r| r.id.as_str()))?;
    let arrays: Vec<ArrayRef> = vec![
        keys(rows.iter().map(|r| r.id.as_str())),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.count))),
    ];
    Ok(Table::keyed(
        "pathway_drug_counts",
        "id",
        batch(&schema::PATHWAY_DRUG_COUNTS, arrays),
    ))
}

pub fn exploded_pathways_table(rows: &[PathwayDrug]) -> Table {
    let arrays = vec![strings(rows.iter().map(|r| r.drug.as_deref()))];
    Table::new("pathway_members", batch(&schema::EXPLODED_PATHWAYS, arrays))
}

pub fn targets_table(rows: &[Target]) -> Table {
    let arrays = vec![
        keys(rows.iter().map(|r| r.drug_id.as_str())),
        strings(rows.iter().map(|r| r.target_id.as_deref())),
        strings(rows.iter().map(|r| r.source.as_deref())),
        strings(rows.iter().map(|r| r.source_id.as_deref())),
        strings(rows.iter().map(|r| r.polypeptide_name.as_deref())),
        strings(rows.iter().map(|r| r.gene_name.as_deref())),
        strings(rows.iter().map(|r| r.genatlas_id.as_deref())),
        strings(rows.iter().map(|r| r.chromosome_location.as_deref())),
        strings(rows.iter().map(|r| r.cellular_location.as_deref())),
    ];
    Table::new("targets", batch(&schema::TARGETS, arrays))
}

pub fn approval_status_table(rows: &[ApprovalStatus]) -> Table {
    let arrays = vec![
        keys(rows.iter().map(|r| r.drug_id.as_str())),
        strings(rows.iter().map(|r| r.name.as_deref())),
        flags(rows.iter().map(|r| r.approved)),
        flags(rows.iter().map(|r| r.withdrawn)),
        flags(rows.iter().map(|r| r.experimental)),
        flags(rows.iter().map(|r| r.investigational)),
        flags(rows.iter().map(|r| r.vet_approved)),
    ];
    Table::new("approval_status", batch(&schema::APPROVAL_STATUS, arrays))
}

pub fn approval_summary_table(rows: &[ApprovalSummary]) -> Table {
    let arrays: Vec<ArrayRef> = vec![
        keys(rows.iter().map(|r| r.status.as_str())),
        Arc::new(Int64Array::from_iter_values(
            rows.iter().map(|r| r.number_of_drugs),
        )),
    ];
    Table::new("approval_summary", batch(&schema::APPROVAL_SUMMARY, arrays))
}

pub fn interactions_table(rows: &[Interaction]) -> Table {
    let arrays = vec![
        strings(rows.iter().map(|r| r.drug_name.as_deref())),
        keys(rows.iter().map(|r| r.drug_id.as_str())),
        strings(rows.iter().map(|r| r.interacts_with.as_deref())),
        strings(rows.iter().map(|r| r.interactee_id.as_deref())),
        strings(rows.iter().map(|r| r.description.as_deref())),
    ];
    Table::new("interactions", batch(&schema::INTERACTIONS, arrays))
}

fn price_columns(rows: &[Price]) -> Vec<ArrayRef> {
    vec![
        strings(rows.iter().map(|r| r.description.as_deref())),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.cost))),
        strings(rows.iter().map(|r| r.unit.as_deref())),
    ]
}

pub fn prices_table(rows: &[Price]) -> Table {
    Table::new("prices", batch(&schema::PRICES, price_columns(rows)))
}

/// Output of `derive::filter_prices`; rows without an amount count as 0
pub fn filtered_prices_table(rows: &[Price]) -> Table {
    let mut arrays = price_columns(rows);
    arrays.push(Arc::new(Float64Array::from_iter_values(
        rows.iter().map(|r| r.amount.unwrap_or(0.0)),
    )));
    Table::new("filtered_prices", batch(&schema::FILTERED_PRICES, arrays))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drug(id: &str) -> Drug {
        Drug {
            id: id.to_string(),
            name: Some(format!("Drug {id}")),
            ..Default::default()
        }
    }

    #[test]
    fn drugs_table_shape_excludes_key() {
        let mut with_food = drug("DB00001");
        with_food.food_interactions = Some(vec!["Take with food.".to_string()]);
        let table = drugs_table(&[with_food, drug("DB00002")]).unwrap();

        assert_eq!(table.shape(), (2, 6));
        let food = table
            .column("food_interactions")
            .unwrap()
            .as_any()
            .downcast_ref::<ListArray>()
            .unwrap();
        assert!(food.is_valid(0));
        assert_eq!(food.value(0).len(), 1);
        assert!(food.is_null(1));
    }

    #[test]
    fn drugs_table_rejects_duplicates() {
        let err = drugs_table(&[drug("DB00001"), drug("DB00001")]).unwrap_err();
        assert_eq!(err.to_string(), "duplicate key in drugs: DB00001");
    }

    #[test]
    fn synonyms_table_empty_lists_are_not_null() {
        let rows = vec![Synonym {
            id: "DB00002".to_string(),
            name: None,
            synonyms: vec![],
        }];
        let table = synonyms_table(&rows).unwrap();
        let lists = table
            .column("synonyms")
            .unwrap()
            .as_any()
            .downcast_ref::<ListArray>()
            .unwrap();
        assert!(lists.is_valid(0));
        assert_eq!(lists.value(0).len(), 0);
    }

    #[test]
    fn pathway_tables_choose_schema_by_function() {
        let plain = vec![Pathway {
            smpdb_id: Some("SMP0000278".to_string()),
            ..Default::default()
        }];
        assert_eq!(pathways_table(&plain).shape(), (1, 3));
        assert_eq!(enriched_pathways_table(&plain).shape(), (1, 4));

        let enriched = vec![Pathway {
            drugs: Some(vec!["Lepirudin".to_string()]),
            ..plain[0].clone()
        }];
        assert_eq!(pathways_table(&enriched).shape(), (1, 3));
        let table = enriched_pathways_table(&enriched);
        assert_eq!(table.shape(), (1, 4));
        let drugs = table
            .column("drugs")
            .unwrap()
            .as_any()
            .downcast_ref::<ListArray>()
            .unwrap();
        assert_eq!(drugs.value(0).len(), 1);
    }

    #[test]
    fn enriched_pathways_table_keeps_drugs_column_when_empty() {
        let table = enriched_pathways_table(&[]);
        assert_eq!(table.shape(), (0, 4));
        assert!(table.column("drugs").is_some());
        assert_eq!(pathways_table(&[]).shape(), (0, 3));
    }

    #[test]
    fn pathway_counts_single_value_column() {
        let rows = vec![
            PathwayDrugCount {
                id: "DB00001".to_string(),
                count: 3,
            },
            PathwayDrugCount {
                id: "DB00002".to_string(),
                count: 0,
            },
        ];
        let table = pathway_drug_counts_table(&rows).unwrap();
        assert_eq!(table.shape(), (2, 1));
        assert_eq!(table.column_names(), vec!["count".to_string()]);
    }

    #[test]
    fn approval_tables() {
        let rows = vec![ApprovalStatus {
            drug_id: "DB00001".to_string(),
            approved: true,
            ..Default::default()
        }];
        assert_eq!(approval_status_table(&rows).shape(), (1, 7));

        let summary = crate::derive::summarise_drug_approval_status(&rows);
        let table = approval_summary_table(&summary);
        assert_eq!(table.shape(), (5, 2));
        let counts = table
            .column("number_of_drugs")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(counts.value(0), 1);
    }

    #[test]
    fn price_tables() {
        let rows = vec![Price {
            description: Some("Refludan 50 mg vial".to_string()),
            cost: 273.19,
            unit: Some("vial".to_string()),
            amount: Some(50.0),
        }];
        assert_eq!(prices_table(&rows).shape(), (1, 3));

        let filtered = filtered_prices_table(&rows);
        assert_eq!(filtered.shape(), (1, 4));
        let amount = filtered
            .column("amount")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(amount.value(0), 50.0);
    }

    #[test]
    fn empty_tables_keep_schema() {
        assert_eq!(products_table(&[]).shape(), (0, 9));
        assert_eq!(interactions_table(&[]).shape(), (0, 5));
        assert_eq!(targets_table(&[]).shape(), (0, 9));
        assert_eq!(exploded_pathways_table(&[]).shape(), (0, 1));
    }
}
