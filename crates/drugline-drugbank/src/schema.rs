//! Arrow schema definitions for the DrugBank tables

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// Helper: create List<Utf8> type
fn list_utf8() -> DataType {
    DataType::List(Arc::new(Field::new("item", DataType::Utf8, true)))
}

fn utf8(name: &str) -> Field {
    Field::new(name, DataType::Utf8, true)
}

fn key(name: &str) -> Field {
    Field::new(name, DataType::Utf8, false)
}

/// Keyed by `id`
pub static DRUGS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("id"),
        utf8("name"),
        utf8("description"),
        utf8("state"),
        utf8("indication"),
        utf8("mechanism_of_action"),
        Field::new("food_interactions", list_utf8(), true),
    ]))
});

/// Keyed by `id`
pub static SYNONYMS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("id"),
        utf8("name"),
        Field::new("synonyms", list_utf8(), false),
    ]))
});

pub static PRODUCTS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("drug_id"),
        utf8("name"),
        utf8("labeller"),
        utf8("ndc_product_code"),
        utf8("dosage_form"),
        utf8("route"),
        utf8("strength"),
        utf8("country"),
        utf8("source"),
    ]))
});

pub static PATHWAYS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        utf8("smpdb_id"),
        utf8("name"),
        utf8("category"),
    ]))
});

/// Pathways with their member drug names attached
pub static PATHWAYS_WITH_DRUGS: LazyLock<SchemaRef> = LazyLock::new(|| {
    let mut fields: Vec<Field> = PATHWAYS
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.push(Field::new("drugs", list_utf8(), true));
    Arc::new(Schema::new(fields))
});

/// Keyed by `id`
pub static PATHWAY_DRUG_COUNTS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("id"),
        Field::new("count", DataType::Int64, false),
    ]))
});

pub static EXPLODED_PATHWAYS: LazyLock<SchemaRef> =
    LazyLock::new(|| Arc::new(Schema::new(vec![utf8("drug")])));

pub static TARGETS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("drug_id"),
        utf8("target_id"),
        utf8("source"),
        utf8("source_id"),
        utf8("polypeptide_name"),
        utf8("gene_name"),
        utf8("genatlas_id"),
        utf8("chromosome_location"),
        utf8("cellular_location"),
    ]))
});

pub static APPROVAL_STATUS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("drug_id"),
        utf8("name"),
        Field::new("approved", DataType::Boolean, false),
        Field::new("withdrawn", DataType::Boolean, false),
        Field::new("experimental", DataType::Boolean, false),
        Field::new("investigational", DataType::Boolean, false),
        Field::new("vet_approved", DataType::Boolean, false),
    ]))
});

pub static APPROVAL_SUMMARY: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("status"),
        Field::new("number_of_drugs", DataType::Int64, false),
    ]))
});

pub static INTERACTIONS: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        utf8("drug_name"),
        key("drug_id"),
        utf8("interacts_with"),
        utf8("interactee_id"),
        utf8("interaction_description"),
    ]))
});

pub static PRICES: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        utf8("description"),
        Field::new("cost", DataType::Float64, false),
        utf8("unit"),
    ]))
});

/// Prices with the parsed quantity
pub static FILTERED_PRICES: LazyLock<SchemaRef> = LazyLock::new(|| {
    let mut fields: Vec<Field> = PRICES
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.push(Field::new("amount", DataType::Float64, false));
    Arc::new(Schema::new(fields))
});
