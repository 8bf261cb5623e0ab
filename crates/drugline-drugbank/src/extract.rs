//! Record extractors: one flat table per entity type
//!
//! Each extractor walks the drugs under the export root (or, for pathways
//! and prices, every matching element in the document) in document order.
//! A required element that is missing aborts the extraction with
//! [`ExtractError::MissingField`]; missing leaf text becomes `None`.

use rustc_hash::FxHashSet;

use crate::document::{Element, Namespace};
use crate::error::{ExtractError, Result};
use crate::model::{ApprovalStatus, Drug, Interaction, Pathway, Price, Product, Synonym, Target};

/// Primary DrugBank id of a drug element
fn drug_id(drug: &Element, ns: &Namespace) -> Result<String> {
    drug.child_text(ns, "drugbank-id")?
        .ok_or_else(|| ExtractError::missing("drug/drugbank-id/text()"))
}

/// Trimmed, non-empty texts of a list element's children, in document order
pub(crate) fn text_entries(list: &Element) -> Vec<String> {
    list.children()
        .iter()
        .filter_map(Element::text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn extract_drugs(root: &Element, ns: &Namespace) -> Result<Vec<Drug>> {
    root.children()
        .iter()
        .map(|drug| {
            Ok(Drug {
                id: drug_id(drug, ns)?,
                name: drug.child_text(ns, "name")?,
                description: drug.child_text(ns, "description")?,
                state: drug.child_text(ns, "state")?,
                indication: drug.child_text(ns, "indication")?,
                mechanism_of_action: drug.child_text(ns, "mechanism-of-action")?,
                food_interactions: drug.find(ns, "food-interactions").map(text_entries),
            })
        })
        .collect()
}

pub fn extract_synonyms(root: &Element, ns: &Namespace) -> Result<Vec<Synonym>> {
    root.children()
        .iter()
        .map(|drug| {
            Ok(Synonym {
                id: drug_id(drug, ns)?,
                name: drug.child_text(ns, "name")?,
                synonyms: text_entries(drug.require(ns, "synonyms")?),
            })
        })
        .collect()
}

pub fn extract_products(root: &Element, ns: &Namespace) -> Result<Vec<Product>> {
    let mut products = Vec::new();

    for drug in root.children() {
        let id = drug_id(drug, ns)?;
        for product in drug.require(ns, "products")?.children() {
            products.push(Product {
                drug_id: id.clone(),
                name: product.child_text(ns, "name")?,
                labeller: product.child_text(ns, "labeller")?,
                ndc_product_code: product.child_text(ns, "ndc-product-code")?,
                dosage_form: product.child_text(ns, "dosage-form")?,
                route: product.child_text(ns, "route")?,
                strength: product.child_text(ns, "strength")?,
                country: product.child_text(ns, "country")?,
                source: product.child_text(ns, "source")?,
            });
        }
    }

    Ok(products)
}

/// Every pathway element in the document. Columns are read by position:
/// smpdb-id, name, category.
pub fn extract_pathways(root: &Element, ns: &Namespace) -> Result<Vec<Pathway>> {
    root.descendants_named(ns, "pathway")
        .map(|pathway| {
            let text_at = |i: usize| -> Result<Option<String>> {
                Ok(pathway.require_at(i)?.text().map(str::to_string))
            };
            Ok(Pathway {
                smpdb_id: text_at(0)?,
                name: text_at(1)?,
                category: text_at(2)?,
                drugs: None,
            })
        })
        .collect()
}

/// One row per drug target that carries a polypeptide record
pub fn extract_targets(root: &Element, ns: &Namespace) -> Result<Vec<Target>> {
    let mut targets = Vec::new();

    for drug in root.children() {
        let id = drug_id(drug, ns)?;
        for target in drug.require(ns, "targets")?.children() {
            let target_id = target.child_text(ns, "id")?;
            let Some(poly) = target.find(ns, "polypeptide") else {
                log::trace!("{id}: target {target_id:?} has no polypeptide, skipped");
                continue;
            };

            targets.push(Target {
                drug_id: id.clone(),
                target_id,
                source: poly.attr("source").map(str::to_string),
                source_id: poly.attr("id").map(str::to_string),
                polypeptide_name: poly.child_text(ns, "name")?,
                gene_name: poly.child_text(ns, "gene-name")?,
                genatlas_id: genatlas_id(poly.require(ns, "external-identifiers")?)?,
                chromosome_location: poly.child_text(ns, "chromosome-location")?,
                cellular_location: poly.child_text(ns, "cellular-location")?,
            });
        }
    }

    Ok(targets)
}

/// Identifier of the first external identifier whose resource is GenAtlas
fn genatlas_id(identifiers: &Element) -> Result<Option<String>> {
    for identifier in identifiers.children() {
        if identifier.require_at(0)?.text() == Some("GenAtlas") {
            return Ok(identifier.require_at(1)?.text().map(str::to_string));
        }
    }
    Ok(None)
}

pub fn extract_drug_approval_status(root: &Element, ns: &Namespace) -> Result<Vec<ApprovalStatus>> {
    root.children()
        .iter()
        .map(|drug| {
            let groups: FxHashSet<String> = drug
                .require(ns, "groups")?
                .children()
                .iter()
                .filter_map(Element::text)
                .map(str::to_lowercase)
                .collect();
            let has = |label: &str| groups.contains(label);

            Ok(ApprovalStatus {
                drug_id: drug_id(drug, ns)?,
                name: drug.child_text(ns, "name")?,
                approved: has("approved"),
                withdrawn: has("withdrawn"),
                experimental: has("experimental"),
                investigational: has("investigational"),
                vet_approved: has("vet_approved"),
            })
        })
        .collect()
}

/// Interactions as listed per drug; a symmetric pair shows up once per direction
pub fn extract_drug_interactions(root: &Element, ns: &Namespace) -> Result<Vec<Interaction>> {
    let mut interactions = Vec::new();

    for drug in root.children() {
        let drug_name = drug.child_text(ns, "name")?;
        let id = drug_id(drug, ns)?;
        for interaction in drug.require(ns, "drug-interactions")?.children() {
            interactions.push(Interaction {
                drug_name: drug_name.clone(),
                drug_id: id.clone(),
                interacts_with: interaction.child_text(ns, "name")?,
                interactee_id: interaction.child_text(ns, "drugbank-id")?,
                description: interaction.child_text(ns, "description")?,
            });
        }
    }

    Ok(interactions)
}

/// Every price element in the document; `cost` must parse as a float
pub fn extract_prices(root: &Element, ns: &Namespace) -> Result<Vec<Price>> {
    root.descendants_named(ns, "price")
        .map(|price| {
            let raw = price.child_text(ns, "cost")?.unwrap_or_default();
            let Ok(cost) = raw.trim().parse::<f64>() else {
                return Err(ExtractError::MalformedNumber {
                    path: "price/cost".to_string(),
                    value: raw,
                });
            };

            Ok(Price {
                description: price.child_text(ns, "description")?,
                cost,
                unit: price.child_text(ns, "unit")?,
                amount: None,
            })
        })
        .collect()
}
