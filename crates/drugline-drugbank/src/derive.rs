//! Derived tables built from already-extracted ones
//!
//! Every builder takes its inputs by reference and returns new rows.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::document::{Element, Namespace};
use crate::error::{ExtractError, Result};
use crate::model::{
    APPROVAL_GROUPS, ApprovalStatus, ApprovalSummary, Drug, Pathway, PathwayDrug,
    PathwayDrugCount, Price, Target,
};

/// Integer or decimal token, as found in price descriptions
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d*\.*\d+").expect("valid number pattern"));

/// For every pathway in the document, the text of `field` on each member
/// drug of its `drugs` list. Members without that field are skipped.
fn pathway_members(root: &Element, ns: &Namespace, field: &str) -> Result<Vec<Vec<String>>> {
    root.descendants_named(ns, "pathway")
        .map(|pathway| {
            Ok(pathway
                .require(ns, "drugs")?
                .iter()
                .filter_map(|member| member.find(ns, field))
                .filter_map(Element::text)
                .map(str::to_string)
                .collect())
        })
        .collect()
}

/// Attach member drug names to each pathway.
///
/// `pathways` must come from [`crate::extract::extract_pathways`] on the same
/// document, so rows line up with pathway elements.
pub fn append_pathway_drugs(
    root: &Element,
    ns: &Namespace,
    pathways: &[Pathway],
) -> Result<Vec<Pathway>> {
    let members = pathway_members(root, ns, "name")?;
    if members.len() != pathways.len() {
        return Err(ExtractError::LengthMismatch {
            table: "pathways",
            expected: pathways.len(),
            found: members.len(),
        });
    }

    Ok(pathways
        .iter()
        .zip(members)
        .map(|(pathway, drugs)| Pathway {
            drugs: Some(drugs),
            ..pathway.clone()
        })
        .collect())
}

/// Number of pathway memberships per drug id.
///
/// Counts every (pathway, member id) pair, then outer-joins with the known
/// drugs so each of them appears, with 0 when it is in no pathway. Rows are
/// ordered by drug id.
pub fn extract_pathway_ids(
    root: &Element,
    ns: &Namespace,
    drugs: &[Drug],
) -> Result<Vec<PathwayDrugCount>> {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    let members = pathway_members(root, ns, "drugbank-id")?;
    for id in members.into_iter().flatten() {
        *counts.entry(id).or_default() += 1;
    }
    for drug in drugs {
        counts.entry(drug.id.clone()).or_default();
    }

    Ok(counts
        .into_iter()
        .map(|(id, count)| PathwayDrugCount { id, count })
        .collect())
}

/// One row per (pathway, member drug name). A pathway without members
/// still yields one row, with a null drug.
pub fn explode_pathways(pathways: &[Pathway]) -> Vec<PathwayDrug> {
    let mut rows = Vec::new();
    for pathway in pathways {
        let Some(drugs) = pathway.drugs.as_deref().filter(|d| !d.is_empty()) else {
            rows.push(PathwayDrug { drug: None });
            continue;
        };
        for drug in drugs {
            rows.push(PathwayDrug {
                drug: Some(drug.clone()),
            });
        }
    }
    rows
}

/// Number of drugs carrying each approval flag. Flags are not exclusive.
pub fn summarise_drug_approval_status(statuses: &[ApprovalStatus]) -> Vec<ApprovalSummary> {
    let mut totals = [0i64; 5];
    for status in statuses {
        for (total, flag) in totals.iter_mut().zip(status.flags()) {
            *total += i64::from(flag);
        }
    }

    APPROVAL_GROUPS
        .iter()
        .zip(totals)
        .map(|(group, number_of_drugs)| ApprovalSummary {
            status: group.to_string(),
            number_of_drugs,
        })
        .collect()
}

/// The quantity in a price description: the single numeric token, or 0
/// when there is none or more than one.
pub fn amount_from_description(description: &str) -> f64 {
    let mut tokens = NUMBER.find_iter(description);
    match (tokens.next(), tokens.next()) {
        (Some(only), None) => only.as_str().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Keep prices with a usable quantity and put it in `amount`.
///
/// Drops rows with no single positive quantity, unit `box` or `kit`, or a
/// description mentioning `unit`. Microgram quantities (` mcg`) are divided
/// by 1000 to match the milligram scale of the rest.
pub fn filter_prices(prices: &[Price]) -> Vec<Price> {
    prices
        .iter()
        .filter_map(|price| {
            let description = price.description.as_deref()?;
            let mut amount = amount_from_description(description);

            if amount <= 0.0 || matches!(price.unit.as_deref(), Some("box" | "kit")) {
                return None;
            }
            if description.contains("unit") {
                return None;
            }
            if description.contains(" mcg") {
                amount /= 1000.0;
            }

            Some(Price {
                amount: Some(amount),
                ..price.clone()
            })
        })
        .collect()
}

/// Occurrences per value, most frequent first, ties by value
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// How many pathways each drug name appears in.
///
/// Rows are ordered most frequent first (ties by name) so the head of the
/// list is the top-N report. Callers plotting one bar per drug in name
/// order should sort the result by name themselves.
pub fn pathway_drug_frequency(exploded: &[PathwayDrug]) -> Vec<(String, usize)> {
    value_counts(exploded.iter().filter_map(|row| row.drug.as_deref()))
}

/// How many targets sit in each cellular location
pub fn cellular_location_counts(targets: &[Target]) -> Vec<(String, usize)> {
    value_counts(targets.iter().filter_map(|t| t.cellular_location.as_deref()))
}
