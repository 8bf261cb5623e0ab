//! Synthetic drug records for test fixtures
//!
//! New drugs get a fresh id and, for every other element a drug carries,
//! a deep copy of that element taken from a randomly chosen existing drug.

use std::ops::RangeInclusive;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::document::{Document, Element, Namespace};
use crate::error::Result;

/// Marker stored in `created-by` on generated ids
pub const CREATED_BY: &str = "tolo";

/// `DB` followed by the number zero-padded to five digits; wider numbers are kept whole
pub fn int_to_db_string(value: u32) -> String {
    format!("DB{value:05}")
}

fn generated_id(root: &Element, id: u32) -> Element {
    let mut element = root.named_like("drugbank-id");
    element.set_attr("primary", "true");
    element.set_attr("created-by", CREATED_BY);
    element.set_text(int_to_db_string(id));
    element
}

/// Append one generated drug per id in `ids` to the document root.
///
/// The element layout is taken from the first existing drug. Generated drugs
/// are never used as copy sources. Ids are not checked against the ones
/// already present. Returns the number of drugs appended.
pub fn generate_drugs<R: Rng + ?Sized>(
    doc: &mut Document,
    ns: &Namespace,
    ids: RangeInclusive<u32>,
    rng: &mut R,
) -> usize {
    let root = doc.root();
    let existing = root.children();
    let tags: Vec<&str> = existing
        .first()
        .map(|drug| {
            drug.children()
                .iter()
                .map(Element::local_name)
                .filter(|tag| *tag != "drugbank-id")
                .collect()
        })
        .unwrap_or_default();

    let mut generated = Vec::new();
    for id in ids {
        log::debug!("Generating {}", int_to_db_string(id));
        let mut drug = root.named_like("drug");
        drug.push(generated_id(root, id));

        for tag in &tags {
            let subtree = existing
                .choose(&mut *rng)
                .and_then(|source| source.find(ns, tag));
            drug.push(match subtree {
                Some(subtree) => subtree.clone(),
                None => root.named_like(tag),
            });
        }
        generated.push(drug);
    }

    let count = generated.len();
    let root = doc.root_mut();
    for drug in generated {
        root.push(drug);
    }
    count
}

/// Read `input`, append generated drugs for `first_id..=last_id`, write `output`
pub fn generate_random<R: Rng + ?Sized>(
    first_id: u32,
    last_id: u32,
    input: &Path,
    output: &Path,
    ns: &Namespace,
    rng: &mut R,
) -> Result<usize> {
    let mut doc = Document::from_path(input)?;
    let count = generate_drugs(&mut doc, ns, first_id..=last_id, rng);

    log::info!("Writing {} generated drugs to {}", count, output.display());
    doc.save(output)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tests::{SAMPLE_XML, sample};
    use crate::extract::{extract_drug_interactions, extract_drugs};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ns() -> Namespace {
        Namespace::drugbank()
    }

    #[test]
    fn db_string_padding() {
        assert_eq!(int_to_db_string(123), "DB00123");
        assert_eq!(int_to_db_string(0), "DB00000");
        assert_eq!(int_to_db_string(1), "DB00001");
        assert_eq!(int_to_db_string(2), "DB00002");
        assert_eq!(int_to_db_string(20000), "DB20000");
        assert_eq!(int_to_db_string(1234567), "DB1234567");
    }

    #[test]
    fn generated_drugs_are_extractable() {
        let mut doc = sample();
        let mut rng = StdRng::seed_from_u64(7);
        let added = generate_drugs(&mut doc, &ns(), 90000..=90002, &mut rng);
        assert_eq!(added, 3);

        let drugs = extract_drugs(doc.root(), &ns()).unwrap();
        assert_eq!(drugs.len(), 5);
        let ids: Vec<&str> = drugs[2..].iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["DB90000", "DB90001", "DB90002"]);
        for drug in &drugs[2..] {
            let name = drug.name.as_deref().unwrap();
            assert!(["Lepirudin", "Cetuximab"].contains(&name), "{name}");
        }

        // Interactions copy from either source drug
        assert!(extract_drug_interactions(doc.root(), &ns()).unwrap().len() >= 5);
    }

    #[test]
    fn generated_id_attributes() {
        let mut doc = sample();
        let mut rng = StdRng::seed_from_u64(1);
        generate_drugs(&mut doc, &ns(), 5..=5, &mut rng);

        let drug = doc.root().children().last().unwrap();
        let id = drug.child_at(0).unwrap();
        assert_eq!(id.local_name(), "drugbank-id");
        assert_eq!(id.attr("primary"), Some("true"));
        assert_eq!(id.attr("created-by"), Some(CREATED_BY));
        assert_eq!(id.text(), Some("DB00005"));
        // Every element except the second drugbank-id of the template drug
        let template = doc.root().child_at(0).unwrap();
        assert_eq!(drug.children().len(), template.children().len() - 1);
    }

    #[test]
    fn missing_subtree_becomes_empty_element() {
        // The first drug has food-interactions, the second does not
        let mut doc = sample();
        let mut rng = StdRng::seed_from_u64(3);
        generate_drugs(&mut doc, &ns(), 1..=40, &mut rng);

        let foods: Vec<&Element> = doc.root().children()[2..]
            .iter()
            .filter_map(|d| d.find(&ns(), "food-interactions"))
            .collect();
        assert_eq!(foods.len(), 40);
        assert!(foods.iter().any(|f| f.children().is_empty()));
        assert!(foods.iter().any(|f| !f.children().is_empty()));
    }

    #[test]
    fn empty_range_generates_nothing() {
        let mut doc = sample();
        let mut rng = StdRng::seed_from_u64(0);
        #[allow(clippy::reversed_empty_ranges)]
        let added = generate_drugs(&mut doc, &ns(), 10..=9, &mut rng);
        assert_eq!(added, 0);
        assert_eq!(doc.root().children().len(), 2);
    }

    #[test]
    fn generate_random_writes_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.xml");
        let output = dir.path().join("out.xml");
        std::fs::write(&input, SAMPLE_XML).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let ns = ns();
        let added = generate_random(100, 101, &input, &output, &ns, &mut rng).unwrap();
        assert_eq!(added, 2);

        let written = Document::from_path(&output).unwrap();
        let drugs = extract_drugs(written.root(), &ns).unwrap();
        assert_eq!(drugs.len(), 4);
        assert_eq!(drugs[3].id, "DB00101");
    }
}
