use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::RegionException;
use crate::domain::SampleRow;
use crate::tables::{CountryRow, GenIdRow, MissingRegionRow};

/// Region/sub-region assignment for one political-entity spelling.
#[derive(Debug, Clone, Default)]
pub struct RegionClass {
    pub region: Option<String>,
    pub sub_region: Option<String>,
    pub notes: Option<String>,
}

/// A row the generic region join could not classify.
#[derive(Debug, Clone, Serialize)]
pub struct UnresolvedRegion {
    #[serde(rename = "genID")]
    pub gen_id: String,
    #[serde(rename = "masterID")]
    pub master_id: Option<String>,
    pub political_entity: Option<String>,
}

#[derive(Default)]
struct MergedEntry {
    edited_name: Option<String>,
    region: Option<String>,
    sub_region: Option<String>,
    notes: Option<String>,
}

/// Outer-merges the country table with the manual missing-region table on
/// `name`, then keys the result by the spelling the annotation actually uses:
/// `edited_name` when the manual table provides one, the plain name otherwise.
/// Region and sub-region fall back to the manual columns.
pub fn build_classifier(
    countries: &[CountryRow],
    fixes: &[MissingRegionRow],
) -> HashMap<String, RegionClass> {
    let mut merged: HashMap<String, MergedEntry> = HashMap::new();

    for country in countries {
        let entry = merged.entry(country.name.clone()).or_default();
        entry.region = country.region.clone();
        entry.sub_region = country.sub_region.clone();
    }

    for fix in fixes {
        let entry = merged.entry(fix.name.clone()).or_default();
        if entry.edited_name.is_none() {
            entry.edited_name = fix.edited_name.clone();
        }
        if entry.region.is_none() {
            entry.region = fix.missing_region.clone();
        }
        if entry.sub_region.is_none() {
            entry.sub_region = fix.missing_subregion.clone();
        }
        if entry.notes.is_none() {
            entry.notes = fix.region_notes.clone();
        }
    }

    merged
        .into_iter()
        .map(|(name, entry)| {
            let key = entry.edited_name.unwrap_or(name);
            (
                key,
                RegionClass {
                    region: entry.region,
                    sub_region: entry.sub_region,
                    notes: entry.notes,
                },
            )
        })
        .collect()
}

/// Joins the classifier onto the table by political entity and reports the
/// rows still missing a region or sub-region.
pub fn merge_regions(
    mut rows: Vec<SampleRow>,
    classifier: &HashMap<String, RegionClass>,
) -> (Vec<SampleRow>, Vec<UnresolvedRegion>) {
    for row in &mut rows {
        let class = row
            .political_entity
            .as_deref()
            .and_then(|entity| classifier.get(entity));
        if let Some(class) = class {
            row.region = class.region.clone();
            row.sub_region = class.sub_region.clone();
            row.region_notes = class.notes.clone();
        }
    }

    let unresolved = rows
        .iter()
        .filter(|row| row.region.is_none() || row.sub_region.is_none())
        .map(|row| UnresolvedRegion {
            gen_id: row.gen_id.clone(),
            master_id: row.master_id.clone(),
            political_entity: row.political_entity.clone(),
        })
        .collect();

    (rows, unresolved)
}

/// Force-sets region, sub-region, and the explanatory note on every row whose
/// genID appears in the exception list. Runs after the generic join, so the
/// override always wins.
pub fn apply_exception(
    mut rows: Vec<SampleRow>,
    list: &[GenIdRow],
    exception: &RegionException,
) -> Vec<SampleRow> {
    let gen_ids: HashSet<&str> = list.iter().map(|row| row.gen_id.as_str()).collect();
    for row in &mut rows {
        if gen_ids.contains(row.gen_id.as_str()) {
            row.region = Some(exception.region.clone());
            row.sub_region = Some(exception.sub_region.clone());
            row.region_notes = Some(exception.note.clone());
        }
    }
    rows
}
