use std::collections::HashMap;

use crate::domain::SampleRow;
use crate::tables::ManualNote;

/// Joins the hand-curated notes table onto the rows by genID.
pub fn merge_manual_notes(mut rows: Vec<SampleRow>, notes: &[ManualNote]) -> Vec<SampleRow> {
    let by_gen_id: HashMap<&str, &ManualNote> = notes
        .iter()
        .map(|note| (note.gen_id.as_str(), note))
        .collect();

    for row in &mut rows {
        row.manual_notes = by_gen_id
            .get(row.gen_id.as_str())
            .and_then(|note| note.manual_notes.clone());
    }
    rows
}

/// Collapses the per-stage note fields into one comma-separated `notes`
/// value, dropping nulls. The stage fields are cleared afterwards.
pub fn consolidate_notes(mut rows: Vec<SampleRow>) -> Vec<SampleRow> {
    for row in &mut rows {
        let parts: Vec<&str> = [
            row.doi_notes.as_deref(),
            row.lat_lon_notes.as_deref(),
            row.region_notes.as_deref(),
            row.manual_notes.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        row.notes = if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        };
        row.doi_notes = None;
        row.lat_lon_notes = None;
        row.region_notes = None;
        row.manual_notes = None;
    }
    rows
}
