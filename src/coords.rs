use std::collections::HashMap;

use crate::domain::SampleRow;
use crate::tables::CoordinateFix;

/// Fills `GISLat`/`GISLon` for every row: the row's own `lat`/`lon` wins,
/// otherwise the fallback table supplies coordinates by locality. A matching
/// fallback row also contributes its `lat_lon_notes`. Returns the rows and
/// the distinct localities still missing either coordinate.
pub fn merge_coordinates(
    mut rows: Vec<SampleRow>,
    fixes: &[CoordinateFix],
) -> (Vec<SampleRow>, Vec<String>) {
    let by_locality: HashMap<&str, &CoordinateFix> = fixes
        .iter()
        .map(|fix| (fix.locality.as_str(), fix))
        .collect();

    for row in &mut rows {
        let fix = row
            .locality
            .as_deref()
            .and_then(|locality| by_locality.get(locality).copied());
        row.gis_lat = row
            .lat
            .clone()
            .or_else(|| fix.and_then(|fix| fix.gis_lat.clone()));
        row.gis_lon = row
            .lon
            .clone()
            .or_else(|| fix.and_then(|fix| fix.gis_lon.clone()));
        if let Some(fix) = fix {
            row.lat_lon_notes = fix.lat_lon_notes.clone();
        }
    }

    let mut missing = Vec::new();
    for row in &rows {
        if row.gis_lat.is_none() || row.gis_lon.is_none() {
            let locality = row
                .locality
                .clone()
                .unwrap_or_else(|| "(no locality)".to_string());
            if !missing.contains(&locality) {
                missing.push(locality);
            }
        }
    }

    (rows, missing)
}
