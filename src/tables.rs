use camino::Utf8Path;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::AadrError;

/// Coordinate fallback keyed by locality. `lat_lon_notes` explains where the
/// manual coordinates came from.
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinateFix {
    pub locality: String,
    #[serde(rename = "GISLat")]
    pub gis_lat: Option<String>,
    #[serde(rename = "GISLon")]
    pub gis_lon: Option<String>,
    #[serde(default)]
    pub lat_lon_notes: Option<String>,
}

/// Region classification row from the ISO country table. The source file
/// carries many more columns; only these three matter.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRow {
    pub name: String,
    pub region: Option<String>,
    #[serde(rename = "sub-region")]
    pub sub_region: Option<String>,
}

/// Manual fixups for political entities the country table does not match.
/// `edited_name` is the spelling used in the annotation when it differs.
#[derive(Debug, Clone, Deserialize)]
pub struct MissingRegionRow {
    pub name: String,
    #[serde(default)]
    pub edited_name: Option<String>,
    #[serde(default)]
    pub missing_region: Option<String>,
    #[serde(default)]
    pub missing_subregion: Option<String>,
    #[serde(default)]
    pub region_notes: Option<String>,
}

/// DOI fallback keyed by the publication code derived from the publication
/// string.
#[derive(Debug, Clone, Deserialize)]
pub struct DoiFix {
    pub publication_code: String,
    #[serde(default)]
    pub doi_link: Option<String>,
    #[serde(default)]
    pub doi_notes: Option<String>,
}

/// Hand-curated per-sample notes.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualNote {
    #[serde(rename = "genID")]
    pub gen_id: String,
    #[serde(default)]
    pub manual_notes: Option<String>,
}

/// A bare genID list, as used by the region exception files.
#[derive(Debug, Clone, Deserialize)]
pub struct GenIdRow {
    #[serde(rename = "genID")]
    pub gen_id: String,
}

/// Reads a comma-delimited, headered lookup table into typed records.
pub fn read_records<T: DeserializeOwned>(path: &Utf8Path) -> Result<Vec<T>, AadrError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_std_path())
        .map_err(|err| read_error(path, err))?;

    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record.map_err(|err| read_error(path, err))?);
    }
    Ok(records)
}

fn read_error(path: &Utf8Path, err: impl std::fmt::Display) -> AadrError {
    AadrError::TableRead {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    #[test]
    fn read_coordinate_fixes() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("missing_lat_lon.csv")).unwrap();
        std::fs::write(
            path.as_std_path(),
            "locality,GISLat,GISLon,lat_lon_notes\nDenisova Cave,51.397,84.676,georeferenced from site report\nUnknown,,,\n",
        )
        .unwrap();

        let fixes: Vec<CoordinateFix> = read_records(&path).unwrap();
        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].locality, "Denisova Cave");
        assert_eq!(fixes[0].gis_lat.as_deref(), Some("51.397"));
        assert_eq!(fixes[1].gis_lat, None);
        assert_eq!(fixes[1].lat_lon_notes, None);
    }

    #[test]
    fn read_missing_table_is_an_error() {
        let err =
            read_records::<CoordinateFix>(Utf8Path::new("no/such/table.csv")).unwrap_err();
        assert!(matches!(err, AadrError::TableRead { .. }));
    }
}
