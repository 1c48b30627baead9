use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::AadrError;

/// Note attached to rows whose region is forced by an exception list.
pub const TRANSCONTINENTAL_NOTE: &str =
    "Assigned region/subregion manually because the political entity is a transcontinental state.";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    pub annotation: String,
    pub output: String,
    #[serde(default)]
    pub expected_rows: Option<u64>,
    #[serde(default)]
    pub coordinate_fixes: Option<String>,
    #[serde(default)]
    pub countries: Option<String>,
    #[serde(default)]
    pub missing_regions: Option<String>,
    #[serde(default)]
    pub region_exceptions: Vec<RegionExceptionEntry>,
    #[serde(default)]
    pub doi_fixes: Option<String>,
    #[serde(default)]
    pub manual_notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegionExceptionEntry {
    pub list: String,
    pub region: String,
    pub sub_region: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegionException {
    pub list: Utf8PathBuf,
    pub region: String,
    pub sub_region: String,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub annotation: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub expected_rows: Option<u64>,
    pub coordinate_fixes: Option<Utf8PathBuf>,
    pub countries: Option<Utf8PathBuf>,
    pub missing_regions: Option<Utf8PathBuf>,
    pub region_exceptions: Vec<RegionException>,
    pub doi_fixes: Option<Utf8PathBuf>,
    pub manual_notes: Option<Utf8PathBuf>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, AadrError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("aadr-curator.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Err(AadrError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| AadrError::ConfigRead(config_path.clone()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|err| AadrError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, AadrError> {
        let schema_version = config.schema_version.unwrap_or(1);

        let region_exceptions = config
            .region_exceptions
            .into_iter()
            .map(|entry| RegionException {
                list: Utf8PathBuf::from(entry.list),
                region: entry.region,
                sub_region: entry.sub_region,
                note: entry
                    .note
                    .unwrap_or_else(|| TRANSCONTINENTAL_NOTE.to_string()),
            })
            .collect();

        Ok(ResolvedConfig {
            schema_version,
            annotation: Utf8PathBuf::from(config.annotation),
            output: Utf8PathBuf::from(config.output),
            expected_rows: config.expected_rows,
            coordinate_fixes: config.coordinate_fixes.map(Utf8PathBuf::from),
            countries: config.countries.map(Utf8PathBuf::from),
            missing_regions: config.missing_regions.map(Utf8PathBuf::from),
            region_exceptions,
            doi_fixes: config.doi_fixes.map(Utf8PathBuf::from),
            manual_notes: config.manual_notes.map(Utf8PathBuf::from),
        })
    }
}
