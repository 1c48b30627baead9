use serde::Serialize;
use tracing::debug;

use crate::config::ResolvedConfig;
use crate::coords;
use crate::doi;
use crate::domain::SampleRow;
use crate::error::AadrError;
use crate::filter::{self, RowCountCheck};
use crate::loader;
use crate::notes;
use crate::region::{self, UnresolvedRegion};
use crate::tables::{self, CoordinateFix, CountryRow, DoiFix, GenIdRow, ManualNote, MissingRegionRow};

/// Everything the run surfaced that is worth a human look. Unresolved rows
/// stay in the output table with nulls; they are reported here, not dropped.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub loaded_rows: usize,
    pub refs_removed: usize,
    pub presents_removed: usize,
    pub row_count: RowCountCheck,
    pub sequence_types: Vec<String>,
    pub missing_coordinates: Vec<String>,
    pub unresolved_regions: Vec<UnresolvedRegion>,
    pub missing_doi_publications: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub rows: Vec<SampleRow>,
    pub report: CleanReport,
}

/// Runs the stages in their fixed order: load, filter, coordinates, regions,
/// region exceptions, DOI, notes. Every stage takes the table by value and
/// returns the next one.
pub struct Pipeline {
    config: ResolvedConfig,
}

impl Pipeline {
    pub fn new(config: ResolvedConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<CleanOutcome, AadrError> {
        let rows = loader::load_annotation(&self.config.annotation)?;
        let loaded_rows = rows.len();
        debug!(rows = loaded_rows, "annotation loaded");

        let (rows, refs) = filter::strip_references(rows);
        let (rows, presents) = filter::strip_present_day(rows);
        let row_count = filter::verify_row_count(
            self.config.expected_rows,
            rows.len(),
            refs.len(),
            presents.len(),
        );
        let (rows, sequence_types) = filter::canonicalize_sequence_types(rows);

        let coordinate_fixes: Vec<CoordinateFix> = match &self.config.coordinate_fixes {
            Some(path) => tables::read_records(path)?,
            None => Vec::new(),
        };
        let (rows, missing_coordinates) = coords::merge_coordinates(rows, &coordinate_fixes);
        debug!(
            unresolved = missing_coordinates.len(),
            "coordinates merged"
        );

        let countries: Vec<CountryRow> = match &self.config.countries {
            Some(path) => tables::read_records(path)?,
            None => Vec::new(),
        };
        let missing_regions: Vec<MissingRegionRow> = match &self.config.missing_regions {
            Some(path) => tables::read_records(path)?,
            None => Vec::new(),
        };
        let classifier = region::build_classifier(&countries, &missing_regions);
        let (mut rows, unresolved_regions) = region::merge_regions(rows, &classifier);
        // Without a country table every row is unclassified; reporting them
        // all would drown the summary.
        let unresolved_regions = if countries.is_empty() {
            Vec::new()
        } else {
            unresolved_regions
        };
        for exception in &self.config.region_exceptions {
            let list: Vec<GenIdRow> = tables::read_records(&exception.list)?;
            rows = region::apply_exception(rows, &list, exception);
        }
        debug!(unresolved = unresolved_regions.len(), "regions merged");

        let doi_fixes: Vec<DoiFix> = match &self.config.doi_fixes {
            Some(path) => tables::read_records(path)?,
            None => Vec::new(),
        };
        let (rows, missing_doi_publications) = doi::merge_doi(rows, &doi_fixes);
        debug!(
            unresolved = missing_doi_publications.len(),
            "doi links merged"
        );

        let manual_notes: Vec<ManualNote> = match &self.config.manual_notes {
            Some(path) => tables::read_records(path)?,
            None => Vec::new(),
        };
        let rows = notes::merge_manual_notes(rows, &manual_notes);
        let rows = notes::consolidate_notes(rows);

        Ok(CleanOutcome {
            rows,
            report: CleanReport {
                loaded_rows,
                refs_removed: refs.len(),
                presents_removed: presents.len(),
                row_count,
                sequence_types,
                missing_coordinates,
                unresolved_regions,
                missing_doi_publications,
            },
        })
    }
}
