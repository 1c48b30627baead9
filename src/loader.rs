use std::fs::File;
use std::io::Read;

use camino::Utf8Path;
use flate2::read::GzDecoder;

use crate::domain::{SampleRow, normalize_cell};
use crate::error::AadrError;

// Positional layout of the published annotation file. Only these columns
// survive into the cleaned table.
const GEN_ID: usize = 0;
const MASTER_ID: usize = 1;
const PUBLICATION: usize = 5;
const DOI: usize = 6;
const REPOSITORY: usize = 7;
const YBP: usize = 9;
const YRANGE: usize = 11;
const GROUP_ID: usize = 13;
const LOCALITY: usize = 14;
const POLITICAL_ENTITY: usize = 15;
const LAT: usize = 16;
const LON: usize = 17;
const SEQUENCE_TYPE: usize = 19;
const SNPAUTO: usize = 22;
const MOLSEX: usize = 24;
const YHAPLO_TERM: usize = 27;
const YHAPLO_ISOGG: usize = 28;
const MTDNA_COVG: usize = 30;
const MTDNA_HAPLO: usize = 31;
const DMGRATE: usize = 33;
const LIBTYPE: usize = 37;
const ASM: usize = 40;

const MIN_COLUMNS: usize = ASM + 1;

/// Reads the tab-delimited annotation file into canonical rows. The header
/// row is skipped, values stay text, and `".."`/empty cells become `None`.
/// A `.gz` path is decompressed on the fly.
pub fn load_annotation(path: &Utf8Path) -> Result<Vec<SampleRow>, AadrError> {
    let file = File::open(path.as_std_path()).map_err(|err| read_error(path, err))?;
    let input: Box<dyn Read> = if path.extension() == Some("gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| read_error(path, err))?;
        // Header is line 1, so the first record is line 2.
        let line = index as u64 + 2;
        if record.len() < MIN_COLUMNS {
            return Err(AadrError::ColumnCount {
                row: line,
                found: record.len(),
                expected: MIN_COLUMNS,
            });
        }

        let cell = |column: usize| normalize_cell(&record[column]);
        rows.push(SampleRow {
            gen_id: record[GEN_ID].to_string(),
            master_id: cell(MASTER_ID),
            group_id: cell(GROUP_ID),
            publication: cell(PUBLICATION),
            doi: cell(DOI),
            ybp: cell(YBP),
            yrange: cell(YRANGE),
            locality: cell(LOCALITY),
            political_entity: cell(POLITICAL_ENTITY),
            lat: cell(LAT),
            lon: cell(LON),
            snpauto: cell(SNPAUTO),
            molsex: cell(MOLSEX),
            yhaplo_term: cell(YHAPLO_TERM),
            yhaplo_isogg: cell(YHAPLO_ISOGG),
            mtdna_covg: cell(MTDNA_COVG),
            mtdna_haplo: cell(MTDNA_HAPLO),
            dmgrate: cell(DMGRATE),
            libtype: cell(LIBTYPE),
            asm: cell(ASM),
            repository: cell(REPOSITORY),
            sequence_type: cell(SEQUENCE_TYPE),
            ..Default::default()
        });
    }

    Ok(rows)
}

fn read_error(path: &Utf8Path, err: impl std::fmt::Display) -> AadrError {
    AadrError::TableRead {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    }
}
