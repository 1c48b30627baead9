use std::fs;

use camino::Utf8Path;

use crate::domain::SampleRow;
use crate::error::AadrError;

/// Writes the enriched table as a headered CSV, no index column. The file is
/// written next to its destination and persisted into place so a failed run
/// never leaves a truncated export.
pub fn write_csv(path: &Utf8Path, rows: &[SampleRow]) -> Result<(), AadrError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| AadrError::Filesystem(err.to_string()))?;

    let temp = tempfile::Builder::new()
        .prefix("aadr-export")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| AadrError::Filesystem(err.to_string()))?;

    {
        let mut writer = csv::Writer::from_writer(temp.as_file());
        for row in rows {
            writer.serialize(row).map_err(|err| write_error(path, err))?;
        }
        writer.flush().map_err(|err| write_error(path, err))?;
    }

    if path.as_std_path().exists() {
        fs::remove_file(path.as_std_path())
            .map_err(|err| AadrError::Filesystem(err.to_string()))?;
    }
    temp.persist(path.as_std_path())
        .map_err(|err| AadrError::Filesystem(err.to_string()))?;
    Ok(())
}

fn write_error(path: &Utf8Path, err: impl std::fmt::Display) -> AadrError {
    AadrError::TableWrite {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    }
}
