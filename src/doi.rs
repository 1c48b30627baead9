use std::collections::HashMap;

use regex::Regex;

use crate::domain::SampleRow;
use crate::tables::DoiFix;

/// Pattern splitting a publication label into its code and an optional
/// trailing parenthesized note, e.g. `"Fu 2016 (updated)"`.
pub fn publication_pattern() -> Regex {
    Regex::new(r"^(.*?)\s*(?:\((.*?)\))?$").unwrap()
}

/// Splits a publication label into `(code, note)`.
pub fn split_publication(pattern: &Regex, publication: &str) -> (String, Option<String>) {
    match pattern.captures(publication) {
        Some(captures) => {
            let code = captures
                .get(1)
                .map(|value| value.as_str().to_string())
                .unwrap_or_default();
            let note = captures.get(2).map(|value| value.as_str().to_string());
            (code, note)
        }
        None => (publication.to_string(), None),
    }
}

/// Normalizes a DOI value into a resolvable link. Unrecognized values pass
/// through unchanged; the rules are idempotent.
pub fn format_doi_link(value: &str) -> String {
    let value = value.trim();
    if value.starts_with("https://doi.org/") {
        value.to_string()
    } else if let Some(rest) = value.strip_prefix("doi:") {
        format!("https://doi.org/{}", rest.trim())
    } else if value.starts_with("10.") {
        format!("https://doi.org/{value}")
    } else if value.starts_with("doi.org/") {
        format!("https://{value}")
    } else {
        value.to_string()
    }
}

/// Null-preserving wrapper around [`format_doi_link`].
pub fn format_doi(value: Option<&str>) -> Option<String> {
    value.map(format_doi_link)
}

/// Derives the publication code per row, joins the DOI fallback table on it,
/// and fills `doi_link` (fallback link first, then the row's own `doi`),
/// normalized. Rows that had their own DOI get any stale missing-DOI note
/// cleared. Returns the rows and the distinct publications still without a
/// link.
pub fn merge_doi(mut rows: Vec<SampleRow>, fixes: &[DoiFix]) -> (Vec<SampleRow>, Vec<String>) {
    let pattern = publication_pattern();
    let by_code: HashMap<&str, &DoiFix> = fixes
        .iter()
        .map(|fix| (fix.publication_code.as_str(), fix))
        .collect();

    for row in &mut rows {
        let fix = row.publication.as_deref().and_then(|publication| {
            let (code, _note) = split_publication(&pattern, publication);
            by_code.get(code.as_str()).copied()
        });

        let link = fix
            .and_then(|fix| fix.doi_link.clone())
            .or_else(|| row.doi.clone());
        row.doi_link = format_doi(link.as_deref());
        row.doi_notes = fix.and_then(|fix| fix.doi_notes.clone());
        if row.doi.is_some() {
            row.doi_notes = None;
        }
    }

    let mut missing = Vec::new();
    for row in &rows {
        if row.doi_link.is_none() {
            let publication = row
                .publication
                .clone()
                .unwrap_or_else(|| "(no publication)".to_string());
            if !missing.contains(&publication) {
                missing.push(publication);
            }
        }
    }

    (rows, missing)
}
