use serde::Serialize;

use crate::domain::SampleRow;

/// Splits off the reference-genome pseudo-samples. Returns `(kept, removed)`.
pub fn strip_references(rows: Vec<SampleRow>) -> (Vec<SampleRow>, Vec<SampleRow>) {
    rows.into_iter().partition(|row| !row.is_reference())
}

/// Splits off the present-day samples. Returns `(kept, removed)`.
pub fn strip_present_day(rows: Vec<SampleRow>) -> (Vec<SampleRow>, Vec<SampleRow>) {
    rows.into_iter().partition(|row| !row.is_present_day())
}

/// Outcome of the post-filter row-count sanity check. The mismatch case is
/// not an error, but the caller has to look at it.
#[must_use = "a row-count mismatch is silent otherwise; inspect the verdict"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowCountCheck {
    Consistent {
        remaining: u64,
    },
    Mismatch {
        expected_remaining: u64,
        remaining: u64,
    },
    /// No expected total configured for this dataset version.
    Unverified {
        remaining: u64,
    },
}

impl RowCountCheck {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, RowCountCheck::Mismatch { .. })
    }
}

/// Checks `remaining == expected_total - refs_removed - presents_removed`
/// against the configured total for the dataset version, when one is set.
pub fn verify_row_count(
    expected_total: Option<u64>,
    remaining: usize,
    refs_removed: usize,
    presents_removed: usize,
) -> RowCountCheck {
    let remaining = remaining as u64;
    let Some(total) = expected_total else {
        return RowCountCheck::Unverified { remaining };
    };

    let expected_remaining = total.saturating_sub(refs_removed as u64 + presents_removed as u64);
    if remaining == expected_remaining {
        RowCountCheck::Consistent { remaining }
    } else {
        RowCountCheck::Mismatch {
            expected_remaining,
            remaining,
        }
    }
}

/// Folds the handful of comma-spelled sequence-type codes into their dotted
/// forms and reports the distinct values left in the table, in
/// first-occurrence order.
pub fn canonicalize_sequence_types(mut rows: Vec<SampleRow>) -> (Vec<SampleRow>, Vec<String>) {
    for row in &mut rows {
        let canonical = match row.sequence_type.as_deref() {
            Some("AG, BY, AA") => Some("AG.BY.AA"),
            Some("AG,SG") | Some("SG, AG") => Some("AG.SG"),
            _ => None,
        };
        if let Some(canonical) = canonical {
            row.sequence_type = Some(canonical.to_string());
        }
    }

    let mut distinct = Vec::new();
    for row in &rows {
        if let Some(value) = &row.sequence_type {
            if !distinct.contains(value) {
                distinct.push(value.clone());
            }
        }
    }
    (rows, distinct)
}
