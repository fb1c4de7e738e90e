//! Client-side row filters for the dashboard tables.
//!
//! A filter captures the table body rows once, when it is installed, and
//! re-evaluates every captured row on each event. Rows added to the table
//! afterwards are not seen unless the filter is installed again.

use std::rc::Rc;

use crate::page::{EventKind, Page, PageEvent, PageNode};

/// Status filter value that shows every row.
pub const ALL_STATUSES: &str = "all";

/// Free-text search over a precomputed per-row attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchFilter {
    pub table_id: &'static str,
    pub input_id: &'static str,
    pub row_attribute: &'static str,
}

pub const VISIT_SEARCH: SearchFilter = SearchFilter {
    table_id: "hospital-visit-table",
    input_id: "visit-search",
    row_attribute: "data-visit-search",
};

pub const PATIENT_SEARCH: SearchFilter = SearchFilter {
    table_id: "hospital-patient-table",
    input_id: "patient-search",
    row_attribute: "data-patient-search",
};

pub const DOCTOR_SEARCH: SearchFilter = SearchFilter {
    table_id: "hospital-doctor-table",
    input_id: "doctor-search",
    row_attribute: "data-doctor-search",
};

pub const DOCTOR_HISTORY_TABLE_ID: &str = "doctor-history-table";
pub const STATUS_FILTER_ID: &str = "status-filter";
pub const RECORD_STATUS_ATTRIBUTE: &str = "data-record-status";
pub const OWN_VISITS_CHECKBOX_ID: &str = "only-my-visits";
pub const CURRENT_DOCTOR_ATTRIBUTE: &str = "data-current-doctor-id";
pub const ROW_DOCTOR_ATTRIBUTE: &str = "data-doctor-id";

/// Body rows of a table, captured once.
#[derive(Clone, Debug)]
pub struct RowSnapshot<N> {
    rows: Rc<[N]>,
}

impl<N: PageNode> RowSnapshot<N> {
    pub fn capture(table: &N) -> Self {
        Self {
            rows: table.body_rows().into(),
        }
    }

    pub fn rows(&self) -> &[N] {
        &self.rows
    }

    /// Show the rows `visible` accepts and hide the others.
    pub fn apply(&self, visible: impl Fn(&N) -> bool) {
        for row in self.rows.iter() {
            row.set_displayed(visible(row));
        }
    }
}

/// Search input text as it is matched: lowercased, then trimmed.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// `query` must already be normalized.
pub fn search_matches(query: &str, row_text: &str) -> bool {
    query.is_empty() || row_text.to_lowercase().contains(query)
}

pub fn status_matches(filter_value: &str, row_status: &str) -> bool {
    filter_value == ALL_STATUSES || filter_value == row_status.trim()
}

/// Leading-integer parse of an attribute value.
///
/// Skips leading whitespace, accepts one optional sign and then as many
/// decimal digits as follow; trailing text is ignored. `None` when no digit
/// is found. Ids too long for an integer keep their approximate `f64` value.
pub fn parse_doctor_id(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: f64 = unsigned[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn own_visit_matches(only_mine: bool, row_doctor_id: Option<f64>, current_id: f64) -> bool {
    !only_mine || row_doctor_id == Some(current_id)
}

/// Hide rows of `filter.table_id` not matching `filter.input_id`'s text.
pub fn install_search<P: Page>(page: &Rc<P>, filter: &SearchFilter) -> bool {
    let (Some(table), Some(input)) = (
        page.element_by_id(filter.table_id),
        page.element_by_id(filter.input_id),
    ) else {
        return false;
    };
    let snapshot = RowSnapshot::capture(&table);
    let row_attribute = filter.row_attribute;
    let source = input.clone();
    input.listen(
        EventKind::Input,
        Box::new(move |_: &dyn PageEvent| {
            let query = normalize_query(&source.value());
            snapshot.apply(|row| {
                search_matches(&query, &row.attribute(row_attribute).unwrap_or_default())
            });
        }),
    );
    true
}

/// Doctor history: show only rows whose record status is selected.
pub fn install_status_filter<P: Page>(page: &Rc<P>) -> bool {
    let (Some(table), Some(filter)) = (
        page.element_by_id(DOCTOR_HISTORY_TABLE_ID),
        page.element_by_id(STATUS_FILTER_ID),
    ) else {
        return false;
    };
    let snapshot = RowSnapshot::capture(&table);
    let source = filter.clone();
    filter.listen(
        EventKind::Change,
        Box::new(move |_: &dyn PageEvent| {
            let value = source.value();
            snapshot.apply(|row| {
                let status = row.attribute(RECORD_STATUS_ATTRIBUTE).unwrap_or_default();
                status_matches(&value, &status)
            });
        }),
    );
    true
}

/// Doctor history: "only my visits" checkbox.
///
/// Not installed when the table carries no usable current doctor id.
pub fn install_own_visits_filter<P: Page>(page: &Rc<P>) -> bool {
    let (Some(table), Some(checkbox)) = (
        page.element_by_id(DOCTOR_HISTORY_TABLE_ID),
        page.element_by_id(OWN_VISITS_CHECKBOX_ID),
    ) else {
        return false;
    };
    let current_id = table
        .attribute(CURRENT_DOCTOR_ATTRIBUTE)
        .as_deref()
        .and_then(parse_doctor_id)
        .filter(|&id| id != 0.0);
    let Some(current_id) = current_id else {
        log::debug!("#{DOCTOR_HISTORY_TABLE_ID} has no current doctor id, own-visits filter off");
        return false;
    };

    let snapshot = RowSnapshot::capture(&table);
    let source = checkbox.clone();
    checkbox.listen(
        EventKind::Change,
        Box::new(move |_: &dyn PageEvent| {
            let only_mine = source.is_checked();
            snapshot.apply(|row| {
                let row_id = row
                    .attribute(ROW_DOCTOR_ATTRIBUTE)
                    .as_deref()
                    .and_then(parse_doctor_id);
                own_visit_matches(only_mine, row_id, current_id)
            });
        }),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Ravi KUMAR \t"), "ravi kumar");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_search_matches() {
        assert!(search_matches("", "anything"));
        assert!(search_matches("", ""));
        assert!(search_matches("kumar", "Ravi Kumar cardiology"));
        assert!(!search_matches("kumar", "Asha Rao"));
        assert!(!search_matches("kumar", ""));
    }

    #[test]
    fn test_status_matches() {
        assert!(status_matches("all", "Completed"));
        assert!(status_matches("Ongoing", "  Ongoing "));
        assert!(!status_matches("Ongoing", "Completed"));
        assert!(!status_matches("All", "Completed"));
        assert!(!status_matches(" Ongoing", "Ongoing"));
    }

    #[test]
    fn test_parse_doctor_id() {
        assert_eq!(parse_doctor_id("42"), Some(42.0));
        assert_eq!(parse_doctor_id("  7"), Some(7.0));
        assert_eq!(parse_doctor_id("12abc"), Some(12.0));
        assert_eq!(parse_doctor_id("-3"), Some(-3.0));
        assert_eq!(parse_doctor_id("+5"), Some(5.0));
        assert_eq!(parse_doctor_id("0"), Some(0.0));
        assert_eq!(parse_doctor_id(""), None);
        assert_eq!(parse_doctor_id("abc"), None);
        assert_eq!(parse_doctor_id("-"), None);
    }

    #[test]
    fn test_parse_doctor_id_beyond_integer_range() {
        assert_eq!(parse_doctor_id("99999999999999999999"), Some(1e20));
        assert_eq!(parse_doctor_id("99999999999999999999x"), Some(1e20));
    }

    #[test]
    fn test_own_visit_matches() {
        assert!(own_visit_matches(false, None, 4.0));
        assert!(own_visit_matches(false, Some(9.0), 4.0));
        assert!(own_visit_matches(true, Some(4.0), 4.0));
        assert!(!own_visit_matches(true, Some(9.0), 4.0));
        assert!(!own_visit_matches(true, None, 4.0));
    }
}
