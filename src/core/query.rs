//! The report query pipeline: select a domain's rows, filter them by a
//! free-text term, and order them by a sort mode. This is a pure function
//! over in-memory lists and cannot fail; malformed numeric fields sort as 0.

use crate::domain::model::{
    ExpeditionRecord, RiceRecord, RteRecord, SpiceRow, TelecomRecord, TenantRecord,
};
use crate::domain::ports::ReportRow;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SortMode {
    /// Identifier descending. Ids are assigned in entry order, so they stand
    /// in for recency; records carry no machine-readable timestamp.
    #[default]
    Newest,
    /// Identifier ascending.
    Oldest,
    /// Parsed volume-like metric, descending.
    HighestVolume,
    /// Parsed price-like metric, descending.
    HighestPrice,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::HighestVolume => "highest_volume",
            SortMode::HighestPrice => "highest_price",
        };
        f.write_str(name)
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "highest_volume" => Ok(SortMode::HighestVolume),
            "highest_price" => Ok(SortMode::HighestPrice),
            other => Err(format!(
                "unknown sort mode '{other}', expected one of: newest, oldest, highest_volume, highest_price"
            )),
        }
    }
}

/// Filter and order one domain's rows. The term is matched lower-cased by
/// substring containment against the row's designated search fields; a row
/// survives if ANY field matches. An empty term skips filtering entirely
/// (a whitespace-only term is a real term and filters).
pub fn run<R: ReportRow>(mut rows: Vec<R>, search: &str, sort: SortMode) -> Vec<R> {
    if !search.is_empty() {
        let term = search.to_lowercase();
        rows.retain(|row| {
            row.search_fields()
                .iter()
                .any(|field| !field.is_empty() && field.to_lowercase().contains(&term))
        });
    }

    // sort_by is stable, so ties keep their entry order.
    match sort {
        SortMode::Newest => rows.sort_by(|a, b| b.id().cmp(&a.id())),
        SortMode::Oldest => rows.sort_by(|a, b| a.id().cmp(&b.id())),
        SortMode::HighestVolume => rows.sort_by(|a, b| {
            metric(b.volume_field()).total_cmp(&metric(a.volume_field()))
        }),
        SortMode::HighestPrice => {
            rows.sort_by(|a, b| metric(b.price_field()).total_cmp(&metric(a.price_field())))
        }
    }

    rows
}

fn metric(field: Option<&str>) -> f64 {
    field.map(parse_metric).unwrap_or(0.0)
}

/// Leading-prefix float parsing with JS `parseFloat` semantics: skip leading
/// whitespace, take the longest valid numeric prefix ("12.5 Ton" is 12.5,
/// "12,5" is 12), and fall back to 0 when no digit is found.
pub fn parse_metric(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }

    if end < bytes.len() && bytes[end] == b'.' {
        let mark = end;
        end += 1;
        let mut frac = 0;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            frac += 1;
        }
        // A bare dot with no fraction contributes nothing ("1." parses as 1).
        if frac == 0 {
            end = mark;
        }
        digits += frac;
    }

    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mark = end;
        end += 1;
        if matches!(bytes.get(end), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        let mut exp = 0;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            exp += 1;
        }
        if exp == 0 {
            end = mark;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// The filtered, ordered rows for one domain; feeds rendering, the record
/// count, and CSV export.
#[derive(Debug, Clone)]
pub enum ReportRows {
    Spice(Vec<SpiceRow>),
    Rice(Vec<RiceRecord>),
    Rte(Vec<RteRecord>),
    Tenant(Vec<TenantRecord>),
    Expedition(Vec<ExpeditionRecord>),
    Telecom(Vec<TelecomRecord>),
}

impl ReportRows {
    pub fn len(&self) -> usize {
        match self {
            ReportRows::Spice(rows) => rows.len(),
            ReportRows::Rice(rows) => rows.len(),
            ReportRows::Rte(rows) => rows.len(),
            ReportRows::Tenant(rows) => rows.len(),
            ReportRows::Expedition(rows) => rows.len(),
            ReportRows::Telecom(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportRows::Spice(_) => SpiceRow::HEADERS,
            ReportRows::Rice(_) => RiceRecord::HEADERS,
            ReportRows::Rte(_) => RteRecord::HEADERS,
            ReportRows::Tenant(_) => TenantRecord::HEADERS,
            ReportRows::Expedition(_) => ExpeditionRecord::HEADERS,
            ReportRows::Telecom(_) => TelecomRecord::HEADERS,
        }
    }

    /// Column values per row, in header order.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        fn owned<R: ReportRow>(rows: &[R]) -> Vec<Vec<String>> {
            rows.iter()
                .map(|row| row.columns().iter().map(|c| c.to_string()).collect())
                .collect()
        }

        match self {
            ReportRows::Spice(rows) => owned(rows),
            ReportRows::Rice(rows) => owned(rows),
            ReportRows::Rte(rows) => owned(rows),
            ReportRows::Tenant(rows) => owned(rows),
            ReportRows::Expedition(rows) => owned(rows),
            ReportRows::Telecom(rows) => owned(rows),
        }
    }

    /// Identifiers in output order.
    pub fn ids(&self) -> Vec<u32> {
        fn collect<R: ReportRow>(rows: &[R]) -> Vec<u32> {
            rows.iter().map(ReportRow::id).collect()
        }

        match self {
            ReportRows::Spice(rows) => collect(rows),
            ReportRows::Rice(rows) => collect(rows),
            ReportRows::Rte(rows) => collect(rows),
            ReportRows::Tenant(rows) => collect(rows),
            ReportRows::Expedition(rows) => collect(rows),
            ReportRows::Telecom(rows) => collect(rows),
        }
    }
}
