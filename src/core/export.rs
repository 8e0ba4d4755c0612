//! CSV rendering for reports: header row plus one always-quoted row per
//! record, empty values shown as `-`, matching the web export format.

use crate::core::query::ReportRows;
use crate::domain::model::Domain;
use crate::domain::ports::ReportRow;
use crate::utils::error::{PortalError, Result};
use chrono::Local;

pub fn csv_string<R: ReportRow>(rows: &[R]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(R::HEADERS)?;
    for row in rows {
        writer.write_record(
            row.columns()
                .iter()
                .map(|value| if value.is_empty() { "-" } else { value }),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PortalError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Exporting an empty report is a blocking error; no file should be written.
pub fn report_csv(report: &ReportRows, domain: Domain) -> Result<String> {
    if report.is_empty() {
        return Err(PortalError::EmptyExport { domain });
    }

    match report {
        ReportRows::Spice(rows) => csv_string(rows),
        ReportRows::Rice(rows) => csv_string(rows),
        ReportRows::Rte(rows) => csv_string(rows),
        ReportRows::Tenant(rows) => csv_string(rows),
        ReportRows::Expedition(rows) => csv_string(rows),
        ReportRows::Telecom(rows) => csv_string(rows),
    }
}

/// `laporan_bumbu_2026-08-28.csv` and friends.
pub fn export_filename(prefix: &str, domain: Domain) -> String {
    format!(
        "{prefix}_{}_{}.csv",
        domain.slug(),
        Local::now().format("%Y-%m-%d")
    )
}
