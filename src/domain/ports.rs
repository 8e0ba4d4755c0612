use crate::core::query::SortMode;
use crate::utils::error::Result;

/// Byte-level persistence seam for the session snapshot. Kept dumb so tests
/// can swap in an in-memory implementation.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_path(&self) -> &str;
    fn export_dir(&self) -> &str;
    fn filename_prefix(&self) -> &str;
    fn default_sort(&self) -> SortMode;
}

/// One row of a report. Each domain declares its identifier, its designated
/// searchable fields, the metric fields the volume/price sorts read, and the
/// fixed CSV column set.
pub trait ReportRow {
    const HEADERS: &'static [&'static str];

    fn id(&self) -> u32;
    /// Fields matched by the free-text search. Empty fields never match.
    fn search_fields(&self) -> Vec<&str>;
    /// First non-empty field among the domain's volume-like fields.
    fn volume_field(&self) -> Option<&str>;
    /// First non-empty field among the domain's price-like fields.
    fn price_field(&self) -> Option<&str>;
    /// Column values in `HEADERS` order.
    fn columns(&self) -> Vec<&str>;
}
