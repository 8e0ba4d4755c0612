pub mod engine;
pub mod export;
pub mod query;
pub mod store;

pub use crate::domain::model::{Domain, Site};
pub use crate::domain::ports::{ConfigProvider, ReportRow, Storage};
pub use crate::utils::error::Result;
