pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, TomlConfig};
pub use core::{engine::Portal, query::SortMode, store::DataStore};
pub use domain::model::{Domain, Site};
pub use utils::error::{PortalError, Result};
