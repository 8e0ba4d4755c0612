//! The portal engine: owns the data context for a session, loading it from
//! the configured snapshot on open and persisting it after every mutation.
//! Generic over the storage and config ports so tests can run fully in
//! memory.

use crate::core::export;
use crate::core::query::{ReportRows, SortMode};
use crate::core::store::{DataStore, SearchHit};
use crate::domain::model::Domain;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{PortalError, Result};

pub struct Portal<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    store: DataStore,
}

impl<S: Storage, C: ConfigProvider> Portal<S, C> {
    /// Load the session snapshot, or start empty when none exists yet.
    pub fn open(storage: S, config: C) -> Result<Self> {
        let store = match storage.read_file(config.data_path()) {
            Ok(bytes) => {
                let store = DataStore::from_json(&bytes)?;
                tracing::info!(
                    "Loaded {} records from {}",
                    store.total_records(),
                    config.data_path()
                );
                store
            }
            Err(PortalError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No snapshot at {}, starting empty", config.data_path());
                DataStore::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            storage,
            config,
            store,
        })
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Apply a mutation and persist the snapshot in the same step.
    pub fn mutate<T>(&mut self, apply: impl FnOnce(&mut DataStore) -> Result<T>) -> Result<T> {
        let out = apply(&mut self.store)?;
        self.persist()?;
        Ok(out)
    }

    fn persist(&self) -> Result<()> {
        let bytes = self.store.to_json()?;
        self.storage.write_file(self.config.data_path(), &bytes)?;
        tracing::debug!(
            "Snapshot saved to {} ({} bytes)",
            self.config.data_path(),
            bytes.len()
        );
        Ok(())
    }

    /// Run the report pipeline; the sort mode falls back to the configured
    /// default when the caller passes none.
    pub fn report(&self, domain: Domain, search: &str, sort: Option<SortMode>) -> ReportRows {
        let sort = sort.unwrap_or_else(|| self.config.default_sort());
        tracing::debug!("Running {domain} report (search: {search:?}, sort: {sort})");
        let report = self.store.report(domain, search, sort);
        tracing::debug!("{} rows after filter and sort", report.len());
        report
    }

    pub fn global_search(&self, term: &str) -> Vec<SearchHit> {
        self.store.global_search(term)
    }

    /// Export a report as CSV. Returns the written path and the row count;
    /// an empty report is a blocking error and writes nothing.
    pub fn export(
        &self,
        domain: Domain,
        search: &str,
        sort: Option<SortMode>,
        output: Option<String>,
    ) -> Result<(String, usize)> {
        let report = self.report(domain, search, sort);
        let csv = export::report_csv(&report, domain)?;

        let path = output.unwrap_or_else(|| {
            format!(
                "{}/{}",
                self.config.export_dir().trim_end_matches('/'),
                export::export_filename(self.config.filename_prefix(), domain)
            )
        });

        self.storage.write_file(&path, csv.as_bytes())?;
        tracing::info!("Exported {} rows to {}", report.len(), path);
        Ok((path, report.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RiceRecord;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                PortalError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("file not found: {path}"),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn data_path(&self) -> &str {
            "portal.json"
        }

        fn export_dir(&self) -> &str {
            "exports"
        }

        fn filename_prefix(&self) -> &str {
            "laporan"
        }

        fn default_sort(&self) -> SortMode {
            SortMode::Newest
        }
    }

    fn rice(company: &str, price: &str) -> RiceRecord {
        RiceRecord {
            company_name: company.to_string(),
            price: price.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn open_starts_empty_without_snapshot() {
        let portal = Portal::open(MemoryStorage::default(), TestConfig).unwrap();
        assert_eq!(portal.store().total_records(), 0);
    }

    #[test]
    fn mutations_persist_across_sessions() {
        let storage = MemoryStorage::default();
        {
            let mut portal = Portal::open(&storage, TestConfig).unwrap();
            portal
                .mutate(|store| Ok(store.add_rice(rice("Barakah", "50"))))
                .unwrap();
        }

        let portal = Portal::open(&storage, TestConfig).unwrap();
        assert_eq!(portal.store().rice.len(), 1);
        assert_eq!(portal.store().rice[0].company_name, "Barakah");
    }

    #[test]
    fn report_uses_configured_default_sort() {
        let mut portal = Portal::open(MemoryStorage::default(), TestConfig).unwrap();
        portal
            .mutate(|store| {
                store.add_rice(rice("A", "10"));
                store.add_rice(rice("B", "20"));
                Ok(())
            })
            .unwrap();

        // TestConfig defaults to newest: highest id first.
        let report = portal.report(Domain::Rice, "", None);
        assert_eq!(report.ids(), vec![2, 1]);
    }

    #[test]
    fn export_writes_csv_into_export_dir() {
        let storage = MemoryStorage::default();
        let mut portal = Portal::open(&storage, TestConfig).unwrap();
        portal
            .mutate(|store| Ok(store.add_rice(rice("Barakah", "50"))))
            .unwrap();

        let (path, rows) = portal.export(Domain::Rice, "", None, None).unwrap();
        assert_eq!(rows, 1);
        assert!(path.starts_with("exports/laporan_beras_"));

        let bytes = storage.read_file(&path).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Barakah\""));
    }

    #[test]
    fn empty_export_writes_nothing() {
        let storage = MemoryStorage::default();
        let portal = Portal::open(&storage, TestConfig).unwrap();

        let err = portal.export(Domain::Rice, "", None, None).unwrap_err();
        assert!(matches!(err, PortalError::EmptyExport { .. }));
        assert!(storage.files.borrow().is_empty());
    }

    impl Storage for &MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            (**self).read_file(path)
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            (**self).write_file(path, data)
        }
    }
}
