//! In-memory data context: one typed record list per domain (two for spice,
//! split by site), mutated by the data-entry commands and queried by the
//! report pipeline. The whole store round-trips as a JSON snapshot.

use crate::core::query::{self, ReportRows, SortMode};
use crate::domain::model::{
    Domain, ExpeditionRecord, RiceRecord, RteRecord, Site, SpiceRecord, SpiceRow, TelecomRecord,
    TenantRecord,
};
use crate::utils::error::{PortalError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataStore {
    pub spice_makkah: Vec<SpiceRecord>,
    pub spice_madinah: Vec<SpiceRecord>,
    pub rice: Vec<RiceRecord>,
    pub rte: Vec<RteRecord>,
    pub tenants: Vec<TenantRecord>,
    pub expeditions: Vec<ExpeditionRecord>,
    pub telecom: Vec<TelecomRecord>,
}

/// One match from the cross-domain search, labelled for display.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub domain: Domain,
    pub id: u32,
    pub title: String,
    pub subtitle: String,
}

trait Identified {
    fn ident(&self) -> u32;
    fn set_ident(&mut self, id: u32);
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn ident(&self) -> u32 {
                self.id
            }
            fn set_ident(&mut self, id: u32) {
                self.id = id;
            }
        })+
    };
}

identified!(
    SpiceRecord,
    RiceRecord,
    RteRecord,
    TenantRecord,
    ExpeditionRecord,
    TelecomRecord,
);

// Ids grow monotonically within a list: new id = max + 1. Entry order is what
// the newest/oldest sorts lean on.
fn push_record<R: Identified>(rows: &mut Vec<R>, mut record: R) -> u32 {
    let id = rows.iter().map(Identified::ident).max().map_or(1, |m| m + 1);
    record.set_ident(id);
    rows.push(record);
    id
}

fn patch_record<R: Identified>(rows: &mut [R], id: u32, apply: impl FnOnce(&mut R)) -> bool {
    match rows.iter_mut().find(|r| r.ident() == id) {
        Some(record) => {
            apply(record);
            true
        }
        None => false,
    }
}

fn remove_record<R: Identified>(rows: &mut Vec<R>, id: u32) -> bool {
    let before = rows.len();
    rows.retain(|r| r.ident() != id);
    rows.len() != before
}

impl DataStore {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn total_records(&self) -> usize {
        self.spice_makkah.len()
            + self.spice_madinah.len()
            + self.rice.len()
            + self.rte.len()
            + self.tenants.len()
            + self.expeditions.len()
            + self.telecom.len()
    }

    fn spice_list_mut(&mut self, site: Site) -> &mut Vec<SpiceRecord> {
        match site {
            Site::Makkah => &mut self.spice_makkah,
            Site::Madinah => &mut self.spice_madinah,
        }
    }

    pub fn add_spice(&mut self, site: Site, record: SpiceRecord) -> u32 {
        push_record(self.spice_list_mut(site), record)
    }

    pub fn add_rice(&mut self, record: RiceRecord) -> u32 {
        push_record(&mut self.rice, record)
    }

    pub fn add_rte(&mut self, record: RteRecord) -> u32 {
        push_record(&mut self.rte, record)
    }

    pub fn add_tenant(&mut self, record: TenantRecord) -> u32 {
        push_record(&mut self.tenants, record)
    }

    pub fn add_expedition(&mut self, record: ExpeditionRecord) -> u32 {
        push_record(&mut self.expeditions, record)
    }

    pub fn add_telecom(&mut self, record: TelecomRecord) -> u32 {
        push_record(&mut self.telecom, record)
    }

    pub fn update_spice(
        &mut self,
        site: Site,
        id: u32,
        apply: impl FnOnce(&mut SpiceRecord),
    ) -> Result<()> {
        if patch_record(self.spice_list_mut(site), id, apply) {
            Ok(())
        } else {
            Err(PortalError::RecordNotFound {
                domain: Domain::Spice,
                id,
            })
        }
    }

    pub fn update_rice(&mut self, id: u32, apply: impl FnOnce(&mut RiceRecord)) -> Result<()> {
        Self::patched(patch_record(&mut self.rice, id, apply), Domain::Rice, id)
    }

    pub fn update_rte(&mut self, id: u32, apply: impl FnOnce(&mut RteRecord)) -> Result<()> {
        Self::patched(patch_record(&mut self.rte, id, apply), Domain::Rte, id)
    }

    pub fn update_tenant(&mut self, id: u32, apply: impl FnOnce(&mut TenantRecord)) -> Result<()> {
        Self::patched(
            patch_record(&mut self.tenants, id, apply),
            Domain::Tenant,
            id,
        )
    }

    pub fn update_expedition(
        &mut self,
        id: u32,
        apply: impl FnOnce(&mut ExpeditionRecord),
    ) -> Result<()> {
        Self::patched(
            patch_record(&mut self.expeditions, id, apply),
            Domain::Expedition,
            id,
        )
    }

    pub fn update_telecom(
        &mut self,
        id: u32,
        apply: impl FnOnce(&mut TelecomRecord),
    ) -> Result<()> {
        Self::patched(
            patch_record(&mut self.telecom, id, apply),
            Domain::Telecom,
            id,
        )
    }

    fn patched(found: bool, domain: Domain, id: u32) -> Result<()> {
        if found {
            Ok(())
        } else {
            Err(PortalError::RecordNotFound { domain, id })
        }
    }

    /// Delete by id. Spice lists are per site, so deleting a spice record
    /// requires the site the record was entered under.
    pub fn delete(&mut self, domain: Domain, site: Option<Site>, id: u32) -> Result<()> {
        let found = match domain {
            Domain::Spice => {
                let site = site.ok_or_else(|| PortalError::Validation {
                    message: "spice records are kept per site; pass --site makkah|madinah"
                        .to_string(),
                })?;
                remove_record(self.spice_list_mut(site), id)
            }
            Domain::Rice => remove_record(&mut self.rice, id),
            Domain::Rte => remove_record(&mut self.rte, id),
            Domain::Tenant => remove_record(&mut self.tenants, id),
            Domain::Expedition => remove_record(&mut self.expeditions, id),
            Domain::Telecom => remove_record(&mut self.telecom, id),
        };
        Self::patched(found, domain, id)
    }

    /// Run the report query pipeline for one domain. Spice merges both site
    /// lists, keeping only records flagged in use and labelling each row with
    /// its site.
    pub fn report(&self, domain: Domain, search: &str, sort: SortMode) -> ReportRows {
        match domain {
            Domain::Spice => {
                let rows: Vec<SpiceRow> = self
                    .spice_makkah
                    .iter()
                    .filter(|r| r.is_used)
                    .map(|r| SpiceRow {
                        site: Site::Makkah,
                        record: r.clone(),
                    })
                    .chain(self.spice_madinah.iter().filter(|r| r.is_used).map(|r| {
                        SpiceRow {
                            site: Site::Madinah,
                            record: r.clone(),
                        }
                    }))
                    .collect();
                ReportRows::Spice(query::run(rows, search, sort))
            }
            Domain::Rice => ReportRows::Rice(query::run(self.rice.clone(), search, sort)),
            Domain::Rte => ReportRows::Rte(query::run(self.rte.clone(), search, sort)),
            Domain::Tenant => ReportRows::Tenant(query::run(self.tenants.clone(), search, sort)),
            Domain::Expedition => {
                ReportRows::Expedition(query::run(self.expeditions.clone(), search, sort))
            }
            Domain::Telecom => ReportRows::Telecom(query::run(self.telecom.clone(), search, sort)),
        }
    }

    /// Cross-domain lookup over each domain's primary name field. A blank
    /// term returns nothing.
    pub fn global_search(&self, term: &str) -> Vec<SearchHit> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();

        for (site, list) in [
            (Site::Makkah, &self.spice_makkah),
            (Site::Madinah, &self.spice_madinah),
        ] {
            for record in list.iter() {
                if record.name.to_lowercase().contains(&term) {
                    let volume = if record.volume.is_empty() {
                        "0"
                    } else {
                        &record.volume
                    };
                    hits.push(SearchHit {
                        domain: Domain::Spice,
                        id: record.id,
                        title: record.name.clone(),
                        subtitle: format!("{site} / Vol: {volume}"),
                    });
                }
            }
        }

        for record in &self.rice {
            if record.company_name.to_lowercase().contains(&term) {
                hits.push(SearchHit {
                    domain: Domain::Rice,
                    id: record.id,
                    title: record.company_name.clone(),
                    subtitle: record.rice_type.clone(),
                });
            }
        }

        for record in &self.rte {
            if record.company_name.to_lowercase().contains(&term) {
                hits.push(SearchHit {
                    domain: Domain::Rte,
                    id: record.id,
                    title: record.company_name.clone(),
                    subtitle: record.menu.clone(),
                });
            }
        }

        for record in &self.tenants {
            if record.shop_name.to_lowercase().contains(&term) {
                hits.push(SearchHit {
                    domain: Domain::Tenant,
                    id: record.id,
                    title: record.shop_name.clone(),
                    subtitle: record.product_type.clone(),
                });
            }
        }

        for record in &self.expeditions {
            if record.company_name.to_lowercase().contains(&term) {
                hits.push(SearchHit {
                    domain: Domain::Expedition,
                    id: record.id,
                    title: record.company_name.clone(),
                    subtitle: format!("{} Kg", record.weight),
                });
            }
        }

        for record in &self.telecom {
            if record.provider_name.to_lowercase().contains(&term) {
                hits.push(SearchHit {
                    domain: Domain::Telecom,
                    id: record.id,
                    title: record.provider_name.clone(),
                    subtitle: record.roaming_package.clone(),
                });
            }
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spice(name: &str, used: bool) -> SpiceRecord {
        SpiceRecord {
            name: name.to_string(),
            is_used: used,
            ..Default::default()
        }
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let mut store = DataStore::default();
        assert_eq!(store.add_rice(RiceRecord::default()), 1);
        assert_eq!(store.add_rice(RiceRecord::default()), 2);

        store.delete(Domain::Rice, None, 2).unwrap();
        // The freed id is reused, as in the original entry forms.
        assert_eq!(store.add_rice(RiceRecord::default()), 2);
    }

    #[test]
    fn spice_ids_are_per_site_list() {
        let mut store = DataStore::default();
        assert_eq!(store.add_spice(Site::Makkah, spice("Kunyit", true)), 1);
        assert_eq!(store.add_spice(Site::Madinah, spice("Jahe", true)), 1);
        assert_eq!(store.add_spice(Site::Makkah, spice("Lada", true)), 2);
    }

    #[test]
    fn spice_report_merges_sites_and_skips_unused() {
        let mut store = DataStore::default();
        store.add_spice(Site::Makkah, spice("Kunyit", true));
        store.add_spice(Site::Makkah, spice("Pala", false));
        store.add_spice(Site::Madinah, spice("Jahe", true));

        let report = store.report(Domain::Spice, "", SortMode::Oldest);
        assert_eq!(report.len(), 2);

        let rows = report.table_rows();
        let sites: Vec<&str> = rows.iter().map(|r| r[2].as_str()).collect();
        assert!(sites.contains(&"Makkah"));
        assert!(sites.contains(&"Madinah"));
    }

    #[test]
    fn spice_rows_match_on_site_name() {
        let mut store = DataStore::default();
        store.add_spice(Site::Makkah, spice("Kunyit", true));
        store.add_spice(Site::Madinah, spice("Jahe", true));

        let report = store.report(Domain::Spice, "madinah", SortMode::Newest);
        assert_eq!(report.len(), 1);
        assert_eq!(report.table_rows()[0][0], "Jahe");
    }

    #[test]
    fn update_patches_in_place() {
        let mut store = DataStore::default();
        let id = store.add_tenant(TenantRecord {
            shop_name: "Toko Amanah".to_string(),
            ..Default::default()
        });

        store
            .update_tenant(id, |t| t.rent_cost = "4500".to_string())
            .unwrap();
        assert_eq!(store.tenants[0].rent_cost, "4500");

        let missing = store.update_tenant(99, |t| t.rent_cost.clear());
        assert!(matches!(
            missing,
            Err(PortalError::RecordNotFound {
                domain: Domain::Tenant,
                id: 99
            })
        ));
    }

    #[test]
    fn delete_spice_requires_site() {
        let mut store = DataStore::default();
        store.add_spice(Site::Makkah, spice("Kunyit", true));

        assert!(store.delete(Domain::Spice, None, 1).is_err());
        assert!(store.delete(Domain::Spice, Some(Site::Makkah), 1).is_ok());
        assert!(store.spice_makkah.is_empty());
    }

    #[test]
    fn global_search_scans_primary_names() {
        let mut store = DataStore::default();
        store.add_spice(Site::Makkah, spice("Bumbu Rendang", true));
        store.add_rice(RiceRecord {
            company_name: "Barakah Rendang Supply".to_string(),
            rice_type: "Premium".to_string(),
            ..Default::default()
        });
        store.add_telecom(TelecomRecord {
            provider_name: "Telkomsel".to_string(),
            ..Default::default()
        });

        let hits = store.global_search("rendang");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|h| h.domain == Domain::Spice));
        assert!(hits.iter().any(|h| h.domain == Domain::Rice));

        assert!(store.global_search("  ").is_empty());
    }

    #[test]
    fn snapshot_round_trips() {
        let mut store = DataStore::default();
        store.add_rice(RiceRecord {
            company_name: "Amanah".to_string(),
            price: "120".to_string(),
            ..Default::default()
        });
        store.add_spice(Site::Madinah, spice("Kapulaga", true));

        let bytes = store.to_json().unwrap();
        let restored = DataStore::from_json(&bytes).unwrap();

        assert_eq!(restored.rice.len(), 1);
        assert_eq!(restored.rice[0].company_name, "Amanah");
        assert_eq!(restored.spice_madinah.len(), 1);
        assert_eq!(restored.total_records(), 2);
    }
}
