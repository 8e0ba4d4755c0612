use crate::domain::ports::ReportRow;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six survey categories tracked by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Spice,
    Rice,
    Rte,
    Tenant,
    Expedition,
    Telecom,
}

impl Domain {
    /// Short Indonesian tag used in export file names (`laporan_bumbu_...`).
    pub fn slug(&self) -> &'static str {
        match self {
            Domain::Spice => "bumbu",
            Domain::Rice => "beras",
            Domain::Rte => "rte",
            Domain::Tenant => "tenant",
            Domain::Expedition => "ekspedisi",
            Domain::Telecom => "telco",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Spice => "spice",
            Domain::Rice => "rice",
            Domain::Rte => "rte",
            Domain::Tenant => "tenant",
            Domain::Expedition => "expedition",
            Domain::Telecom => "telecom",
        };
        f.write_str(name)
    }
}

/// Spice records are surveyed at two sites and kept in separate lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Makkah,
    Madinah,
}

impl Site {
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Makkah => "Makkah",
            Site::Madinah => "Madinah",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Survey fields are free text as entered by the surveyor; numeric-looking
// fields (volume, price, weight) stay strings and are parsed on demand.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpiceRecord {
    pub id: u32,
    pub name: String,
    pub company_name: String,
    pub kitchen_name: String,
    pub address: String,
    pub pic: String,
    pub volume: String,
    pub other_ingredients: String,
    pub price: String,
    pub surveyor: String,
    pub date: String,
    pub time: String,
    pub is_used: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiceRecord {
    pub id: u32,
    pub company_name: String,
    pub rice_type: String,
    pub is_used: bool,
    pub volume: String,
    pub price: String,
    pub other_rice: String,
    pub origin_product: String,
    pub product_price: String,
    pub kitchen_name: String,
    pub address: String,
    pub pic: String,
    pub surveyor: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RteRecord {
    pub id: u32,
    pub company_name: String,
    pub menu: String,
    pub kitchen_name: String,
    pub address: String,
    pub pic: String,
    pub volume: String,
    pub price: String,
    pub surveyor: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantRecord {
    pub id: u32,
    pub shop_name: String,
    pub hotel_name: String,
    pub location: String,
    pub pic: String,
    pub product_type: String,
    pub best_seller: String,
    pub rent_cost: String,
    pub surveyor: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpeditionRecord {
    pub id: u32,
    pub company_name: String,
    pub hotel_name: String,
    pub location: String,
    pub pic: String,
    pub weight: String,
    pub price_per_kg: String,
    pub surveyor: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelecomRecord {
    pub id: u32,
    pub provider_name: String,
    pub respondent_name: String,
    pub kloter: String,
    pub embarkation: String,
    pub province: String,
    pub roaming_package: String,
    pub surveyor: String,
    pub date: String,
}

/// A spice record labelled with the site list it came from. The site is a
/// property of the containing list, so it is attached when the report is
/// assembled rather than stored on the record.
#[derive(Debug, Clone)]
pub struct SpiceRow {
    pub site: Site,
    pub record: SpiceRecord,
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ReportRow for SpiceRow {
    const HEADERS: &'static [&'static str] = &[
        "Jenis Bumbu",
        "Perusahaan",
        "Lokasi",
        "Dapur",
        "Alamat",
        "PIC",
        "Volume (Ton)",
        "Bahan Lain",
        "Harga (SAR)",
        "Surveyor",
        "Tanggal",
        "Waktu",
    ];

    fn id(&self) -> u32 {
        self.record.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.record.name,
            &self.record.company_name,
            self.site.as_str(),
            &self.record.kitchen_name,
            &self.record.address,
            &self.record.pic,
        ]
    }

    fn volume_field(&self) -> Option<&str> {
        non_empty(&self.record.volume)
    }

    fn price_field(&self) -> Option<&str> {
        non_empty(&self.record.price)
    }

    fn columns(&self) -> Vec<&str> {
        vec![
            &self.record.name,
            &self.record.company_name,
            self.site.as_str(),
            &self.record.kitchen_name,
            &self.record.address,
            &self.record.pic,
            &self.record.volume,
            &self.record.other_ingredients,
            &self.record.price,
            &self.record.surveyor,
            &self.record.date,
            &self.record.time,
        ]
    }
}

impl ReportRow for RiceRecord {
    const HEADERS: &'static [&'static str] = &[
        "Perusahaan",
        "Jenis Beras",
        "Volume (Ton)",
        "Harga (SAR)",
        "Asal Produk",
        "Harga Asal",
        "Surveyor",
        "Tanggal",
    ];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.company_name, &self.rice_type, &self.volume]
    }

    fn volume_field(&self) -> Option<&str> {
        non_empty(&self.volume)
    }

    fn price_field(&self) -> Option<&str> {
        non_empty(&self.price)
    }

    fn columns(&self) -> Vec<&str> {
        vec![
            &self.company_name,
            &self.rice_type,
            &self.volume,
            &self.price,
            &self.origin_product,
            &self.product_price,
            &self.surveyor,
            &self.date,
        ]
    }
}

impl ReportRow for RteRecord {
    const HEADERS: &'static [&'static str] = &[
        "Perusahaan",
        "Menu",
        "Dapur",
        "Alamat",
        "PIC",
        "Volume (Porsi)",
        "Harga (SAR)",
        "Surveyor",
        "Tanggal",
        "Waktu",
    ];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.company_name, &self.menu]
    }

    fn volume_field(&self) -> Option<&str> {
        non_empty(&self.volume)
    }

    fn price_field(&self) -> Option<&str> {
        non_empty(&self.price)
    }

    fn columns(&self) -> Vec<&str> {
        vec![
            &self.company_name,
            &self.menu,
            &self.kitchen_name,
            &self.address,
            &self.pic,
            &self.volume,
            &self.price,
            &self.surveyor,
            &self.date,
            &self.time,
        ]
    }
}

impl ReportRow for TenantRecord {
    const HEADERS: &'static [&'static str] = &[
        "Nama Toko",
        "Hotel",
        "Lokasi",
        "PIC",
        "Produk Utama",
        "Best Seller",
        "Biaya Sewa (SAR)",
        "Surveyor",
        "Tanggal",
        "Waktu",
    ];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.shop_name, &self.hotel_name, &self.location, &self.pic]
    }

    fn volume_field(&self) -> Option<&str> {
        None
    }

    fn price_field(&self) -> Option<&str> {
        non_empty(&self.rent_cost)
    }

    fn columns(&self) -> Vec<&str> {
        vec![
            &self.shop_name,
            &self.hotel_name,
            &self.location,
            &self.pic,
            &self.product_type,
            &self.best_seller,
            &self.rent_cost,
            &self.surveyor,
            &self.date,
            &self.time,
        ]
    }
}

impl ReportRow for ExpeditionRecord {
    const HEADERS: &'static [&'static str] = &[
        "Perusahaan",
        "Hotel",
        "Lokasi",
        "PIC",
        "Berat (Kg)",
        "Harga/Kg (SAR)",
        "Surveyor",
        "Tanggal",
        "Waktu",
    ];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.company_name,
            &self.hotel_name,
            &self.location,
            &self.pic,
        ]
    }

    fn volume_field(&self) -> Option<&str> {
        non_empty(&self.weight)
    }

    fn price_field(&self) -> Option<&str> {
        non_empty(&self.price_per_kg)
    }

    fn columns(&self) -> Vec<&str> {
        vec![
            &self.company_name,
            &self.hotel_name,
            &self.location,
            &self.pic,
            &self.weight,
            &self.price_per_kg,
            &self.surveyor,
            &self.date,
            &self.time,
        ]
    }
}

impl ReportRow for TelecomRecord {
    const HEADERS: &'static [&'static str] = &[
        "Provider",
        "Nama Jemaah",
        "Kloter",
        "Embarkasi",
        "Provinsi",
        "Paket Roaming",
        "Surveyor",
        "Tanggal",
    ];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.provider_name,
            &self.respondent_name,
            &self.kloter,
            &self.embarkation,
            &self.province,
        ]
    }

    fn volume_field(&self) -> Option<&str> {
        None
    }

    fn price_field(&self) -> Option<&str> {
        None
    }

    fn columns(&self) -> Vec<&str> {
        vec![
            &self.provider_name,
            &self.respondent_name,
            &self.kloter,
            &self.embarkation,
            &self.province,
            &self.roaming_package,
            &self.surveyor,
            &self.date,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spice_row_exposes_site_in_search_and_columns() {
        let row = SpiceRow {
            site: Site::Madinah,
            record: SpiceRecord {
                id: 7,
                name: "Bumbu Gulai".to_string(),
                ..Default::default()
            },
        };

        assert!(row.search_fields().contains(&"Madinah"));
        assert_eq!(row.columns()[2], "Madinah");
        assert_eq!(row.columns().len(), SpiceRow::HEADERS.len());
    }

    #[test]
    fn column_counts_match_headers() {
        assert_eq!(
            RiceRecord::default().columns().len(),
            RiceRecord::HEADERS.len()
        );
        assert_eq!(
            RteRecord::default().columns().len(),
            RteRecord::HEADERS.len()
        );
        assert_eq!(
            TenantRecord::default().columns().len(),
            TenantRecord::HEADERS.len()
        );
        assert_eq!(
            ExpeditionRecord::default().columns().len(),
            ExpeditionRecord::HEADERS.len()
        );
        assert_eq!(
            TelecomRecord::default().columns().len(),
            TelecomRecord::HEADERS.len()
        );
    }

    #[test]
    fn empty_metric_fields_are_absent() {
        let rice = RiceRecord::default();
        assert!(rice.volume_field().is_none());
        assert!(rice.price_field().is_none());

        let rice = RiceRecord {
            volume: "12.5".to_string(),
            ..Default::default()
        };
        assert_eq!(rice.volume_field(), Some("12.5"));
    }

    #[test]
    fn record_snapshot_uses_camel_case_keys() {
        let record = RiceRecord {
            id: 1,
            company_name: "Barakah".to_string(),
            rice_type: "Premium".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"companyName\""));
        assert!(json.contains("\"riceType\""));
        assert!(json.contains("\"isUsed\""));
    }
}
