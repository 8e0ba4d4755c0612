//! CLI subcommands. The per-domain argument groups are the command-line
//! rendition of the original entry forms: every survey field is an optional
//! flag, so one struct serves both `add` (unset fields stay blank) and
//! `edit` (unset fields stay untouched).

use crate::core::query::SortMode;
use crate::domain::model::{
    Domain, ExpeditionRecord, RiceRecord, RteRecord, Site, SpiceRecord, TelecomRecord,
    TenantRecord,
};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::{validate_date, validate_time};
use clap::{Args, Subcommand};
use std::fs;
use std::path::Path;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new survey entry
    Add {
        #[command(subcommand)]
        form: AddForm,
    },
    /// Update fields of an existing record
    Edit {
        #[command(subcommand)]
        form: EditForm,
    },
    /// Delete a record by id
    Delete {
        #[arg(value_enum)]
        domain: Domain,
        id: u32,
        /// Required for spice; ignored elsewhere
        #[arg(long, value_enum)]
        site: Option<Site>,
    },
    /// List a domain's records, filtered and sorted
    List {
        #[arg(value_enum)]
        domain: Domain,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        sort: Option<SortMode>,
    },
    /// Export a report as CSV
    Export {
        #[arg(value_enum)]
        domain: Domain,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        sort: Option<SortMode>,
        /// Explicit output path; defaults to the configured export directory
        #[arg(long)]
        output: Option<String>,
    },
    /// Search every domain's primary name field
    Search { term: String },
}

#[derive(Debug, Subcommand)]
pub enum AddForm {
    Spice {
        #[arg(long, value_enum)]
        site: Site,
        #[command(flatten)]
        fields: SpiceArgs,
    },
    Rice {
        #[command(flatten)]
        fields: RiceArgs,
    },
    Rte {
        #[command(flatten)]
        fields: RteArgs,
    },
    Tenant {
        #[command(flatten)]
        fields: TenantArgs,
    },
    Expedition {
        #[command(flatten)]
        fields: ExpeditionArgs,
    },
    Telecom {
        #[command(flatten)]
        fields: TelecomArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum EditForm {
    Spice {
        #[arg(long, value_enum)]
        site: Site,
        id: u32,
        #[command(flatten)]
        fields: SpiceArgs,
    },
    Rice {
        id: u32,
        #[command(flatten)]
        fields: RiceArgs,
    },
    Rte {
        id: u32,
        #[command(flatten)]
        fields: RteArgs,
    },
    Tenant {
        id: u32,
        #[command(flatten)]
        fields: TenantArgs,
    },
    Expedition {
        id: u32,
        #[command(flatten)]
        fields: ExpeditionArgs,
    },
    Telecom {
        id: u32,
        #[command(flatten)]
        fields: TelecomArgs,
    },
}

fn set(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

fn check_stamp(date: &Option<String>, time: &Option<String>) -> Result<()> {
    if let Some(d) = date {
        validate_date("date", d)?;
    }
    if let Some(t) = time {
        validate_time("time", t)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Args)]
pub struct SpiceArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub kitchen: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub pic: Option<String>,
    #[arg(long)]
    pub volume: Option<String>,
    #[arg(long)]
    pub other_ingredients: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub surveyor: Option<String>,
    /// dd/mm/yyyy
    #[arg(long)]
    pub date: Option<String>,
    /// HH.MM
    #[arg(long)]
    pub time: Option<String>,
    /// Whether the spice is in use; only in-use records appear in reports
    #[arg(long)]
    pub in_use: Option<bool>,
}

impl SpiceArgs {
    pub fn validate(&self) -> Result<()> {
        check_stamp(&self.date, &self.time)
    }

    pub fn apply(&self, record: &mut SpiceRecord) {
        set(&mut record.name, &self.name);
        set(&mut record.company_name, &self.company);
        set(&mut record.kitchen_name, &self.kitchen);
        set(&mut record.address, &self.address);
        set(&mut record.pic, &self.pic);
        set(&mut record.volume, &self.volume);
        set(&mut record.other_ingredients, &self.other_ingredients);
        set(&mut record.price, &self.price);
        set(&mut record.surveyor, &self.surveyor);
        set(&mut record.date, &self.date);
        set(&mut record.time, &self.time);
        if let Some(used) = self.in_use {
            record.is_used = used;
        }
    }

    pub fn build(&self) -> SpiceRecord {
        // New entries default to in use, otherwise they would be invisible
        // in reports until edited.
        let mut record = SpiceRecord {
            is_used: true,
            ..Default::default()
        };
        self.apply(&mut record);
        record
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct RiceArgs {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub rice_type: Option<String>,
    #[arg(long)]
    pub volume: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub other_rice: Option<String>,
    #[arg(long)]
    pub origin_product: Option<String>,
    #[arg(long)]
    pub product_price: Option<String>,
    #[arg(long)]
    pub kitchen: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub pic: Option<String>,
    #[arg(long)]
    pub surveyor: Option<String>,
    /// dd/mm/yyyy
    #[arg(long)]
    pub date: Option<String>,
    /// HH.MM
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub in_use: Option<bool>,
}

impl RiceArgs {
    pub fn validate(&self) -> Result<()> {
        check_stamp(&self.date, &self.time)
    }

    pub fn apply(&self, record: &mut RiceRecord) {
        set(&mut record.company_name, &self.company);
        set(&mut record.rice_type, &self.rice_type);
        set(&mut record.volume, &self.volume);
        set(&mut record.price, &self.price);
        set(&mut record.other_rice, &self.other_rice);
        set(&mut record.origin_product, &self.origin_product);
        set(&mut record.product_price, &self.product_price);
        set(&mut record.kitchen_name, &self.kitchen);
        set(&mut record.address, &self.address);
        set(&mut record.pic, &self.pic);
        set(&mut record.surveyor, &self.surveyor);
        set(&mut record.date, &self.date);
        set(&mut record.time, &self.time);
        if let Some(used) = self.in_use {
            record.is_used = used;
        }
    }

    pub fn build(&self) -> RiceRecord {
        let mut record = RiceRecord {
            is_used: true,
            ..Default::default()
        };
        self.apply(&mut record);
        record
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct RteArgs {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub menu: Option<String>,
    #[arg(long)]
    pub kitchen: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub pic: Option<String>,
    /// Portions
    #[arg(long)]
    pub volume: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub surveyor: Option<String>,
    /// dd/mm/yyyy
    #[arg(long)]
    pub date: Option<String>,
    /// HH.MM
    #[arg(long)]
    pub time: Option<String>,
}

impl RteArgs {
    pub fn validate(&self) -> Result<()> {
        check_stamp(&self.date, &self.time)
    }

    pub fn apply(&self, record: &mut RteRecord) {
        set(&mut record.company_name, &self.company);
        set(&mut record.menu, &self.menu);
        set(&mut record.kitchen_name, &self.kitchen);
        set(&mut record.address, &self.address);
        set(&mut record.pic, &self.pic);
        set(&mut record.volume, &self.volume);
        set(&mut record.price, &self.price);
        set(&mut record.surveyor, &self.surveyor);
        set(&mut record.date, &self.date);
        set(&mut record.time, &self.time);
    }

    pub fn build(&self) -> RteRecord {
        let mut record = RteRecord::default();
        self.apply(&mut record);
        record
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct TenantArgs {
    #[arg(long)]
    pub shop: Option<String>,
    #[arg(long)]
    pub hotel: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub pic: Option<String>,
    #[arg(long)]
    pub product_type: Option<String>,
    #[arg(long)]
    pub best_seller: Option<String>,
    #[arg(long)]
    pub rent_cost: Option<String>,
    #[arg(long)]
    pub surveyor: Option<String>,
    /// dd/mm/yyyy
    #[arg(long)]
    pub date: Option<String>,
    /// HH.MM
    #[arg(long)]
    pub time: Option<String>,
}

impl TenantArgs {
    pub fn validate(&self) -> Result<()> {
        check_stamp(&self.date, &self.time)
    }

    pub fn apply(&self, record: &mut TenantRecord) {
        set(&mut record.shop_name, &self.shop);
        set(&mut record.hotel_name, &self.hotel);
        set(&mut record.location, &self.location);
        set(&mut record.pic, &self.pic);
        set(&mut record.product_type, &self.product_type);
        set(&mut record.best_seller, &self.best_seller);
        set(&mut record.rent_cost, &self.rent_cost);
        set(&mut record.surveyor, &self.surveyor);
        set(&mut record.date, &self.date);
        set(&mut record.time, &self.time);
    }

    pub fn build(&self) -> TenantRecord {
        let mut record = TenantRecord::default();
        self.apply(&mut record);
        record
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ExpeditionArgs {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub hotel: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub pic: Option<String>,
    /// Kilograms
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub price_per_kg: Option<String>,
    #[arg(long)]
    pub surveyor: Option<String>,
    /// dd/mm/yyyy
    #[arg(long)]
    pub date: Option<String>,
    /// HH.MM
    #[arg(long)]
    pub time: Option<String>,
}

impl ExpeditionArgs {
    pub fn validate(&self) -> Result<()> {
        check_stamp(&self.date, &self.time)
    }

    pub fn apply(&self, record: &mut ExpeditionRecord) {
        set(&mut record.company_name, &self.company);
        set(&mut record.hotel_name, &self.hotel);
        set(&mut record.location, &self.location);
        set(&mut record.pic, &self.pic);
        set(&mut record.weight, &self.weight);
        set(&mut record.price_per_kg, &self.price_per_kg);
        set(&mut record.surveyor, &self.surveyor);
        set(&mut record.date, &self.date);
        set(&mut record.time, &self.time);
    }

    pub fn build(&self) -> ExpeditionRecord {
        let mut record = ExpeditionRecord::default();
        self.apply(&mut record);
        record
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct TelecomArgs {
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub respondent: Option<String>,
    #[arg(long)]
    pub kloter: Option<String>,
    #[arg(long)]
    pub embarkation: Option<String>,
    #[arg(long)]
    pub province: Option<String>,
    #[arg(long)]
    pub roaming_package: Option<String>,
    #[arg(long)]
    pub surveyor: Option<String>,
    /// dd/mm/yyyy
    #[arg(long)]
    pub date: Option<String>,
}

impl TelecomArgs {
    pub fn validate(&self) -> Result<()> {
        check_stamp(&self.date, &None)
    }

    pub fn apply(&self, record: &mut TelecomRecord) {
        set(&mut record.provider_name, &self.provider);
        set(&mut record.respondent_name, &self.respondent);
        set(&mut record.kloter, &self.kloter);
        set(&mut record.embarkation, &self.embarkation);
        set(&mut record.province, &self.province);
        set(&mut record.roaming_package, &self.roaming_package);
        set(&mut record.surveyor, &self.surveyor);
        set(&mut record.date, &self.date);
    }

    pub fn build(&self) -> TelecomRecord {
        let mut record = TelecomRecord::default();
        self.apply(&mut record);
        record
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
