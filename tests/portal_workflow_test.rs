use anyhow::Result;
use haji_portal::domain::model::{RiceRecord, SpiceRecord, Site};
use haji_portal::{Domain, LocalStorage, Portal, PortalError, SortMode, TomlConfig};
use tempfile::TempDir;

fn test_config() -> TomlConfig {
    TomlConfig::from_toml_str(
        r#"
[data]
path = "data/portal.json"

[export]
output_dir = "exports"
filename_prefix = "laporan"
"#,
    )
    .unwrap()
}

fn rice(company: &str, price: &str) -> RiceRecord {
    RiceRecord {
        company_name: company.to_string(),
        price: price.to_string(),
        is_used: true,
        ..Default::default()
    }
}

/// Full session cycle: add records, reopen from the snapshot, edit, delete.
#[test]
fn test_snapshot_survives_sessions() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();

    {
        let mut portal = Portal::open(LocalStorage::new(base.clone()), test_config())?;
        portal.mutate(|store| {
            store.add_rice(rice("Barakah", "50"));
            store.add_rice(rice("Amanah", "65"));
            Ok(())
        })?;
    }

    assert!(temp_dir.path().join("data/portal.json").exists());

    let mut portal = Portal::open(LocalStorage::new(base.clone()), test_config())?;
    assert_eq!(portal.store().total_records(), 2);

    portal.mutate(|store| store.update_rice(1, |r| r.price = "55".to_string()))?;
    portal.mutate(|store| store.delete(Domain::Rice, None, 2))?;

    let portal = Portal::open(LocalStorage::new(base), test_config())?;
    assert_eq!(portal.store().rice.len(), 1);
    assert_eq!(portal.store().rice[0].price, "55");

    Ok(())
}

#[test]
fn test_export_writes_dated_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();

    let mut portal = Portal::open(LocalStorage::new(base), test_config())?;
    portal.mutate(|store| {
        store.add_rice(rice("Barakah", "50"));
        store.add_rice(RiceRecord {
            company_name: "Amanah".to_string(),
            is_used: true,
            ..Default::default()
        });
        Ok(())
    })?;

    let (path, rows) = portal.export(Domain::Rice, "", Some(SortMode::Oldest), None)?;
    assert_eq!(rows, 2);
    assert!(path.starts_with("exports/laporan_beras_"));
    assert!(path.ends_with(".csv"));

    let content = std::fs::read_to_string(temp_dir.path().join(&path))?;
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"Perusahaan\",\"Jenis Beras\",\"Volume (Ton)\",\"Harga (SAR)\",\"Asal Produk\",\"Harga Asal\",\"Surveyor\",\"Tanggal\""
    );

    let first = lines.next().unwrap();
    assert!(first.starts_with("\"Barakah\""));

    // Blank survey fields export as a dash.
    let second = lines.next().unwrap();
    assert!(second.contains("\"-\""));

    Ok(())
}

#[test]
fn test_empty_export_is_rejected_without_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();

    let portal = Portal::open(LocalStorage::new(base), test_config())?;
    let err = portal
        .export(Domain::Tenant, "", None, None)
        .unwrap_err();

    assert!(matches!(err, PortalError::EmptyExport { .. }));
    assert_eq!(err.exit_code(), 0);
    assert!(!temp_dir.path().join("exports").exists());

    Ok(())
}

#[test]
fn test_export_to_explicit_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();

    let mut portal = Portal::open(LocalStorage::new(base), test_config())?;
    portal.mutate(|store| {
        store.add_spice(
            Site::Makkah,
            SpiceRecord {
                name: "Jahe".to_string(),
                volume: "12.5".to_string(),
                is_used: true,
                ..Default::default()
            },
        );
        Ok(())
    })?;

    let (path, rows) = portal.export(
        Domain::Spice,
        "jahe",
        None,
        Some("out/bumbu.csv".to_string()),
    )?;
    assert_eq!(rows, 1);
    assert_eq!(path, "out/bumbu.csv");

    let content = std::fs::read_to_string(temp_dir.path().join("out/bumbu.csv"))?;
    assert!(content.contains("\"Jahe\""));
    assert!(content.contains("\"Makkah\""));

    Ok(())
}

#[test]
fn test_spice_delete_requires_site() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();

    let mut portal = Portal::open(LocalStorage::new(base), test_config())?;
    portal.mutate(|store| {
        store.add_spice(Site::Madinah, SpiceRecord::default());
        Ok(())
    })?;

    let err = portal
        .mutate(|store| store.delete(Domain::Spice, None, 1))
        .unwrap_err();
    assert!(matches!(err, PortalError::Validation { .. }));

    portal.mutate(|store| store.delete(Domain::Spice, Some(Site::Madinah), 1))?;
    assert_eq!(portal.store().total_records(), 0);

    Ok(())
}
