use clap::Parser;
use haji_portal::config::cli::{AddForm, Command, EditForm};
use haji_portal::core::query::ReportRows;
use haji_portal::utils::{logger, validation::Validate};
use haji_portal::{CliConfig, Domain, LocalStorage, Portal, Result, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting haji-portal CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(".".to_string());

    if let Err(e) = run(cli.command, storage, config) {
        tracing::error!("❌ Command failed: {} (Severity: {:?})", e, e.severity());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn load_config(cli: &CliConfig) -> Result<TomlConfig> {
    let mut config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };

    config.apply_overrides(cli.data_path.as_deref(), cli.export_dir.as_deref());
    config.validate()?;
    Ok(config)
}

fn run(command: Command, storage: LocalStorage, config: TomlConfig) -> Result<()> {
    let mut portal = Portal::open(storage, config)?;

    match command {
        Command::Add { form } => {
            let (domain, id) = add(&mut portal, form)?;
            println!("✅ Record #{id} ditambahkan ke {domain}");
        }
        Command::Edit { form } => {
            let (domain, id) = edit(&mut portal, form)?;
            println!("✅ Record #{id} di {domain} diperbarui");
        }
        Command::Delete { domain, id, site } => {
            portal.mutate(|store| store.delete(domain, site, id))?;
            println!("✅ Record #{id} dihapus dari {domain}");
        }
        Command::List {
            domain,
            search,
            sort,
        } => {
            let report = portal.report(domain, &search, sort);
            print_report(&report);
        }
        Command::Export {
            domain,
            search,
            sort,
            output,
        } => {
            let (path, rows) = portal.export(domain, &search, sort, output)?;
            println!("✅ {rows} baris diekspor");
            println!("📁 {path}");
        }
        Command::Search { term } => {
            let hits = portal.global_search(&term);
            if hits.is_empty() {
                println!("Data tidak ditemukan.");
            } else {
                for hit in &hits {
                    println!("[{}] #{} {} | {}", hit.domain, hit.id, hit.title, hit.subtitle);
                }
                println!("Total Record: {}", hits.len());
            }
        }
    }

    Ok(())
}

fn add<S, C>(portal: &mut Portal<S, C>, form: AddForm) -> Result<(Domain, u32)>
where
    S: haji_portal::core::Storage,
    C: haji_portal::core::ConfigProvider,
{
    match form {
        AddForm::Spice { site, fields } => {
            fields.validate()?;
            let id = portal.mutate(|store| Ok(store.add_spice(site, fields.build())))?;
            Ok((Domain::Spice, id))
        }
        AddForm::Rice { fields } => {
            fields.validate()?;
            let id = portal.mutate(|store| Ok(store.add_rice(fields.build())))?;
            Ok((Domain::Rice, id))
        }
        AddForm::Rte { fields } => {
            fields.validate()?;
            let id = portal.mutate(|store| Ok(store.add_rte(fields.build())))?;
            Ok((Domain::Rte, id))
        }
        AddForm::Tenant { fields } => {
            fields.validate()?;
            let id = portal.mutate(|store| Ok(store.add_tenant(fields.build())))?;
            Ok((Domain::Tenant, id))
        }
        AddForm::Expedition { fields } => {
            fields.validate()?;
            let id = portal.mutate(|store| Ok(store.add_expedition(fields.build())))?;
            Ok((Domain::Expedition, id))
        }
        AddForm::Telecom { fields } => {
            fields.validate()?;
            let id = portal.mutate(|store| Ok(store.add_telecom(fields.build())))?;
            Ok((Domain::Telecom, id))
        }
    }
}

fn edit<S, C>(portal: &mut Portal<S, C>, form: EditForm) -> Result<(Domain, u32)>
where
    S: haji_portal::core::Storage,
    C: haji_portal::core::ConfigProvider,
{
    match form {
        EditForm::Spice { site, id, fields } => {
            fields.validate()?;
            portal.mutate(|store| store.update_spice(site, id, |r| fields.apply(r)))?;
            Ok((Domain::Spice, id))
        }
        EditForm::Rice { id, fields } => {
            fields.validate()?;
            portal.mutate(|store| store.update_rice(id, |r| fields.apply(r)))?;
            Ok((Domain::Rice, id))
        }
        EditForm::Rte { id, fields } => {
            fields.validate()?;
            portal.mutate(|store| store.update_rte(id, |r| fields.apply(r)))?;
            Ok((Domain::Rte, id))
        }
        EditForm::Tenant { id, fields } => {
            fields.validate()?;
            portal.mutate(|store| store.update_tenant(id, |r| fields.apply(r)))?;
            Ok((Domain::Tenant, id))
        }
        EditForm::Expedition { id, fields } => {
            fields.validate()?;
            portal.mutate(|store| store.update_expedition(id, |r| fields.apply(r)))?;
            Ok((Domain::Expedition, id))
        }
        EditForm::Telecom { id, fields } => {
            fields.validate()?;
            portal.mutate(|store| store.update_telecom(id, |r| fields.apply(r)))?;
            Ok((Domain::Telecom, id))
        }
    }
}

/// Render a report as an aligned text table, mirroring the export columns.
fn print_report(report: &ReportRows) {
    if report.is_empty() {
        println!("Data tidak ditemukan.");
        return;
    }

    let headers = report.headers();
    let rows = report.table_rows();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(headers.to_vec()));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    for row in &rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
    println!("Total Record: {}", rows.len());
}
