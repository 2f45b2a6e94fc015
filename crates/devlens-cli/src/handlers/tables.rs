use crate::types::OutputFormat;
use anyhow::{bail, Result};
use devlens_index::{format_cell, Database, TableBrowser, TableCatalog};
use devlens_server::Config;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub fn handle(
    config: &Config,
    table: Option<&str>,
    page: i64,
    per_page: i64,
    format: OutputFormat,
) -> Result<()> {
    let Some(db_path) = &config.database else {
        bail!("No database configured; pass --db or set `database` in devlens.toml");
    };
    let db = Database::open(db_path)?;
    let catalog = TableCatalog::new();

    match table {
        None => list_tables(&db, &catalog, format),
        Some(name) => show_table(&db, &catalog, name, page, per_page, format),
    }
}

fn list_tables(db: &Database, catalog: &TableCatalog, format: OutputFormat) -> Result<()> {
    let names = catalog.table_names(db)?;

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if names.is_empty() {
        println!("No browsable tables found");
        return Ok(());
    }

    let color = std::io::stdout().is_terminal();
    for name in names {
        let descriptor = catalog.descriptor(db, &name)?;
        let detail = match descriptor.as_ref().and_then(|d| d.primary_key.as_deref()) {
            Some(pk) => format!("pk: {}", pk),
            None => "no primary key".to_string(),
        };
        if color {
            println!("{}  ({})", name.bold(), detail.dimmed());
        } else {
            println!("{}  ({})", name, detail);
        }
    }

    Ok(())
}

fn show_table(
    db: &Database,
    catalog: &TableCatalog,
    name: &str,
    page: i64,
    per_page: i64,
    format: OutputFormat,
) -> Result<()> {
    let browser = TableBrowser::new(db, catalog);
    let row_page = browser.fetch_page(name, page, per_page)?;

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&row_page)?);
        return Ok(());
    }

    println!(
        "{} - page {} ({} per page, {} total)",
        name, row_page.page, row_page.per_page, row_page.total
    );
    println!("{}", row_page.columns.join(" | "));

    for row in &row_page.rows {
        let cells: Vec<String> = row.iter().map(format_cell).collect();
        println!("{}", cells.join(" | "));
    }

    if row_page.rows.is_empty() {
        println!("(no rows at this offset)");
    }

    Ok(())
}
