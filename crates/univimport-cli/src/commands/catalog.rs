//! Catalog command - inspect the article catalog.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use univimport_core::load_catalog;
use univimport_core::normalize::extract_leading_number;

use super::config::load_config;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog workbook (default: configured catalog file)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Keep only rows whose customer column contains this text
    #[arg(long)]
    customer_filter: Option<String>,

    #[command(subcommand)]
    command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Look up the description for an article id or text containing one
    Lookup {
        /// Article id, e.g. "10030004.112" or "Art. 4711"
        text: String,
    },
}

pub fn run(args: CatalogArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let path = args
        .catalog
        .unwrap_or_else(|| config.input.catalog_file.clone());

    if !path.exists() {
        anyhow::bail!("Catalog file not found: {}", path.display());
    }

    let catalog = load_catalog(&path, args.customer_filter.as_deref())?;

    match args.command {
        None => {
            println!("Catalog: {}", path.display());
            println!("Sheet:   {}", catalog.sheet());
            println!("Entries: {}", catalog.len());
        }
        Some(CatalogCommand::Lookup { text }) => {
            let key = extract_leading_number(&text);
            match catalog.lookup(&text) {
                Some(description) => println!("{}\t{}", key, description),
                None => {
                    println!("{} No catalog entry for '{}'", style("⚠").yellow(), key);
                    anyhow::bail!("article '{}' not found in catalog", text);
                }
            }
        }
    }

    Ok(())
}
