//! `lbm version` command - BOM version management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, format_short_id};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::project::Project;
use crate::core::store::Store;
use crate::entities::{BomVersion, Product};

#[derive(Subcommand, Debug)]
pub enum VersionCommands {
    /// List BOM versions
    List,

    /// Create a new BOM version for a product
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Product ID (full or fragment)
    #[arg(long, short = 'p')]
    pub product: String,

    /// Version label (e.g., "A", "B.1")
    #[arg(long, short = 'l')]
    pub label: String,
}

pub fn run(cmd: VersionCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        VersionCommands::List => run_list(global),
        VersionCommands::New(args) => run_new(args, global),
    }
}

fn open_store() -> Result<Store> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    Ok(Store::new(project))
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let versions = store.list_versions();

    if versions.is_empty() {
        println!("No versions found");
        return Ok(());
    }

    match global.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&versions).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&versions).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,product_id,label,status");
            for version in &versions {
                println!(
                    "{},{},{},{}",
                    version.id,
                    version.product_id,
                    escape_csv(&version.label),
                    version.status
                );
            }
        }
        _ => {
            println!(
                "{:<17} {:<17} {:<10} {:<10}",
                style("ID").bold(),
                style("PRODUCT").bold(),
                style("LABEL").bold(),
                style("STATUS").bold()
            );
            println!("{}", "-".repeat(56));
            for version in &versions {
                println!(
                    "{:<17} {:<17} {:<10} {:<10}",
                    format_short_id(&version.id),
                    format_short_id(&version.product_id),
                    version.label,
                    version.status
                );
            }
            println!();
            println!("{} version(s) found", versions.len());
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let product: Product = store
        .find(&args.product)
        .map_err(|e| miette::miette!("{}", e))?;

    let version = BomVersion::new(product.id, args.label, global.author.clone());
    store.save(&version).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created version {} (label {})",
        style("✓").green().bold(),
        style(&version.id).yellow(),
        version.label
    );
    Ok(())
}
