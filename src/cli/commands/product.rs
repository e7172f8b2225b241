//! `lbm product` command - product management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::project::Project;
use crate::core::store::Store;
use crate::entities::{Item, Product};

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    List,

    /// Create a new product
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Product code (required)
    #[arg(long, short = 'c')]
    pub code: String,

    /// Display name (required)
    #[arg(long, short = 'N')]
    pub name: String,

    /// Root item ID (full or fragment)
    #[arg(long, short = 'r')]
    pub root_item: String,
}

pub fn run(cmd: ProductCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProductCommands::List => run_list(global),
        ProductCommands::New(args) => run_new(args, global),
    }
}

fn open_store() -> Result<Store> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    Ok(Store::new(project))
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let products = store.list_products();

    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }

    match global.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&products).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&products).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,code,name,root_item_id,status");
            for product in &products {
                println!(
                    "{},{},{},{},{}",
                    product.id,
                    escape_csv(&product.code),
                    escape_csv(&product.name),
                    product.root_item_id,
                    product.status
                );
            }
        }
        _ => {
            println!(
                "{:<17} {:<14} {:<30} {:<17} {:<10}",
                style("ID").bold(),
                style("CODE").bold(),
                style("NAME").bold(),
                style("ROOT ITEM").bold(),
                style("STATUS").bold()
            );
            println!("{}", "-".repeat(90));
            for product in &products {
                println!(
                    "{:<17} {:<14} {:<30} {:<17} {:<10}",
                    format_short_id(&product.id),
                    truncate_str(&product.code, 12),
                    truncate_str(&product.name, 28),
                    format_short_id(&product.root_item_id),
                    product.status
                );
            }
            println!();
            println!("{} product(s) found", products.len());
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let root: Item = store
        .find(&args.root_item)
        .map_err(|e| miette::miette!("{}", e))?;

    let product = Product::new(args.code, args.name, root.id, global.author.clone());
    store.save(&product).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created product {} ({})",
        style("✓").green().bold(),
        style(&product.id).yellow(),
        product.code
    );
    Ok(())
}
