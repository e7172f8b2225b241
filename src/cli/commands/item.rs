//! `lbm item` command - master-data item management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::project::Project;
use crate::core::store::Store;
use crate::entities::item::{Item, ItemKind};

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items with filtering
    List(ListArgs),

    /// Create a new item
    New(NewArgs),

    /// Show an item's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in code and name
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by classification kind
    #[arg(long, short = 'k')]
    pub kind: Option<ItemKind>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Item code (required)
    #[arg(long, short = 'c')]
    pub code: String,

    /// Display name (required)
    #[arg(long, short = 'N')]
    pub name: String,

    /// Classification kind
    #[arg(long, short = 'k', default_value = "part")]
    pub kind: ItemKind,

    /// Detailed description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Item ID (full or fragment)
    pub id: String,
}

impl clap::ValueEnum for ItemKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            ItemKind::Assembly,
            ItemKind::Subassembly,
            ItemKind::Phantom,
            ItemKind::Part,
            ItemKind::Purchased,
            ItemKind::Raw,
            ItemKind::Consumable,
            ItemKind::Document,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            // never offered on the command line; only absorbed on load
            ItemKind::Unknown => None,
            other => Some(clap::builder::PossibleValue::new(other.to_string())),
        }
    }
}

pub fn run(cmd: ItemCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ItemCommands::List(args) => run_list(args, global),
        ItemCommands::New(args) => run_new(args, global),
        ItemCommands::Show(args) => run_show(args),
    }
}

fn open_store() -> Result<Store> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    Ok(Store::new(project))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let mut items = store.list_items();

    if let Some(search) = &args.search {
        let needle = search.to_lowercase();
        items.retain(|item| {
            item.code.to_lowercase().contains(&needle) || item.name.to_lowercase().contains(&needle)
        });
    }
    if let Some(kind) = args.kind {
        items.retain(|item| item.kind == kind);
    }
    if let Some(limit) = args.limit {
        items.truncate(limit);
    }

    if items.is_empty() {
        println!("No items found");
        return Ok(());
    }

    match global.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&items).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&items).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,code,name,kind,status");
            for item in &items {
                println!(
                    "{},{},{},{},{}",
                    item.id,
                    escape_csv(&item.code),
                    escape_csv(&item.name),
                    item.kind,
                    item.status
                );
            }
        }
        _ => {
            println!(
                "{:<17} {:<14} {:<30} {:<12} {:<10}",
                style("ID").bold(),
                style("CODE").bold(),
                style("NAME").bold(),
                style("KIND").bold(),
                style("STATUS").bold()
            );
            println!("{}", "-".repeat(85));
            for item in &items {
                println!(
                    "{:<17} {:<14} {:<30} {:<12} {:<10}",
                    format_short_id(&item.id),
                    truncate_str(&item.code, 12),
                    truncate_str(&item.name, 28),
                    item.kind,
                    item.status
                );
            }
            println!();
            println!("{} item(s) found", items.len());
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;

    let mut item = Item::new(args.code, args.name, args.kind, global.author.clone());
    item.description = args.description;
    store.save(&item).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created item {} ({})",
        style("✓").green().bold(),
        style(&item.id).yellow(),
        item.code
    );
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let store = open_store()?;
    let item: Item = store.find(&args.id).map_err(|e| miette::miette!("{}", e))?;

    println!();
    println!(
        "{} {} - {}",
        style("Item").bold(),
        style(&item.code).yellow(),
        style(&item.name).white()
    );
    println!("  id:      {}", item.id);
    println!("  kind:    {}", item.kind);
    println!("  status:  {}", item.status);
    if let Some(desc) = &item.description {
        println!("  desc:    {}", desc);
    }
    println!("  created: {}", item.created.format("%Y-%m-%d %H:%M"));
    println!("  author:  {}", item.author);
    Ok(())
}
