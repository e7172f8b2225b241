//! `lbm line` command - BOM line (edge) management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, format_short_id};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::project::Project;
use crate::core::store::Store;
use crate::entities::bom_line::{BomLine, LineRole, LineStatus};
use crate::entities::{BomVersion, Item};

#[derive(Subcommand, Debug)]
pub enum LineCommands {
    /// Add a line to a BOM version
    Add(AddArgs),

    /// Remove a line
    Rm(RmArgs),

    /// List a version's lines
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// BOM version ID (full or fragment)
    #[arg(long, short = 'v')]
    pub version: String,

    /// Parent item ID (full or fragment)
    #[arg(long, short = 'p')]
    pub parent: String,

    /// Child item ID (full or fragment)
    #[arg(long, short = 'i')]
    pub item: String,

    /// Units of the child per unit of the parent
    #[arg(long, short = 'q', default_value_t = 1)]
    pub qty: u32,

    /// Role of the child on this BOM
    #[arg(long, default_value = "component")]
    pub role: LineRole,

    /// Unit of measure code
    #[arg(long, default_value = "EA")]
    pub uom: String,

    /// Position number (drawing find number)
    #[arg(long)]
    pub position: Option<u32>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Line status
    #[arg(long, default_value = "active")]
    pub status: LineStatus,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Line ID (full or fragment)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// BOM version ID (full or fragment)
    pub version: String,
}

impl clap::ValueEnum for LineRole {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            LineRole::Component,
            LineRole::Subassembly,
            LineRole::Phantom,
            LineRole::Reference,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.to_string()))
    }
}

impl clap::ValueEnum for LineStatus {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            LineStatus::Active,
            LineStatus::Pending,
            LineStatus::Warning,
            LineStatus::Error,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.to_string()))
    }
}

pub fn run(cmd: LineCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LineCommands::Add(args) => run_add(args, global),
        LineCommands::Rm(args) => run_rm(args),
        LineCommands::List(args) => run_list(args, global),
    }
}

fn open_store() -> Result<Store> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    Ok(Store::new(project))
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    if args.qty == 0 {
        return Err(miette::miette!("line quantity must be greater than zero"));
    }

    let store = open_store()?;
    let version: BomVersion = store
        .find(&args.version)
        .map_err(|e| miette::miette!("{}", e))?;
    let parent: Item = store
        .find(&args.parent)
        .map_err(|e| miette::miette!("{}", e))?;
    let child: Item = store.find(&args.item).map_err(|e| miette::miette!("{}", e))?;

    let mut line = BomLine::new(
        version.id.clone(),
        parent.id.clone(),
        child.id.clone(),
        args.qty,
        global.author.clone(),
    );
    line.role = args.role;
    line.uom_code = args.uom;
    line.position_no = args.position;
    line.notes = args.notes;
    line.status = args.status;
    store.save(&line).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Added line {} : {} requires {} x {} ({})",
        style("✓").green().bold(),
        style(&line.id).yellow(),
        parent.code,
        line.quantity,
        child.code,
        line.uom_code
    );
    Ok(())
}

fn run_rm(args: RmArgs) -> Result<()> {
    let store = open_store()?;
    let line: BomLine = store.find(&args.id).map_err(|e| miette::miette!("{}", e))?;
    store
        .delete::<BomLine>(&line.id)
        .map_err(|e| miette::miette!("{}", e))?;

    println!("{} Removed line {}", style("✓").green().bold(), line.id);
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let version: BomVersion = store
        .find(&args.version)
        .map_err(|e| miette::miette!("{}", e))?;
    let lines = store.load_lines(&version.id);

    if lines.is_empty() {
        println!("No lines found for version {}", version.id);
        return Ok(());
    }

    match global.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&lines).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&lines).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,parent_item_id,item_id,quantity,role,uom_code,position_no,status");
            for line in &lines {
                println!(
                    "{},{},{},{},{},{},{},{}",
                    line.id,
                    line.parent_item_id,
                    line.item_id,
                    line.quantity,
                    line.role,
                    escape_csv(&line.uom_code),
                    line.position_no.map(|p| p.to_string()).unwrap_or_default(),
                    line.status
                );
            }
        }
        _ => {
            println!(
                "{:<17} {:<17} {:<17} {:>6} {:<12} {:<6} {:<8}",
                style("ID").bold(),
                style("PARENT").bold(),
                style("ITEM").bold(),
                style("QTY").bold(),
                style("ROLE").bold(),
                style("UOM").bold(),
                style("STATUS").bold()
            );
            println!("{}", "-".repeat(90));
            for line in &lines {
                println!(
                    "{:<17} {:<17} {:<17} {:>6} {:<12} {:<6} {:<8}",
                    format_short_id(&line.id),
                    format_short_id(&line.parent_item_id),
                    format_short_id(&line.item_id),
                    line.quantity,
                    line.role,
                    line.uom_code,
                    line.status
                );
            }
            println!();
            println!("{} line(s) found", lines.len());
        }
    }

    Ok(())
}
