//! `lbm bom` command - derived BOM views
//!
//! Both views follow the same shape: resolve the version to a root item
//! (the one terminal NotFound path), batch-load that version's lines and
//! the referenced item metadata, then run the in-memory traversal. Caps
//! truncate silently; a cyclic or oversized structure still renders.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::explosion::{explode, ExplodeOptions, MAX_EXPLOSION_DEPTH, MAX_EXPLOSION_ROWS};
use crate::core::graph::BomGraph;
use crate::core::project::Project;
use crate::core::store::Store;
use crate::core::tree::{build_tree, TreeOptions};

#[derive(Subcommand, Debug)]
pub enum BomCommands {
    /// Flatten a BOM version into quantity-rolled rows
    Explode(ExplodeArgs),

    /// Show a BOM version as a pruned assembly tree
    Tree(TreeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ExplodeArgs {
    /// BOM version ID (full or fragment)
    pub version: String,

    /// Maximum traversal depth (clamped to 1..=256)
    #[arg(long, default_value_t = MAX_EXPLOSION_DEPTH as i64)]
    pub max_depth: i64,

    /// Maximum emitted rows (clamped to 1..=200000)
    #[arg(long, default_value_t = MAX_EXPLOSION_ROWS as i64)]
    pub max_rows: i64,
}

#[derive(clap::Args, Debug)]
pub struct TreeArgs {
    /// BOM version ID (full or fragment)
    pub version: String,

    /// Prune to items matching this term plus their ancestor chains
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Keep childless items in the tree (default shows assemblies only)
    #[arg(long)]
    pub include_leaves: bool,
}

pub fn run(cmd: BomCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BomCommands::Explode(args) => run_explode(args, global),
        BomCommands::Tree(args) => run_tree(args, global),
    }
}

fn open_store() -> Result<Store> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    Ok(Store::new(project))
}

fn run_explode(args: ExplodeArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let (version, root) = store
        .resolve_root(&args.version)
        .map_err(|e| miette::miette!("{}", e))?;

    let lines = store.load_lines(&version.id);
    let graph = BomGraph::build(root, &lines);
    let resolver = store.load_metadata(graph.referenced().iter());

    let opts = ExplodeOptions::clamped(args.max_depth, args.max_rows);
    let rows = explode(&graph, &resolver, &opts);

    match global.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&rows).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!(
                "line_id,parent_item_id,item_id,item_code,item_name,qty,total_qty,uom_code,level,line_status"
            );
            for row in &rows {
                println!(
                    "{},{},{},{},{},{},{},{},{},{}",
                    row.line_id,
                    row.parent_item_id,
                    row.item_id,
                    escape_csv(&row.item_code),
                    escape_csv(&row.item_name),
                    row.qty,
                    row.total_qty,
                    escape_csv(&row.uom_code),
                    row.level,
                    row.line_status
                );
            }
        }
        _ => {
            println!();
            println!(
                "{} explosion for version {} (label {})",
                style("BOM").bold(),
                style(&version.id).yellow(),
                version.label
            );
            println!();
            println!(
                "{:<6} {:<14} {:<28} {:>8} {:>10} {:<6} {:<8}",
                style("LEVEL").bold(),
                style("CODE").bold(),
                style("NAME").bold(),
                style("QTY").bold(),
                style("TOTAL").bold(),
                style("UOM").bold(),
                style("STATUS").bold()
            );
            println!("{}", "-".repeat(88));
            for row in &rows {
                let indent = "  ".repeat((row.level - 1) as usize);
                println!(
                    "{:<6} {:<14} {:<28} {:>8} {:>10} {:<6} {:<8}",
                    row.level,
                    truncate_str(&row.item_code, 12),
                    truncate_str(&format!("{}{}", indent, row.item_name), 26),
                    row.qty,
                    row.total_qty,
                    row.uom_code,
                    row.line_status
                );
            }
            println!();
            println!("{} row(s)", rows.len());
        }
    }

    Ok(())
}

fn run_tree(args: TreeArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let (version, root) = store
        .resolve_root(&args.version)
        .map_err(|e| miette::miette!("{}", e))?;

    let lines = store.load_lines(&version.id);
    let graph = BomGraph::build(root, &lines);
    let resolver = store.load_metadata(graph.referenced().iter());

    let opts = TreeOptions {
        search: args.search,
        include_leaves: args.include_leaves,
    };
    let nodes = build_tree(&graph, &resolver, &lines, &opts);

    match global.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&nodes).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&nodes).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("item_id,parent_item_id,code,name,item_type,has_errors");
            for node in &nodes {
                println!(
                    "{},{},{},{},{},{}",
                    node.item_id,
                    node.parent_item_id
                        .as_ref()
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                    escape_csv(&node.code),
                    escape_csv(&node.name),
                    node.item_type,
                    node.has_errors
                );
            }
        }
        _ => {
            println!();
            println!(
                "{} tree for version {} (label {}), children before parents",
                style("Assembly").bold(),
                style(&version.id).yellow(),
                version.label
            );
            println!();
            println!(
                "{:<17} {:<17} {:<14} {:<28} {:<10} {:<6}",
                style("ITEM").bold(),
                style("PARENT").bold(),
                style("CODE").bold(),
                style("NAME").bold(),
                style("TYPE").bold(),
                style("ERRORS").bold()
            );
            println!("{}", "-".repeat(98));
            for node in &nodes {
                let errors = if node.has_errors {
                    style("yes").red().to_string()
                } else {
                    "no".to_string()
                };
                println!(
                    "{:<17} {:<17} {:<14} {:<28} {:<10} {:<6}",
                    format_short_id(&node.item_id),
                    node.parent_item_id
                        .as_ref()
                        .map(format_short_id)
                        .unwrap_or_else(|| "(root)".to_string()),
                    truncate_str(&node.code, 12),
                    truncate_str(&node.name, 26),
                    node.item_type,
                    errors
                );
            }
            println!();
            println!("{} node(s)", nodes.len());
        }
    }

    Ok(())
}
