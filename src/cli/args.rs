//! Top-level argument parsing - the `lbm` command tree

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;

use crate::cli::commands::bom::BomCommands;
use crate::cli::commands::item::ItemCommands;
use crate::cli::commands::line::LineCommands;
use crate::cli::commands::product::ProductCommands;
use crate::cli::commands::version::VersionCommands;

/// Lamina BOM Manager - plain-text BOM data with derived views
#[derive(Parser, Debug)]
#[command(name = "lbm", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "auto")]
    pub output: OutputFormat,

    /// Author recorded on created entities
    #[arg(long, global = true, env = "LBM_AUTHOR", default_value = "unknown")]
    pub author: String,
}

/// Output format for list/view commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Auto,
    Table,
    Json,
    Yaml,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Auto => write!(f, "auto"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new project in the current directory
    Init,

    /// Manage master-data items
    #[command(subcommand)]
    Item(ItemCommands),

    /// Manage products
    #[command(subcommand)]
    Product(ProductCommands),

    /// Manage BOM versions
    #[command(subcommand)]
    Version(VersionCommands),

    /// Manage BOM lines
    #[command(subcommand)]
    Line(LineCommands),

    /// Derived BOM views: explosion and assembly tree
    #[command(subcommand)]
    Bom(BomCommands),
}
