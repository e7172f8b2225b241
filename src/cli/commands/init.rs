//! `lbm init` command - project initialization

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::project::{Project, ENTITY_DIRS};

pub fn run(_global: &GlobalOpts) -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = Project::init(&cwd).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized lbm project at {}",
        style("✓").green().bold(),
        style(project.root().display()).cyan()
    );
    for dir in ENTITY_DIRS {
        println!("  created {}/", dir);
    }
    Ok(())
}
