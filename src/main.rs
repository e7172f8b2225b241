use clap::Parser;
use lbm::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => lbm::cli::commands::init::run(&cli.global),
        Commands::Item(cmd) => lbm::cli::commands::item::run(cmd, &cli.global),
        Commands::Product(cmd) => lbm::cli::commands::product::run(cmd, &cli.global),
        Commands::Version(cmd) => lbm::cli::commands::version::run(cmd, &cli.global),
        Commands::Line(cmd) => lbm::cli::commands::line::run(cmd, &cli.global),
        Commands::Bom(cmd) => lbm::cli::commands::bom::run(cmd, &cli.global),
    }
}
