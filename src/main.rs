use clap::Parser;
use miette::Result;
use orat::cli::{Cli, Commands};

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
        Commands::Catalog(cmd) => orat::cli::commands::catalog::run(cmd, &cli.global),
        Commands::New(args) => orat::cli::commands::new::run(args, &cli.global),
        Commands::Add(args) => orat::cli::commands::add::run(args, &cli.global),
        Commands::Set(args) => orat::cli::commands::set::run(args, &cli.global),
        Commands::Calc(args) => orat::cli::commands::calc::run(args, &cli.global),
        Commands::Show(args) => orat::cli::commands::show::run(args, &cli.global),
    }
}
