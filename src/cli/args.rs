//! Top-level CLI definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, calc::CalcArgs, catalog::CatalogCommands, new::NewArgs, set::SetArgs,
    show::ShowArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "orat",
    about = "Occupational risk assessment maps: catalog, scoring, .rsk files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Debug)]
pub struct GlobalOpts {
    /// Alternative hazard catalog definition file
    #[arg(long, global = true, env = "ORAT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Read and write map files as plain JSON instead of gzip
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the hazard catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Create a new risk map file
    New(NewArgs),

    /// Add an assessment record to a map
    Add(AddArgs),

    /// Update map metadata or the correction factor
    Set(SetArgs),

    /// Run the aggregation and store the results
    Calc(CalcArgs),

    /// Print a map without recalculating
    Show(ShowArgs),
}
