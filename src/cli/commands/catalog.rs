//! `orat catalog` command - browse the hazard catalog

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::load_catalog;
use crate::cli::GlobalOpts;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List hazard categories
    List,

    /// List hazardous events for a hazard
    Events(EventsArgs),

    /// Show mitigation measures for a (hazard, event) pair
    Measures(MeasuresArgs),
}

#[derive(clap::Args, Debug)]
pub struct EventsArgs {
    /// Catalog key, e.g. "1. Mechanical hazards"
    pub hazard: String,
}

#[derive(clap::Args, Debug)]
pub struct MeasuresArgs {
    /// Catalog key, e.g. "1. Mechanical hazards"
    pub hazard: String,

    /// Event name within the hazard
    pub event: String,
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    let catalog = load_catalog(global);
    match cmd {
        CatalogCommands::List => {
            for key in catalog.hazards() {
                let events = catalog.events_for(key).len();
                println!("{}  ({} events)", style(key).bold(), events);
            }
            Ok(())
        }
        CatalogCommands::Events(args) => {
            if catalog.hazard_info(&args.hazard).is_none() {
                return Err(miette::miette!(
                    "No hazard '{}' in the catalog; run 'orat catalog list'",
                    args.hazard
                ));
            }
            for event in catalog.events_for(&args.hazard) {
                println!("{}", event);
            }
            Ok(())
        }
        CatalogCommands::Measures(args) => {
            let measures = catalog.measures_for(&args.hazard, &args.event);
            if measures.is_empty() {
                return Err(miette::miette!(
                    "No measures for event '{}' under '{}'",
                    args.event,
                    args.hazard
                ));
            }
            for measure in measures {
                println!("- {}", measure);
            }
            Ok(())
        }
    }
}
