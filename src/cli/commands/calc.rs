//! `orat calc` command - run the aggregation and persist the results

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_catalog, load_map, save_map};
use crate::cli::output::{print_map_header, print_records, print_summary};
use crate::cli::GlobalOpts;
use crate::core::Outcome;

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Map file to calculate
    pub path: PathBuf,

    /// Leave the stored methods list untouched
    #[arg(long)]
    pub skip_methods: bool,
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = load_catalog(global);
    let mut map = load_map(&args.path, global)?;

    match map.calculate(&catalog, !args.skip_methods) {
        Outcome::NoData => {
            println!(
                "{} the map has no assessment records to calculate",
                style("Nothing to do:").yellow().bold()
            );
            Ok(())
        }
        Outcome::Incomplete => {
            println!(
                "{} every record must be fully filled in before calculating",
                style("Incomplete:").yellow().bold()
            );
            Ok(())
        }
        Outcome::Ok(summary) => {
            save_map(&mut map, global)?;
            print_map_header(&map);
            println!();
            print_records(map.table().records());
            print_summary(map.table());
            println!();
            println!(
                "{} professional risk {:.2}, result {:.2} ({})",
                style("Calculated:").green().bold(),
                summary.prof_risk,
                summary.result,
                summary.band
            );
            Ok(())
        }
    }
}
