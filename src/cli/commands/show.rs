//! `orat show` command - print a map without mutating it
//!
//! Derived fields are shown exactly as stored; they may be stale if the
//! map was edited after its last calculation.

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_map;
use crate::cli::output::{print_map_header, print_records, print_summary};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Map file to print
    pub path: PathBuf,

    /// Also list the regulatory documents cited on the map
    #[arg(long)]
    pub docs: bool,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let map = load_map(&args.path, global)?;
    print_map_header(&map);
    println!();
    print_records(map.table().records());
    print_summary(map.table());
    if args.docs {
        println!();
        for doc in map.regulatory_docs() {
            println!("- {}", doc);
        }
    }
    Ok(())
}
