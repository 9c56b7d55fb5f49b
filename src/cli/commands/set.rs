//! `orat set` command - update map metadata and the correction factor

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_map, save_map};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Map file to update
    pub path: PathBuf,

    /// Display name of the map
    #[arg(long)]
    pub name: Option<String>,

    /// Map number (digits only; anything else clears it)
    #[arg(long)]
    pub map_no: Option<String>,

    /// Assessed profession
    #[arg(long)]
    pub profession: Option<String>,

    /// Structural division
    #[arg(long)]
    pub division: Option<String>,

    /// Commission chairman
    #[arg(long)]
    pub chairman: Option<String>,

    /// Description of the work performed
    #[arg(long)]
    pub description: Option<String>,

    /// Tools and materials in use
    #[arg(long)]
    pub tools: Option<String>,

    /// Correction factor, one of -1, 0, 1
    #[arg(long, allow_hyphen_values = true)]
    pub k: Option<f64>,

    /// Delete the record at this 1-based position
    #[arg(long)]
    pub remove_record: Option<usize>,

    /// Delete the method at this 1-based position
    #[arg(long)]
    pub remove_method: Option<usize>,
}

pub fn run(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let mut map = load_map(&args.path, global)?;

    if let Some(name) = &args.name {
        map.set_name(name);
        map.table_mut().mark_modified();
    }
    if let Some(map_no) = &args.map_no {
        map.set_map_no(map_no);
    }
    if let Some(profession) = &args.profession {
        map.set_profession(profession);
    }
    if let Some(division) = &args.division {
        map.set_struct_division(division);
    }
    if let Some(chairman) = &args.chairman {
        map.set_chairman(chairman);
    }
    if let Some(description) = &args.description {
        map.set_description(description);
    }
    if let Some(tools) = &args.tools {
        map.set_tools_materials(tools);
    }
    if let Some(k) = args.k {
        if !map.table_mut().set_k_factor(k) {
            return Err(miette::miette!(
                "The correction factor must be -1, 0 or 1 (got {})",
                k
            ));
        }
    }
    if let Some(pos) = args.remove_record {
        let count = map.table().records().len();
        if pos == 0 || pos > count {
            return Err(miette::miette!(
                "No record {} (the map has {} records)",
                pos,
                count
            ));
        }
        map.table_mut().remove_record(pos - 1);
    }
    if let Some(pos) = args.remove_method {
        let count = map.table().methods().len();
        if pos == 0 || pos > count {
            return Err(miette::miette!(
                "No method {} (the map has {} methods)",
                pos,
                count
            ));
        }
        map.table_mut().remove_method(pos - 1);
    }

    save_map(&mut map, global)?;
    println!("{} '{}'", style("Updated").green().bold(), map.name());
    Ok(())
}
