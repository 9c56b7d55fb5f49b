//! `orat new` command - create a risk map file

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::RiskMap;
use crate::rsk;

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Path of the map file to create (.rsk appended when missing)
    pub path: PathBuf,

    /// Display name of the map
    #[arg(long)]
    pub name: Option<String>,

    /// Map number (digits only)
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
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let target = rsk::ensure_extension(&args.path);
    if target.exists() {
        return Err(miette::miette!(
            "'{}' already exists; refusing to overwrite",
            target.display()
        ));
    }

    let mut map = RiskMap::new();
    if let Some(name) = &args.name {
        map.set_name(name);
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

    map.save(Some(target.as_path()), !global.plain, None)
        .map_err(|e| miette::miette!("Could not write '{}': {}", target.display(), e))?;

    println!(
        "{} map '{}' at {}",
        style("Created").green().bold(),
        map.name(),
        target.display()
    );
    Ok(())
}
