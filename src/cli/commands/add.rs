//! `orat add` command - append an assessment record to a map
//!
//! Every field can come from a flag; anything missing is asked for
//! interactively with a picker over the catalog or scale values.

use console::style;
use dialoguer::Select;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{load_catalog, load_map, save_map};
use crate::cli::GlobalOpts;
use crate::core::{Catalog, Damage, Probability, Susceptibility};

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Map file to extend
    pub path: PathBuf,

    /// Catalog key, e.g. "1. Mechanical hazards"
    #[arg(long)]
    pub hazard: Option<String>,

    /// Hazardous event within the chosen hazard
    #[arg(long)]
    pub event: Option<String>,

    /// Damage level (e.g. "Minor damage")
    #[arg(long)]
    pub damage: Option<String>,

    /// Susceptibility level (e.g. "Rare")
    #[arg(long)]
    pub susceptibility: Option<String>,

    /// Probability level (e.g. "Sometimes")
    #[arg(long)]
    pub probability: Option<String>,
}

fn pick(prompt: &str, items: &[&str]) -> Result<String> {
    let selection = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok(items[selection].to_string())
}

fn resolve_hazard(args: &AddArgs, catalog: &Catalog) -> Result<String> {
    match &args.hazard {
        Some(key) => Ok(key.clone()),
        None => pick("Hazard", &catalog.hazards()),
    }
}

fn resolve_event(args: &AddArgs, catalog: &Catalog, hazard: &str) -> Result<String> {
    match &args.event {
        Some(event) => Ok(event.clone()),
        None => pick("Hazardous event", &catalog.events_for(hazard)),
    }
}

fn resolve_scale<T>(flag: &Option<String>, prompt: &str, all: &[T]) -> Result<T>
where
    T: Copy + std::fmt::Display + std::str::FromStr<Err = String>,
{
    match flag {
        Some(value) => value.parse::<T>().map_err(|e| miette::miette!("{}", e)),
        None => {
            let labels: Vec<String> = all.iter().map(|v| v.to_string()).collect();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let chosen = pick(prompt, &refs)?;
            chosen.parse::<T>().map_err(|e| miette::miette!("{}", e))
        }
    }
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = load_catalog(global);
    let mut map = load_map(&args.path, global)?;

    let hazard = resolve_hazard(&args, &catalog)?;
    let index = map.table_mut().add_record();
    if !map.table_mut().set_record_danger(index, &catalog, &hazard) {
        return Err(miette::miette!(
            "No hazard '{}' in the catalog; run 'orat catalog list'",
            hazard
        ));
    }

    let event = resolve_event(&args, &catalog, &hazard)?;
    if !map.table_mut().set_record_event(index, &catalog, &event) {
        return Err(miette::miette!(
            "'{}' is not an event of '{}'; run 'orat catalog events'",
            event,
            hazard
        ));
    }

    let damage = resolve_scale::<Damage>(&args.damage, "Damage", Damage::all())?;
    let susceptibility = resolve_scale::<Susceptibility>(
        &args.susceptibility,
        "Susceptibility",
        Susceptibility::all(),
    )?;
    let probability =
        resolve_scale::<Probability>(&args.probability, "Probability", Probability::all())?;
    map.table_mut().set_record_damage(index, damage);
    map.table_mut().set_record_susceptibility(index, susceptibility);
    map.table_mut().set_record_probability(index, probability);

    save_map(&mut map, global)?;
    println!(
        "{} record {} to '{}': {} / {}",
        style("Added").green().bold(),
        index + 1,
        map.name(),
        hazard,
        event
    );
    Ok(())
}
