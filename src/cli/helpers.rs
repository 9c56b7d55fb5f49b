//! Shared helpers for command implementations

use miette::Result;
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::core::{Catalog, RiskMap};

/// Catalog per the global options: explicit file, or the embedded default
pub fn load_catalog(global: &GlobalOpts) -> Catalog {
    Catalog::load_or_default(global.catalog.as_deref())
}

/// Load an existing map or fail with a user-facing diagnostic
pub fn load_map(path: &Path, global: &GlobalOpts) -> Result<RiskMap> {
    RiskMap::load(path, !global.plain).ok_or_else(|| {
        miette::miette!(
            "Could not open '{}': expected an existing .rsk map file{}",
            path.display(),
            if global.plain {
                " (plain JSON)"
            } else {
                " (gzip; pass --plain for uncompressed maps)"
            }
        )
    })
}

/// Save to the map's known path, reporting failures as diagnostics
pub fn save_map(map: &mut RiskMap, global: &GlobalOpts) -> Result<()> {
    let saved = map
        .save(None, !global.plain, None)
        .map_err(|e| miette::miette!("The map file is unavailable for writing: {}", e))?;
    if !saved {
        return Err(miette::miette!("The map has no save path"));
    }
    Ok(())
}

/// Truncate a string for table display
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
