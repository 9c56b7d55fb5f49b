//! Risk map - a named, persistable assessment for one profession
//!
//! Wraps an assessment [`Table`] with the descriptive metadata that goes
//! into the printed card (profession, division, chairman, tools, the
//! fixed regulatory citations) and the persistence state: save path and
//! compression preference. Maps save to and load from `.rsk` files; a
//! deep copy is a plain `clone()` since every field is owned.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::core::catalog::Catalog;
use crate::core::record::Record;
use crate::core::table::{Outcome, Table};
use crate::rsk::{self, MapDoc, RecordDoc, RskError};

/// Citations printed on every map
pub const REGULATORY_DOCS: &[&str] = &[
    "GOST 12.0.003-2015. Occupational safety standards system. Dangerous and harmful working factors. Classification",
    "GOST R 12.0.007-2009. Occupational safety standards system. Occupational safety and health management system in organization. General requirements on development, implementation, evaluation and improvement",
    "GOST R 12.0.010-2009. Occupational safety standards system. Occupational safety and health management systems. Hazard identification and risks assessment",
    "Ministry of Labour order No. 36 of 31.01.2022 on recommendations for the classification, detection, recognition and description of hazards",
    "Ministry of Labour order No. 926 of 28.12.2021 on recommendations for the selection of methods for assessing occupational risk levels and for reducing such levels",
    "Ministry of Labour order No. 776n of 29.10.2021 on the approval of the model regulation on the occupational safety management system",
];

static NEW_MAP_COUNTER: AtomicU32 = AtomicU32::new(1);

/// A complete occupational risk assessment map
#[derive(Debug, Clone)]
pub struct RiskMap {
    table: Table,
    map_no: Option<String>,
    chairman: Option<String>,
    profession: Option<String>,
    struct_division: Option<String>,
    description: Option<String>,
    tools_materials: Option<String>,
    regulatory_docs: Vec<String>,
    name: String,
    save_path: Option<PathBuf>,
    compressed: bool,
}

impl Default for RiskMap {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskMap {
    /// Fresh map with an empty table and an auto-numbered display name
    pub fn new() -> Self {
        let counter = NEW_MAP_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            table: Table::new(),
            map_no: None,
            chairman: None,
            profession: None,
            struct_division: None,
            description: None,
            tools_materials: None,
            regulatory_docs: REGULATORY_DOCS.iter().map(|s| s.to_string()).collect(),
            name: format!("New map {}", counter),
            save_path: None,
            compressed: true,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// Delegates to [`Table::calculate`]
    pub fn calculate(&mut self, catalog: &Catalog, update_methods: bool) -> Outcome {
        self.table.calculate(catalog, update_methods)
    }

    pub fn map_no(&self) -> Option<&str> {
        self.map_no.as_deref()
    }

    /// Map number must be all digits; anything else clears it
    pub fn set_map_no(&mut self, map_no: &str) {
        if map_no.is_empty() {
            return;
        }
        if map_no.chars().all(|c| c.is_ascii_digit()) {
            self.map_no = Some(map_no.to_string());
        } else {
            self.map_no = None;
        }
        self.table.mark_modified();
    }

    pub fn chairman(&self) -> Option<&str> {
        self.chairman.as_deref()
    }

    pub fn set_chairman(&mut self, chairman: &str) {
        self.chairman = Some(chairman.to_string());
        self.table.mark_modified();
    }

    pub fn profession(&self) -> Option<&str> {
        self.profession.as_deref()
    }

    pub fn set_profession(&mut self, profession: &str) {
        self.profession = Some(profession.to_string());
        self.table.mark_modified();
    }

    pub fn struct_division(&self) -> Option<&str> {
        self.struct_division.as_deref()
    }

    pub fn set_struct_division(&mut self, division: &str) {
        self.struct_division = Some(division.to_string());
        self.table.mark_modified();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = Some(description.to_string());
        self.table.mark_modified();
    }

    pub fn tools_materials(&self) -> Option<&str> {
        self.tools_materials.as_deref()
    }

    pub fn set_tools_materials(&mut self, tools: &str) {
        self.tools_materials = Some(tools.to_string());
        self.table.mark_modified();
    }

    pub fn regulatory_docs(&self) -> &[String] {
        &self.regulatory_docs
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name setter does not raise the modified flag
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn is_modified(&self) -> bool {
        self.table.is_modified()
    }

    /// Display name for a tab or listing, with a `*` while unsaved
    pub fn tab_name(&self) -> String {
        format!(
            "{}{}.{}",
            self.name,
            if self.table.is_modified() { "*" } else { "" },
            rsk::MAP_EXTENSION
        )
    }

    /// Serialize the full map state.
    ///
    /// A given `path` (with `.rsk` appended when missing) becomes the new
    /// save path; `Ok(false)` means no path was resolvable. A write
    /// failure, including a destination held by another process, surfaces
    /// as an [`RskError`] the caller can report and retry. The modified
    /// flag clears only on success.
    pub fn save(
        &mut self,
        path: Option<&Path>,
        compressed: bool,
        name: Option<&str>,
    ) -> Result<bool, RskError> {
        if let Some(p) = path {
            self.save_path = Some(rsk::ensure_extension(p));
        }
        let Some(save_path) = self.save_path.clone() else {
            return Ok(false);
        };
        let doc_name = match name {
            Some(n) => n.to_string(),
            None if !self.name.is_empty() => self.name.clone(),
            None => save_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let doc = self.to_doc(&doc_name);
        rsk::write(&save_path, &doc, compressed)?;
        self.compressed = compressed;
        self.table.clear_modified();
        Ok(true)
    }

    /// Deserialize a map from disk.
    ///
    /// Returns `None` unless the path carries the `.rsk` extension and is
    /// an existing regular file, or when the document fails to parse.
    /// Previously computed derived fields are trusted as-is; the load
    /// path becomes the save path and the modified flag starts cleared.
    pub fn load(path: &Path, compressed: bool) -> Option<RiskMap> {
        if !rsk::has_extension(path) || !path.is_file() {
            return None;
        }
        let doc = rsk::read(path, compressed).ok()?;
        let mut map = RiskMap::from_doc(doc);
        if map.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                map.name = stem.to_string_lossy().into_owned();
            }
        }
        map.save_path = Some(path.to_path_buf());
        map.compressed = compressed;
        map.table.clear_modified();
        Some(map)
    }

    /// Save to the known path when there are unsaved changes. Failures
    /// are swallowed so a periodic tick can retry later.
    pub fn autosave(&mut self) -> bool {
        if self.table.is_modified() && self.save_path.is_some() {
            let compressed = self.compressed;
            self.save(None, compressed, None).unwrap_or(false)
        } else {
            false
        }
    }

    fn to_doc(&self, name: &str) -> MapDoc {
        MapDoc {
            map_no: self.map_no.clone(),
            chairman: self.chairman.clone(),
            profession: self.profession.clone(),
            struct_division: self.struct_division.clone(),
            description: self.description.clone(),
            tools_materials: self.tools_materials.clone(),
            regulatory_docs: self.regulatory_docs.clone(),
            k_factor: self.table.k_factor(),
            prof_risk: self.table.prof_risk(),
            result: self.table.result(),
            result_str: self.table.result_band(),
            name: Some(name.to_string()),
            table: self
                .table
                .records()
                .iter()
                .map(|record| RecordDoc {
                    n: record.n().map(str::to_string),
                    danger: record.danger().map(str::to_string),
                    event: record.event().map(str::to_string),
                    damage: record.damage(),
                    damage_pts: record.damage().map(|d| d.points()),
                    susceptibility: record.susceptibility(),
                    susceptibility_pts: record.susceptibility().map(|s| s.points()),
                    probability: record.probability(),
                    probability_pts: record.probability().map(|p| p.points()),
                    weight: record.weight(),
                    identified_dangers_risks: record.identified_risk(),
                    rating: record.rating(),
                })
                .collect(),
            methods: self.table.methods().to_vec(),
        }
    }

    fn from_doc(doc: MapDoc) -> RiskMap {
        let records = doc
            .table
            .into_iter()
            .map(|r| {
                Record::from_parts(
                    r.n,
                    r.danger,
                    r.event,
                    r.damage,
                    r.susceptibility,
                    r.probability,
                    r.weight,
                    r.identified_dangers_risks,
                    r.rating,
                )
            })
            .collect();
        let table = Table::restore(
            records,
            doc.methods,
            if doc.k_factor == -1.0 || doc.k_factor == 0.0 || doc.k_factor == 1.0 {
                doc.k_factor
            } else {
                0.0
            },
            doc.prof_risk,
            doc.result,
            doc.result_str,
        );
        let mut map = RiskMap::new();
        map.table = table;
        map.map_no = doc.map_no.filter(|n| n.chars().all(|c| c.is_ascii_digit()));
        map.chairman = doc.chairman;
        map.profession = doc.profession;
        map.struct_division = doc.struct_division;
        map.description = doc.description;
        map.tools_materials = doc.tools_materials;
        if !doc.regulatory_docs.is_empty() {
            map.regulatory_docs = doc.regulatory_docs;
        }
        if let Some(name) = doc.name {
            map.name = name;
        } else {
            map.name = String::new();
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scales::{Damage, Probability, ResultBand, Susceptibility};

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "1. Danger": {
                    "No": "1",
                    "desc": "Danger",
                    "events": { "Event": ["Install guard", "Wear gloves"] }
                }
            }"#,
        )
        .unwrap()
    }

    fn calculated_map(catalog: &Catalog) -> RiskMap {
        let mut map = RiskMap::new();
        map.set_profession("Welder");
        map.set_chairman("J. Smith");
        map.set_struct_division("Assembly shop");
        map.set_map_no("12");
        let idx = map.table_mut().add_record();
        map.table_mut().set_record_danger(idx, catalog, "1. Danger");
        map.table_mut().set_record_event(idx, catalog, "Event");
        map.table_mut().set_record_damage(idx, Damage::Minor);
        map.table_mut()
            .set_record_susceptibility(idx, Susceptibility::Rare);
        map.table_mut()
            .set_record_probability(idx, Probability::Sometimes);
        assert!(matches!(map.calculate(catalog, true), Outcome::Ok(_)));
        map
    }

    #[test]
    fn test_new_maps_get_distinct_names() {
        let a = RiskMap::new();
        let b = RiskMap::new();
        assert!(a.name().starts_with("New map "));
        assert_ne!(a.name(), b.name());
    }

    #[test]
    fn test_map_no_must_be_digits() {
        let mut map = RiskMap::new();
        map.set_map_no("42");
        assert_eq!(map.map_no(), Some("42"));
        map.set_map_no("4a");
        assert_eq!(map.map_no(), None);
        map.set_map_no("");
        assert_eq!(map.map_no(), None);
    }

    #[test]
    fn test_save_without_path_returns_false() {
        let mut map = RiskMap::new();
        assert!(!map.save(None, true, None).unwrap());
    }

    #[test]
    fn test_save_appends_extension_and_clears_modified() {
        let catalog = catalog();
        let dir = tempfile::tempdir().unwrap();
        let mut map = calculated_map(&catalog);
        assert!(map.is_modified());
        assert!(map
            .save(Some(dir.path().join("shop").as_path()), true, None)
            .unwrap());
        assert!(!map.is_modified());
        assert_eq!(
            map.save_path(),
            Some(dir.path().join("shop.rsk").as_path())
        );
        assert!(dir.path().join("shop.rsk").is_file());
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let catalog = catalog();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.rsk");
        let mut map = calculated_map(&catalog);
        map.save(Some(path.as_path()), true, None).unwrap();

        let loaded = RiskMap::load(&path, true).unwrap();
        assert_eq!(loaded.name(), map.name());
        assert_eq!(loaded.map_no(), Some("12"));
        assert_eq!(loaded.chairman(), Some("J. Smith"));
        assert_eq!(loaded.profession(), Some("Welder"));
        assert_eq!(loaded.struct_division(), Some("Assembly shop"));
        assert_eq!(loaded.regulatory_docs(), map.regulatory_docs());
        assert_eq!(loaded.table().k_factor(), 0.0);
        assert_eq!(loaded.table().prof_risk(), Some(2.0));
        assert_eq!(loaded.table().result(), Some(2.0));
        assert_eq!(loaded.table().result_band(), Some(ResultBand::Low));
        assert_eq!(loaded.table().methods(), map.table().methods());
        assert_eq!(loaded.table().records(), map.table().records());
        assert_eq!(loaded.save_path(), Some(path.as_path()));
        assert!(!loaded.is_modified());
    }

    #[test]
    fn test_plain_save_round_trip() {
        let catalog = catalog();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.rsk");
        let mut map = calculated_map(&catalog);
        map.save(Some(path.as_path()), false, None).unwrap();
        // readable as plain JSON
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"profession\": \"Welder\""));
        let loaded = RiskMap::load(&path, false).unwrap();
        assert_eq!(loaded.profession(), Some("Welder"));
    }

    #[test]
    fn test_load_rejects_wrong_extension_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let wrong = dir.path().join("map.json");
        std::fs::write(&wrong, "{}").unwrap();
        assert!(RiskMap::load(&wrong, true).is_none());
        assert!(RiskMap::load(&dir.path().join("missing.rsk"), true).is_none());
    }

    #[test]
    fn test_load_rejects_garbage_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.rsk");
        std::fs::write(&path, "not a map").unwrap();
        assert!(RiskMap::load(&path, true).is_none());
        assert!(RiskMap::load(&path, false).is_none());
    }

    #[test]
    fn test_autosave_only_when_modified_with_path() {
        let catalog = catalog();
        let dir = tempfile::tempdir().unwrap();
        let mut map = calculated_map(&catalog);
        // no path yet
        assert!(!map.autosave());
        map.save(Some(dir.path().join("shop").as_path()), true, None)
            .unwrap();
        // just saved, nothing to do
        assert!(!map.autosave());
        map.set_chairman("New chairman");
        assert!(map.autosave());
        assert!(!map.is_modified());
    }

    #[test]
    fn test_clone_is_a_deep_copy() {
        let catalog = catalog();
        let mut map = calculated_map(&catalog);
        let copy = map.clone();
        map.set_profession("Electrician");
        map.table_mut().add_record();
        assert_eq!(copy.profession(), Some("Welder"));
        assert_eq!(copy.table().records().len(), 1);
    }
}
