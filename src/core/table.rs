//! Assessment table - the weighted aggregation engine
//!
//! A table owns an ordered list of [`Record`]s, the user-supplied
//! correction factor and everything derived from a calculation pass:
//! per-record weights, identified risk scores and ratings, the aggregate
//! professional risk, the corrected final result with its classification,
//! and the deduplicated list of mitigation measures ("methods") for
//! records rated Moderate or High.
//!
//! Derived fields are only valid immediately after a successful
//! [`Table::calculate`]; any later mutation leaves them stale until the
//! next pass.

use std::collections::HashSet;

use crate::core::catalog::Catalog;
use crate::core::record::{round2, Record};
use crate::core::scales::{Damage, Probability, Rating, ResultBand, Susceptibility};

/// Result of a calculation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The table holds no records after empty rows were purged
    NoData,
    /// At least one remaining record is missing a required field;
    /// nothing beyond the empty-row purge was mutated
    Incomplete,
    /// Aggregation succeeded
    Ok(Summary),
}

/// Table-level figures produced by a successful pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Sum of all identified risk scores
    pub prof_risk: f64,
    /// Correction factor plus aggregate risk
    pub result: f64,
    /// Classification of the final result
    pub band: ResultBand,
}

/// Ordered collection of assessment records with its aggregation state
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<Record>,
    methods: Vec<String>,
    weight_sum: Option<u32>,
    k_factor: f64,
    prof_risk: Option<f64>,
    result: Option<f64>,
    result_band: Option<ResultBand>,
    modified: bool,
    methods_changed: bool,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn weight_sum(&self) -> Option<u32> {
        self.weight_sum
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    pub fn prof_risk(&self) -> Option<f64> {
        self.prof_risk
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }

    pub fn result_band(&self) -> Option<ResultBand> {
        self.result_band
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// True when the methods list changed in the last aggregation pass;
    /// consumers caching a rendered view reset it with
    /// [`Table::clear_methods_changed`]
    pub fn methods_changed(&self) -> bool {
        self.methods_changed
    }

    pub fn clear_methods_changed(&mut self) {
        self.methods_changed = false;
    }

    pub(crate) fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub(crate) fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Append an empty record row
    pub fn add_record(&mut self) -> usize {
        self.records.push(Record::new());
        self.modified = true;
        self.records.len() - 1
    }

    pub fn remove_record(&mut self, index: usize) {
        if index < self.records.len() {
            self.records.remove(index);
            self.modified = true;
        }
    }

    pub fn remove_method(&mut self, index: usize) {
        if index < self.methods.len() {
            self.methods.remove(index);
            self.modified = true;
        }
    }

    /// Correction factor k; anything outside {-1, 0, +1} is ignored
    pub fn set_k_factor(&mut self, k: f64) -> bool {
        if k == -1.0 || k == 0.0 || k == 1.0 {
            self.k_factor = k;
            self.modified = true;
            true
        } else {
            false
        }
    }

    // Record mutators are wrapped so the table can raise its own dirty
    // flag on every assignment that took effect.

    pub fn set_record_danger(&mut self, index: usize, catalog: &Catalog, key: &str) -> bool {
        self.with_record(index, |r| r.set_danger(catalog, key))
    }

    pub fn set_record_event(&mut self, index: usize, catalog: &Catalog, event: &str) -> bool {
        self.with_record(index, |r| r.set_event(catalog, event))
    }

    pub fn set_record_damage(&mut self, index: usize, damage: Damage) -> bool {
        self.with_record(index, |r| r.set_damage(damage))
    }

    pub fn set_record_susceptibility(
        &mut self,
        index: usize,
        susceptibility: Susceptibility,
    ) -> bool {
        self.with_record(index, |r| r.set_susceptibility(susceptibility))
    }

    pub fn set_record_probability(&mut self, index: usize, probability: Probability) -> bool {
        self.with_record(index, |r| r.set_probability(probability))
    }

    fn with_record(&mut self, index: usize, f: impl FnOnce(&mut Record) -> bool) -> bool {
        let Some(record) = self.records.get_mut(index) else {
            return false;
        };
        let applied = f(record);
        if applied {
            self.modified = true;
        }
        applied
    }

    /// Run the aggregation pass.
    ///
    /// Empty rows are purged first; a table left with no rows yields
    /// [`Outcome::NoData`] and one with a partially filled row yields
    /// [`Outcome::Incomplete`]. Otherwise duplicates collapse (first
    /// occurrence wins), rows sort by (ordinal, description), every
    /// derived field is recomputed and, unless `update_methods` is false,
    /// the methods list is rebuilt from the catalog.
    pub fn calculate(&mut self, catalog: &Catalog, update_methods: bool) -> Outcome {
        self.remove_empty_records();
        self.modified = true;
        if self.records.is_empty() {
            return Outcome::NoData;
        }
        if self.records.iter().any(Record::is_not_filled) {
            return Outcome::Incomplete;
        }

        self.remove_duplicates();
        self.records.sort_by_key(|r| {
            let n = r
                .n()
                .and_then(|n| n.parse::<u32>().ok())
                .unwrap_or(u32::MAX);
            (n, r.danger().unwrap_or_default().to_string())
        });

        let weight_sum: u32 = self
            .records
            .iter()
            .map(|r| u32::from(r.probability().map(|p| p.points()).unwrap_or(0)))
            .sum();
        // Unreachable with the fixed 1-5 scales once Incomplete rows are
        // excluded; asserted instead of silently falling back.
        assert!(weight_sum > 0, "probability points summed to zero");
        self.weight_sum = Some(weight_sum);
        let ws = f64::from(weight_sum);

        for record in &mut self.records {
            let d = f64::from(record.damage().map(|d| d.points()).unwrap_or(0));
            let s = f64::from(record.susceptibility().map(|s| s.points()).unwrap_or(0));
            let p = f64::from(record.probability().map(|p| p.points()).unwrap_or(0));
            record.set_weight(p / ws);
            let risk = round2(d * s * p / ws);
            record.set_identified_risk(risk);
            record.set_rating(Rating::for_risk(risk));
        }

        let prof_risk = round2(
            self.records
                .iter()
                .filter_map(Record::identified_risk)
                .sum(),
        );
        self.prof_risk = Some(prof_risk);
        let result = round2(self.k_factor + prof_risk);
        self.result = Some(result);
        let band = ResultBand::for_result(result);
        self.result_band = Some(band);

        if update_methods {
            self.fill_methods(catalog);
        }
        Outcome::Ok(Summary {
            prof_risk,
            result,
            band,
        })
    }

    /// Rebuild the methods list: catalog measures for every record rated
    /// Moderate or High, deduplicated and sorted
    pub fn fill_methods(&mut self, catalog: &Catalog) {
        let mut collected: Vec<String> = Vec::new();
        for record in &self.records {
            if !matches!(record.rating(), Some(Rating::Moderate) | Some(Rating::High)) {
                continue;
            }
            let (Some(key), Some(event)) = (record.catalog_key(), record.event()) else {
                continue;
            };
            collected.extend(catalog.measures_for(&key, event).iter().cloned());
        }
        collected.sort();
        collected.dedup();
        if collected != self.methods {
            self.methods_changed = true;
        }
        self.methods = collected;
    }

    /// Collapse records sharing the same (ordinal, description, event);
    /// the first occurrence wins and traversal order is preserved
    fn remove_duplicates(&mut self) {
        let mut seen: HashSet<(String, String, String)> = HashSet::new();
        self.records.retain(|record| {
            let key = (
                record.n().unwrap_or_default().to_string(),
                record.danger().unwrap_or_default().to_string(),
                record.event().unwrap_or_default().to_string(),
            );
            seen.insert(key)
        });
    }

    fn remove_empty_records(&mut self) {
        self.records.retain(|record| !record.is_empty());
    }

    /// Restore persisted state, trusting derived fields verbatim
    pub(crate) fn restore(
        records: Vec<Record>,
        methods: Vec<String>,
        k_factor: f64,
        prof_risk: Option<f64>,
        result: Option<f64>,
        result_band: Option<ResultBand>,
    ) -> Self {
        Self {
            records,
            methods,
            weight_sum: None,
            k_factor,
            prof_risk,
            result,
            result_band,
            modified: false,
            methods_changed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "1. Danger": {
                    "No": "1",
                    "desc": "Danger",
                    "events": {
                        "Event": ["Install guard", "Wear gloves"],
                        "Second event": ["Brief the crew"]
                    }
                },
                "2. Noise": {
                    "No": "2",
                    "desc": "Noise",
                    "events": {
                        "Prolonged exposure": ["Issue ear protection"]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn fill_record(
        table: &mut Table,
        catalog: &Catalog,
        key: &str,
        event: &str,
        damage: Damage,
        susceptibility: Susceptibility,
        probability: Probability,
    ) -> usize {
        let idx = table.add_record();
        assert!(table.set_record_danger(idx, catalog, key));
        assert!(table.set_record_event(idx, catalog, event));
        assert!(table.set_record_damage(idx, damage));
        assert!(table.set_record_susceptibility(idx, susceptibility));
        assert!(table.set_record_probability(idx, probability));
        idx
    }

    #[test]
    fn test_calculate_no_data() {
        let catalog = catalog();
        let mut table = Table::new();
        table.add_record(); // stays empty, gets purged
        assert_eq!(table.calculate(&catalog, true), Outcome::NoData);
        assert!(table.records().is_empty());
        assert!(table.prof_risk().is_none());
    }

    #[test]
    fn test_calculate_incomplete_leaves_derived_fields_alone() {
        let catalog = catalog();
        let mut table = Table::new();
        let idx = table.add_record();
        table.set_record_danger(idx, &catalog, "1. Danger");
        table.set_record_event(idx, &catalog, "Event");
        table.set_record_damage(idx, Damage::Minor);
        // probability and susceptibility missing
        assert_eq!(table.calculate(&catalog, true), Outcome::Incomplete);
        assert!(table.prof_risk().is_none());
        assert!(table.result().is_none());
        assert!(table.records()[0].weight().is_none());
    }

    #[test]
    fn test_single_record_scenario() {
        let catalog = catalog();
        let mut table = Table::new();
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::Minor,
            Susceptibility::Rare,
            Probability::Sometimes,
        );
        let outcome = table.calculate(&catalog, true);
        let Outcome::Ok(summary) = outcome else {
            panic!("expected Ok, got {:?}", outcome);
        };
        assert_eq!(table.weight_sum(), Some(3));
        let record = &table.records()[0];
        assert_eq!(record.weight(), Some(1.0));
        assert_eq!(record.identified_risk(), Some(2.0));
        assert_eq!(record.rating(), Some(Rating::High));
        assert_eq!(summary.prof_risk, 2.0);
        assert_eq!(summary.result, 2.0);
        assert_eq!(summary.band, ResultBand::Low);
    }

    #[test]
    fn test_derived_fields_satisfy_formulas() {
        let catalog = catalog();
        let mut table = Table::new();
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::Large,
            Susceptibility::Often,
            Probability::VeryLikely,
        );
        fill_record(
            &mut table,
            &catalog,
            "2. Noise",
            "Prolonged exposure",
            Damage::Small,
            Susceptibility::Sometimes,
            Probability::Unlikely,
        );
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        let ws = f64::from(table.weight_sum().unwrap());
        assert_eq!(ws, 7.0);
        for record in table.records() {
            let d = f64::from(record.damage().unwrap().points());
            let s = f64::from(record.susceptibility().unwrap().points());
            let p = f64::from(record.probability().unwrap().points());
            assert_eq!(record.weight(), Some(round2(p / ws)));
            assert_eq!(record.identified_risk(), Some(round2(d * s * p / ws)));
        }
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let catalog = catalog();
        let mut table = Table::new();
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::Medium,
            Susceptibility::Often,
            Probability::Likely,
        );
        fill_record(
            &mut table,
            &catalog,
            "2. Noise",
            "Prolonged exposure",
            Damage::Minor,
            Susceptibility::Rare,
            Probability::Sometimes,
        );
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        let first: Vec<Record> = table.records().to_vec();
        let first_summary = (table.prof_risk(), table.result(), table.result_band());
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        assert_eq!(table.records(), first.as_slice());
        assert_eq!(
            (table.prof_risk(), table.result(), table.result_band()),
            first_summary
        );
    }

    #[test]
    fn test_duplicates_collapse_first_wins() {
        let catalog = catalog();
        let mut table = Table::new();
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::VeryLarge,
            Susceptibility::Constantly,
            Probability::VeryLikely,
        );
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::Minor,
            Susceptibility::VeryRare,
            Probability::AlmostImpossible,
        );
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        assert_eq!(table.records().len(), 1);
        // the first-encountered instance's ratings survive
        assert_eq!(table.records()[0].damage(), Some(Damage::VeryLarge));
    }

    #[test]
    fn test_records_sort_by_ordinal_then_description() {
        let catalog = catalog();
        let mut table = Table::new();
        fill_record(
            &mut table,
            &catalog,
            "2. Noise",
            "Prolonged exposure",
            Damage::Minor,
            Susceptibility::Rare,
            Probability::Unlikely,
        );
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::Minor,
            Susceptibility::Rare,
            Probability::Unlikely,
        );
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        let ordinals: Vec<&str> = table.records().iter().filter_map(Record::n).collect();
        assert_eq!(ordinals, vec!["1", "2"]);
    }

    #[test]
    fn test_methods_collects_sorted_unique_measures() {
        let catalog = catalog();
        let mut table = Table::new();
        // High rating: measures from "Event" get collected
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::VeryLarge,
            Susceptibility::Constantly,
            Probability::VeryLikely,
        );
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        assert_eq!(
            table.methods(),
            ["Install guard".to_string(), "Wear gloves".to_string()]
        );
        assert!(table.methods_changed());
    }

    #[test]
    fn test_methods_changed_stays_down_when_list_is_unchanged() {
        let catalog = catalog();
        let mut table = Table::new();
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::VeryLarge,
            Susceptibility::Constantly,
            Probability::VeryLikely,
        );
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        assert!(table.methods_changed());
        table.clear_methods_changed();
        // same input, same methods list: the flag must not be re-raised
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        assert!(!table.methods_changed());
    }

    #[test]
    fn test_methods_skips_low_rated_records() {
        let catalog = catalog();
        let mut table = Table::new();
        // 5 identical-probability low-impact rows keep every risk <= 0.9
        for event in ["Event", "Second event"] {
            fill_record(
                &mut table,
                &catalog,
                "1. Danger",
                event,
                Damage::Minor,
                Susceptibility::VeryRare,
                Probability::Sometimes,
            );
        }
        assert!(matches!(table.calculate(&catalog, true), Outcome::Ok(_)));
        for record in table.records() {
            assert_eq!(record.rating(), Some(Rating::Low));
        }
        assert!(table.methods().is_empty());
    }

    #[test]
    fn test_skip_methods_update() {
        let catalog = catalog();
        let mut table = Table::new();
        fill_record(
            &mut table,
            &catalog,
            "1. Danger",
            "Event",
            Damage::VeryLarge,
            Susceptibility::Constantly,
            Probability::VeryLikely,
        );
        assert!(matches!(table.calculate(&catalog, false), Outcome::Ok(_)));
        assert!(table.methods().is_empty());
    }

    #[test]
    fn test_k_factor_validation() {
        let mut table = Table::new();
        assert!(table.set_k_factor(1.0));
        assert!(!table.set_k_factor(0.5));
        assert_eq!(table.k_factor(), 1.0);
        assert!(table.set_k_factor(-1.0));
        assert_eq!(table.k_factor(), -1.0);
    }

    #[test]
    fn test_mutations_raise_modified_flag() {
        let catalog = catalog();
        let mut table = Table::new();
        assert!(!table.is_modified());
        let idx = table.add_record();
        assert!(table.is_modified());
        table.clear_modified();
        // rejected assignment leaves the flag down
        table.set_record_event(idx, &catalog, "Event");
        assert!(!table.is_modified());
        table.set_record_danger(idx, &catalog, "1. Danger");
        assert!(table.is_modified());
    }
}
