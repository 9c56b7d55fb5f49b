//! Assessment record - one row of a risk assessment table
//!
//! A record starts out empty and is filled through guarded setters that
//! enforce the dependency chain hazard -> event -> ratings. An assignment
//! that violates a dependency or names a value outside the catalog/scales
//! is silently ignored; the setters return `bool` so programmatic callers
//! can still tell whether the assignment took effect.

use crate::core::catalog::Catalog;
use crate::core::scales::{Damage, Probability, Rating, Susceptibility};

/// Round to two decimal places, the precision of all derived fields
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// One row of an assessment table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    n: Option<String>,
    danger: Option<String>,
    event: Option<String>,
    damage: Option<Damage>,
    susceptibility: Option<Susceptibility>,
    probability: Option<Probability>,
    weight: Option<f64>,
    identified_risk: Option<f64>,
    rating: Option<Rating>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n(&self) -> Option<&str> {
        self.n.as_deref()
    }

    pub fn danger(&self) -> Option<&str> {
        self.danger.as_deref()
    }

    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    pub fn damage(&self) -> Option<Damage> {
        self.damage
    }

    pub fn susceptibility(&self) -> Option<Susceptibility> {
        self.susceptibility
    }

    pub fn probability(&self) -> Option<Probability> {
        self.probability
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn identified_risk(&self) -> Option<f64> {
        self.identified_risk
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// Catalog key rebuilt from the stored ordinal and description
    pub fn catalog_key(&self) -> Option<String> {
        match (&self.n, &self.danger) {
            (Some(n), Some(danger)) => Some(format!("{}. {}", n, danger)),
            _ => None,
        }
    }

    /// Choose a hazard by catalog key. Copies the catalog ordinal and
    /// description and clears any previously chosen event, since the
    /// valid event set depends on the hazard.
    pub fn set_danger(&mut self, catalog: &Catalog, key: &str) -> bool {
        match catalog.get(key) {
            Some(entry) => {
                self.n = Some(entry.no.clone());
                self.danger = Some(entry.desc.clone());
                self.event = None;
                true
            }
            None => false,
        }
    }

    /// Choose a hazardous event. Requires a hazard and membership of the
    /// event in that hazard's event list.
    pub fn set_event(&mut self, catalog: &Catalog, event: &str) -> bool {
        let Some(key) = self.catalog_key() else {
            return false;
        };
        if catalog.events_for(&key).contains(&event) {
            self.event = Some(event.to_string());
            true
        } else {
            false
        }
    }

    /// Rate the damage. Requires an event to be chosen first.
    pub fn set_damage(&mut self, damage: Damage) -> bool {
        if self.event.is_none() {
            return false;
        }
        self.damage = Some(damage);
        true
    }

    /// Rate the susceptibility. Requires an event to be chosen first.
    pub fn set_susceptibility(&mut self, susceptibility: Susceptibility) -> bool {
        if self.event.is_none() {
            return false;
        }
        self.susceptibility = Some(susceptibility);
        true
    }

    /// Rate the probability. Requires an event to be chosen first.
    pub fn set_probability(&mut self, probability: Probability) -> bool {
        if self.event.is_none() {
            return false;
        }
        self.probability = Some(probability);
        true
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = Some(round2(weight));
    }

    pub fn set_identified_risk(&mut self, risk: f64) {
        self.identified_risk = Some(round2(risk));
    }

    pub fn set_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }

    /// True when any field needed by the aggregation is still unset
    pub fn is_not_filled(&self) -> bool {
        self.n.is_none()
            || self.danger.is_none()
            || self.event.is_none()
            || self.damage.is_none()
            || self.susceptibility.is_none()
            || self.probability.is_none()
    }

    /// True only when every field is unset or blank
    pub fn is_empty(&self) -> bool {
        fn blank(s: &Option<String>) -> bool {
            s.as_deref().map_or(true, str::is_empty)
        }
        blank(&self.n)
            && blank(&self.danger)
            && blank(&self.event)
            && self.damage.is_none()
            && self.susceptibility.is_none()
            && self.probability.is_none()
            && self.weight.is_none()
            && self.identified_risk.is_none()
            && self.rating.is_none()
    }

    /// Rebuild a record from persisted fields, trusting them verbatim
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        n: Option<String>,
        danger: Option<String>,
        event: Option<String>,
        damage: Option<Damage>,
        susceptibility: Option<Susceptibility>,
        probability: Option<Probability>,
        weight: Option<f64>,
        identified_risk: Option<f64>,
        rating: Option<Rating>,
    ) -> Self {
        Self {
            n,
            danger,
            event,
            damage,
            susceptibility,
            probability,
            weight,
            identified_risk,
            rating,
        }
    }
}
