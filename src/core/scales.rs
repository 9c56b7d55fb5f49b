//! Fixed ordinal rating scales for assessment records
//!
//! Every record is scored on three independent five-level scales:
//! damage (how bad the harm is), susceptibility (how exposed the worker
//! is) and probability (how likely the hazardous event is). Each level
//! carries a fixed point value in 1..=5 that feeds the weighted
//! aggregation in [`crate::core::table::Table::calculate`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Damage scale - severity of the harm if the event occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Damage {
    /// 1 point
    #[serde(rename = "Minor damage")]
    Minor,
    /// 2 points
    #[serde(rename = "Small damage")]
    Small,
    /// 3 points
    #[serde(rename = "Medium damage")]
    Medium,
    /// 4 points
    #[serde(rename = "Large damage")]
    Large,
    /// 5 points
    #[serde(rename = "Very large damage")]
    VeryLarge,
}

impl Damage {
    /// All levels in ascending point order
    pub fn all() -> &'static [Damage] {
        &[
            Damage::Minor,
            Damage::Small,
            Damage::Medium,
            Damage::Large,
            Damage::VeryLarge,
        ]
    }

    pub fn points(&self) -> u8 {
        match self {
            Damage::Minor => 1,
            Damage::Small => 2,
            Damage::Medium => 3,
            Damage::Large => 4,
            Damage::VeryLarge => 5,
        }
    }

    /// Qualitative label, identical to the wire form
    pub fn label(&self) -> &'static str {
        match self {
            Damage::Minor => "Minor damage",
            Damage::Small => "Small damage",
            Damage::Medium => "Medium damage",
            Damage::Large => "Large damage",
            Damage::VeryLarge => "Very large damage",
        }
    }
}

impl std::fmt::Display for Damage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Damage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minor damage" | "minor" => Ok(Damage::Minor),
            "small damage" | "small" => Ok(Damage::Small),
            "medium damage" | "medium" => Ok(Damage::Medium),
            "large damage" | "large" => Ok(Damage::Large),
            "very large damage" | "very-large" | "very large" => Ok(Damage::VeryLarge),
            _ => Err(format!("Unknown damage level: {}", s)),
        }
    }
}

/// Susceptibility scale - how often the worker is exposed to the hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Susceptibility {
    /// 1 point
    #[serde(rename = "Very rare")]
    VeryRare,
    /// 2 points
    #[serde(rename = "Rare")]
    Rare,
    /// 3 points
    #[serde(rename = "Sometimes")]
    Sometimes,
    /// 4 points
    #[serde(rename = "Often")]
    Often,
    /// 5 points
    #[serde(rename = "Constantly")]
    Constantly,
}

impl Susceptibility {
    pub fn all() -> &'static [Susceptibility] {
        &[
            Susceptibility::VeryRare,
            Susceptibility::Rare,
            Susceptibility::Sometimes,
            Susceptibility::Often,
            Susceptibility::Constantly,
        ]
    }

    pub fn points(&self) -> u8 {
        match self {
            Susceptibility::VeryRare => 1,
            Susceptibility::Rare => 2,
            Susceptibility::Sometimes => 3,
            Susceptibility::Often => 4,
            Susceptibility::Constantly => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Susceptibility::VeryRare => "Very rare",
            Susceptibility::Rare => "Rare",
            Susceptibility::Sometimes => "Sometimes",
            Susceptibility::Often => "Often",
            Susceptibility::Constantly => "Constantly",
        }
    }
}

impl std::fmt::Display for Susceptibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Susceptibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "very rare" | "very-rare" => Ok(Susceptibility::VeryRare),
            "rare" => Ok(Susceptibility::Rare),
            "sometimes" => Ok(Susceptibility::Sometimes),
            "often" => Ok(Susceptibility::Often),
            "constantly" | "constant" => Ok(Susceptibility::Constantly),
            _ => Err(format!("Unknown susceptibility level: {}", s)),
        }
    }
}

/// Probability scale - likelihood of the hazardous event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Probability {
    /// 1 point
    #[serde(rename = "Almost impossible")]
    AlmostImpossible,
    /// 2 points
    #[serde(rename = "Unlikely")]
    Unlikely,
    /// 3 points
    #[serde(rename = "Sometimes")]
    Sometimes,
    /// 4 points
    #[serde(rename = "Likely")]
    Likely,
    /// 5 points
    #[serde(rename = "Very likely")]
    VeryLikely,
}

impl Probability {
    pub fn all() -> &'static [Probability] {
        &[
            Probability::AlmostImpossible,
            Probability::Unlikely,
            Probability::Sometimes,
            Probability::Likely,
            Probability::VeryLikely,
        ]
    }

    pub fn points(&self) -> u8 {
        match self {
            Probability::AlmostImpossible => 1,
            Probability::Unlikely => 2,
            Probability::Sometimes => 3,
            Probability::Likely => 4,
            Probability::VeryLikely => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Probability::AlmostImpossible => "Almost impossible",
            Probability::Unlikely => "Unlikely",
            Probability::Sometimes => "Sometimes",
            Probability::Likely => "Likely",
            Probability::VeryLikely => "Very likely",
        }
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Probability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "almost impossible" | "almost-impossible" => Ok(Probability::AlmostImpossible),
            "unlikely" => Ok(Probability::Unlikely),
            "sometimes" => Ok(Probability::Sometimes),
            "likely" => Ok(Probability::Likely),
            "very likely" | "very-likely" => Ok(Probability::VeryLikely),
            _ => Err(format!("Unknown probability level: {}", s)),
        }
    }
}

/// Per-record qualitative rating derived from the identified risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Low,
    Moderate,
    High,
}

impl Rating {
    /// Classify an identified risk score. Boundary values belong to the
    /// lower-severity bucket: 0.9 is still Low, 1.8 is still Moderate.
    pub fn for_risk(risk: f64) -> Rating {
        if risk <= 0.9 {
            Rating::Low
        } else if risk <= 1.8 {
            Rating::Moderate
        } else {
            Rating::High
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Low => write!(f, "Low"),
            Rating::Moderate => write!(f, "Moderate"),
            Rating::High => write!(f, "High"),
        }
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Rating::Low),
            "moderate" => Ok(Rating::Moderate),
            "high" => Ok(Rating::High),
            _ => Err(format!("Unknown rating: {}", s)),
        }
    }
}

/// Classification of the table-level final result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultBand {
    Low,
    Medium,
    High,
}

impl ResultBand {
    /// Classify a final result. 10.0 is inclusive for Low; the Medium
    /// band ends with a strict bound, so 15.0 is already High.
    pub fn for_result(result: f64) -> ResultBand {
        if result <= 10.0 {
            ResultBand::Low
        } else if result < 15.0 {
            ResultBand::Medium
        } else {
            ResultBand::High
        }
    }
}

impl std::fmt::Display for ResultBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultBand::Low => write!(f, "Low"),
            ResultBand::Medium => write!(f, "Medium"),
            ResultBand::High => write!(f, "High"),
        }
    }
}

impl FromStr for ResultBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ResultBand::Low),
            "medium" => Ok(ResultBand::Medium),
            "high" => Ok(ResultBand::High),
            _ => Err(format!("Unknown result classification: {}", s)),
        }
    }
}
