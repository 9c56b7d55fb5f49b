//! Core module - the assessment engine

pub mod catalog;
pub mod record;
pub mod riskmap;
pub mod scales;
pub mod session;
pub mod table;

pub use catalog::{Catalog, CatalogError, HazardEntry};
pub use record::Record;
pub use riskmap::{RiskMap, REGULATORY_DOCS};
pub use scales::{Damage, Probability, Rating, ResultBand, Susceptibility};
pub use session::Session;
pub use table::{Outcome, Summary, Table};
