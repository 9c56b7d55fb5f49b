//! ORAT: Occupational Risk Assessment Toolkit
//!
//! A toolkit for building occupational risk assessment maps: a hazard
//! catalog, three fixed rating scales, a weighted aggregation engine and
//! the gzip-compressed `.rsk` map format.

pub mod cli;
pub mod core;
pub mod rsk;
