//! CLI command implementations

pub mod add;
pub mod calc;
pub mod catalog;
pub mod new;
pub mod set;
pub mod show;
