//! Configuration loading and management for the PNG tax engine.
//!
//! This module loads the statutory schedule from YAML files: bands and
//! per-column formulas, dependant reductions, and deduction rates.
//!
//! # Example
//!
//! ```no_run
//! use png_tax_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/png_2023").unwrap();
//! println!("Loaded schedule: {}", config.schedule().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BandDefinition, BandFormula, BracketsFile, DeductionRates, DependantReductionRule,
    DependantsFile, ScheduleFile, ScheduleMetadata, TaxSchedule,
};
