//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the statutory
//! tax schedule from YAML files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{EngineError, EngineResult};

use super::types::{BracketsFile, DependantsFile, ScheduleFile, TaxSchedule};

const EMBEDDED_SCHEDULE: &str = include_str!("../../config/png_2023/schedule.yaml");
const EMBEDDED_BRACKETS: &str = include_str!("../../config/png_2023/brackets.yaml");
const EMBEDDED_DEPENDANTS: &str = include_str!("../../config/png_2023/dependants.yaml");

/// Loads and provides access to the statutory tax schedule.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/png_2023/
/// ├── schedule.yaml    # Metadata and deduction rates
/// ├── brackets.yaml    # Bands and per-column formulas
/// └── dependants.yaml  # Dependant reduction rules
/// ```
///
/// # Example
///
/// ```no_run
/// use png_tax_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/png_2023").unwrap();
/// println!("Loaded schedule: {}", loader.schedule().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedule: TaxSchedule,
}

impl ConfigLoader {
    /// Loads the schedule from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The tables fail [`TaxSchedule::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule = Self::load_yaml::<ScheduleFile>(&path.join("schedule.yaml"))?;
        let brackets = Self::load_yaml::<BracketsFile>(&path.join("brackets.yaml"))?;
        let dependants = Self::load_yaml::<DependantsFile>(&path.join("dependants.yaml"))?;

        Ok(Self {
            schedule: TaxSchedule::new(schedule, brackets, dependants)?,
        })
    }

    /// Parses the 2023 schedule compiled into the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use png_tax_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::embedded().unwrap();
    /// assert_eq!(loader.schedule().metadata().code, "PNG-SWT-2023");
    /// ```
    pub fn embedded() -> EngineResult<Self> {
        Self::from_yaml_strs(EMBEDDED_SCHEDULE, EMBEDDED_BRACKETS, EMBEDDED_DEPENDANTS)
    }

    /// Builds a schedule from the contents of the three YAML files.
    pub fn from_yaml_strs(schedule: &str, brackets: &str, dependants: &str) -> EngineResult<Self> {
        let schedule = Self::parse_yaml::<ScheduleFile>("schedule.yaml", schedule)?;
        let brackets = Self::parse_yaml::<BracketsFile>("brackets.yaml", brackets)?;
        let dependants = Self::parse_yaml::<DependantsFile>("dependants.yaml", dependants)?;

        Ok(Self {
            schedule: TaxSchedule::new(schedule, brackets, dependants)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the loaded schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }

    /// Consumes the loader, returning the schedule.
    pub fn into_schedule(self) -> TaxSchedule {
        self.schedule
    }
}
