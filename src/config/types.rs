//! Configuration types for the statutory tax schedule.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML schedule files, and the assembled
//! [`TaxSchedule`] the calculation functions read from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{Band, MAX_DEPENDANTS, TaxClass};

/// Metadata about the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Short identifier of the schedule (e.g., "PNG-SWT-2023").
    pub code: String,
    /// Title of the Act the rates come from.
    pub name: String,
    /// The date the rates take effect.
    pub effective_date: NaiveDate,
    /// ISO currency code of all amounts.
    pub currency: String,
}

/// Rates of the percentage-of-gross deductions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRates {
    /// Share of annual gross sacrificed before tax.
    pub salary_sacrifice_rate: Decimal,
    /// Share of annual gross contributed to the pension fund after tax.
    pub pension_contribution_rate: Decimal,
}

/// schedule.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    /// Schedule metadata.
    #[serde(flatten)]
    pub metadata: ScheduleMetadata,
    /// Deduction rates.
    pub deductions: DeductionRates,
}

/// The income range of a band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandDefinition {
    /// Which band this is.
    pub band: Band,
    /// Human-readable label of the band.
    pub label: String,
    /// Upper bound of fortnightly income; `None` for the top band.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Whether income equal to the upper bound belongs to this band.
    #[serde(default)]
    pub upper_inclusive: bool,
}

impl BandDefinition {
    /// Returns true if `income` does not exceed this band's upper bound.
    pub fn contains_upper(&self, income: Decimal) -> bool {
        match self.upper_bound {
            None => true,
            Some(bound) if self.upper_inclusive => income <= bound,
            Some(bound) => income < bound,
        }
    }
}

/// The tax formula of one band for one column:
/// `base_tax + (income - excess_threshold) * marginal_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandFormula {
    /// Fixed amount of the band.
    pub base_tax: Decimal,
    /// Income above which the marginal rate applies.
    pub excess_threshold: Decimal,
    /// Marginal rate on the excess.
    pub marginal_rate: Decimal,
}

/// brackets.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketsFile {
    /// Bands in ascending order.
    pub bands: Vec<BandDefinition>,
    /// Formulas by column and band.
    pub formulas: HashMap<TaxClass, HashMap<Band, BandFormula>>,
}

/// A capped percentage reduction for a dependant count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependantReductionRule {
    /// Dependant count this rule applies to (3 covers "3 or more").
    pub dependants: u8,
    /// Share of the tax that is reduced.
    pub rate: Decimal,
    /// Statutory ceiling of the reduction per fortnight.
    pub cap: Decimal,
}

/// dependants.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DependantsFile {
    /// One rule per non-zero dependant count.
    pub dependant_reductions: Vec<DependantReductionRule>,
}

/// The complete statutory schedule.
///
/// Immutable after construction; share it behind an `Arc` to serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct TaxSchedule {
    metadata: ScheduleMetadata,
    deductions: DeductionRates,
    bands: Vec<BandDefinition>,
    formulas: HashMap<TaxClass, HashMap<Band, BandFormula>>,
    dependant_reductions: Vec<DependantReductionRule>,
}

impl TaxSchedule {
    /// Assembles and validates a schedule from its component files.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the tables are not usable; see
    /// [`TaxSchedule::validate`].
    pub fn new(
        schedule: ScheduleFile,
        brackets: BracketsFile,
        dependants: DependantsFile,
    ) -> EngineResult<Self> {
        let mut dependant_reductions = dependants.dependant_reductions;
        dependant_reductions.sort_by_key(|r| r.dependants);

        let schedule = Self {
            metadata: schedule.metadata,
            deductions: schedule.deductions,
            bands: brackets.bands,
            formulas: brackets.formulas,
            dependant_reductions,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks that the tables describe a complete, unambiguous schedule.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidConfiguration { message });

        if self.bands.is_empty() {
            return invalid("no bands defined".to_string());
        }

        let last = self.bands.len() - 1;
        let mut previous: Option<Decimal> = None;
        for (index, band) in self.bands.iter().enumerate() {
            match band.upper_bound {
                None if index != last => {
                    return invalid(format!("band {:?} is unbounded but not last", band.band));
                }
                Some(_) if index == last => {
                    return invalid(format!("top band {:?} must be unbounded", band.band));
                }
                Some(bound) => {
                    if previous.is_some_and(|p| bound <= p) {
                        return invalid(format!(
                            "band {:?} upper bound {} is not ascending",
                            band.band, bound
                        ));
                    }
                    previous = Some(bound);
                }
                None => {}
            }
        }

        for class in TaxClass::ALL {
            let Some(formulas) = self.formulas.get(&class) else {
                return invalid(format!("no formulas for {}", class.as_str()));
            };
            for band in &self.bands {
                let Some(formula) = formulas.get(&band.band) else {
                    return invalid(format!(
                        "no formula for band {:?} in {}",
                        band.band,
                        class.as_str()
                    ));
                };
                if formula.marginal_rate < Decimal::ZERO || formula.base_tax < Decimal::ZERO {
                    return invalid(format!(
                        "negative amount in band {:?} of {}",
                        band.band,
                        class.as_str()
                    ));
                }
            }
        }

        let counts: Vec<u8> = self
            .dependant_reductions
            .iter()
            .map(|r| r.dependants)
            .collect();
        let expected: Vec<u8> = (1..=MAX_DEPENDANTS).collect();
        if counts != expected {
            return invalid(format!(
                "dependant reductions must cover 1 to {} exactly once, got {:?}",
                MAX_DEPENDANTS, counts
            ));
        }
        if self
            .dependant_reductions
            .iter()
            .any(|r| r.rate < Decimal::ZERO || r.cap < Decimal::ZERO)
        {
            return invalid("dependant reductions must not be negative".to_string());
        }

        let rates = [
            self.deductions.salary_sacrifice_rate,
            self.deductions.pension_contribution_rate,
        ];
        if rates.iter().any(|r| *r < Decimal::ZERO || *r > Decimal::ONE) {
            return invalid("deduction rates must be between 0 and 1".to_string());
        }

        Ok(())
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the deduction rates.
    pub fn deductions(&self) -> &DeductionRates {
        &self.deductions
    }

    /// Returns the bands in ascending order.
    pub fn bands(&self) -> &[BandDefinition] {
        &self.bands
    }

    /// Returns the formula of `band` for `class`.
    pub fn formula(&self, class: TaxClass, band: Band) -> Option<&BandFormula> {
        self.formulas.get(&class).and_then(|f| f.get(&band))
    }

    /// Returns the reduction rule for a dependant count, if any.
    pub fn dependant_reduction(&self, dependants: u8) -> Option<&DependantReductionRule> {
        self.dependant_reductions
            .iter()
            .find(|r| r.dependants == dependants)
    }

    /// Returns all reduction rules ordered by dependant count.
    pub fn dependant_reductions(&self) -> &[DependantReductionRule] {
        &self.dependant_reductions
    }
}
