//! Taxpayer profile model and related types.
//!
//! This module defines the [`TaxpayerProfile`] input together with the
//! [`TaxClass`] and [`Band`] tags used to look up the statutory tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The highest dependant count the schedule distinguishes ("3 or more").
pub const MAX_DEPENDANTS: u8 = 3;

/// The largest income, deduction or business figure accepted (K1,000,000,000,000).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// The statutory column a taxpayer is taxed under.
///
/// Non-resident status alone selects the non-resident column; the
/// declaration only matters for residents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxClass {
    /// Resident with a tax declaration lodged with the employer.
    ResidentDeclared,
    /// Resident without a declaration lodged.
    ResidentUndeclared,
    /// Non-resident, regardless of declaration status.
    NonResident,
}

impl TaxClass {
    /// Derives the column from residency and declaration status.
    pub fn from_status(is_resident: bool, has_declaration_lodged: bool) -> Self {
        match (is_resident, has_declaration_lodged) {
            (false, _) => TaxClass::NonResident,
            (true, true) => TaxClass::ResidentDeclared,
            (true, false) => TaxClass::ResidentUndeclared,
        }
    }

    /// All columns, in schedule order.
    pub const ALL: [TaxClass; 3] = [
        TaxClass::ResidentDeclared,
        TaxClass::ResidentUndeclared,
        TaxClass::NonResident,
    ];

    /// The snake_case identifier used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxClass::ResidentDeclared => "resident_declared",
            TaxClass::ResidentUndeclared => "resident_undeclared",
            TaxClass::NonResident => "non_resident",
        }
    }

    /// A short human-readable description for bracket labels.
    pub fn description(&self) -> &'static str {
        match self {
            TaxClass::ResidentDeclared => "Resident, declaration lodged",
            TaxClass::ResidentUndeclared => "Resident, no declaration",
            TaxClass::NonResident => "Non-resident",
        }
    }
}

/// A fortnightly income band of the salary and wages tax tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Table A: up to and including K769.23.
    A,
    /// Table B: above K769.23 and below K1,269.23.
    B,
    /// Table C, first step: K1,269.23 up to K2,692.31.
    C1,
    /// Table C, second step: K2,692.31 up to K9,615.38.
    C2,
    /// Table C, top step: K9,615.38 and over.
    C3,
}

/// An itemized deduction that reduces taxable income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeduction {
    /// Free-text name of the deduction (e.g., "Insurance").
    pub name: String,
    /// The annual amount of the deduction.
    pub amount: Decimal,
}

/// The input to an income tax calculation.
///
/// # Example
///
/// ```
/// use png_tax_engine::models::{TaxClass, TaxpayerProfile};
/// use rust_decimal::Decimal;
///
/// let profile = TaxpayerProfile::fortnightly(Decimal::new(1000, 0));
/// assert!(profile.validate().is_ok());
/// assert_eq!(profile.classification(), TaxClass::ResidentDeclared);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    /// Salary income, either per fortnight or per year.
    pub income: Decimal,
    /// Whether `income` is a fortnightly figure rather than annual.
    pub is_fortnightly: bool,
    /// Whether the taxpayer is a PNG resident.
    pub is_resident: bool,
    /// Whether a tax declaration has been lodged.
    pub has_declaration_lodged: bool,
    /// Number of dependants; 3 means "3 or more".
    #[serde(default)]
    pub dependants: u8,
    /// Whether 40% of gross salary is sacrificed before tax.
    #[serde(default)]
    pub has_salary_sacrifice: bool,
    /// Whether a 6% superannuation (Nasfund) contribution is made after tax.
    #[serde(default, alias = "has_nasfund")]
    pub has_pension_contribution: bool,
    /// Itemized annual deductions that reduce taxable income.
    #[serde(default)]
    pub other_deductions: Vec<OtherDeduction>,
}

impl TaxpayerProfile {
    /// A resident with a declaration lodged, no dependants and no deductions,
    /// earning `income` per fortnight.
    pub fn fortnightly(income: Decimal) -> Self {
        Self {
            income,
            is_fortnightly: true,
            is_resident: true,
            has_declaration_lodged: true,
            dependants: 0,
            has_salary_sacrifice: false,
            has_pension_contribution: false,
            other_deductions: vec![],
        }
    }

    /// Same as [`TaxpayerProfile::fortnightly`] but with an annual income.
    pub fn annual(income: Decimal) -> Self {
        Self {
            is_fortnightly: false,
            ..Self::fortnightly(income)
        }
    }

    /// Returns the statutory column for this taxpayer.
    pub fn classification(&self) -> TaxClass {
        TaxClass::from_status(self.is_resident, self.has_declaration_lodged)
    }

    /// Checks the input contract.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when income is negative or above
    /// [`MAX_AMOUNT`], dependants fall outside 0..=3, or any itemized
    /// deduction is negative or above [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.income < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "income",
                format!("must not be negative, got {}", self.income),
            ));
        }
        if self.income > MAX_AMOUNT {
            return Err(EngineError::invalid_input(
                "income",
                format!("too large, must not exceed {}", MAX_AMOUNT),
            ));
        }

        if self.dependants > MAX_DEPENDANTS {
            return Err(EngineError::invalid_input(
                "dependants",
                format!(
                    "must be between 0 and {}, got {}",
                    MAX_DEPENDANTS, self.dependants
                ),
            ));
        }

        for (index, deduction) in self.other_deductions.iter().enumerate() {
            if deduction.amount < Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    format!("other_deductions[{}].amount", index),
                    format!(
                        "deduction '{}' must not be negative, got {}",
                        deduction.name, deduction.amount
                    ),
                ));
            }
            if deduction.amount > MAX_AMOUNT {
                return Err(EngineError::invalid_input(
                    format!("other_deductions[{}].amount", index),
                    format!(
                        "deduction '{}' too large, must not exceed {}",
                        deduction.name, MAX_AMOUNT
                    ),
                ));
            }
        }

        Ok(())
    }
}
