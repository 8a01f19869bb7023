//! Income tax result models.
//!
//! This module contains the [`TaxResult`] type and its associated structures
//! that capture all outputs of an income tax calculation: per-period figures,
//! the tax breakdown, deductions and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, OtherDeduction};

/// A figure expressed for both pay periods.
///
/// # Example
///
/// ```
/// use png_tax_engine::models::PeriodAmount;
/// use rust_decimal::Decimal;
///
/// let amount = PeriodAmount::from_fortnightly(Decimal::new(100, 0));
/// assert_eq!(amount.annual, Decimal::new(2600, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmount {
    /// Amount per fortnight.
    pub fortnightly: Decimal,
    /// Amount per year.
    pub annual: Decimal,
}

impl PeriodAmount {
    /// Builds a pair whose annual figure is exactly 26 times the fortnightly.
    pub fn from_fortnightly(fortnightly: Decimal) -> Self {
        Self {
            fortnightly,
            annual: fortnightly * crate::calculation::fortnights_per_year(),
        }
    }
}

/// How the fortnightly tax was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// The fixed amount of the resolved bracket.
    pub base_tax: Decimal,
    /// Income above the bracket's excess threshold.
    pub excess_amount: Decimal,
    /// Tax on the excess at the bracket's marginal rate.
    pub excess_tax: Decimal,
    /// `base_tax + excess_tax`.
    pub total_before_reduction: Decimal,
    /// Dependant reduction subtracted from the total.
    pub dependant_reduction: Decimal,
    /// Fortnightly tax payable after the reduction.
    pub final_tax: Decimal,
    /// Human-readable description of the bracket that applied.
    pub bracket_label: String,
}

/// Deductions applied around the tax computation (annual figures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSummary {
    /// Pre-tax salary sacrifice.
    pub salary_sacrifice: Decimal,
    /// Post-tax pension (Nasfund) contribution.
    pub pension_contribution: Decimal,
    /// The itemized deductions as supplied.
    pub other: Vec<OtherDeduction>,
    /// Sum of all of the above.
    pub total: Decimal,
}

/// The complete result of an income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Salary before any deduction.
    pub gross_income: PeriodAmount,
    /// Gross less salary sacrifice and itemized deductions.
    pub taxable_income: PeriodAmount,
    /// Tax payable.
    pub tax_payable: PeriodAmount,
    /// Taxable income less tax payable.
    pub net_income: PeriodAmount,
    /// Net income less the pension contribution.
    pub final_net_pay: PeriodAmount,
    /// Annual tax payable over annual gross income.
    pub effective_tax_rate: Decimal,
    /// How the fortnightly tax was derived.
    pub tax_breakdown: TaxBreakdown,
    /// Deductions applied.
    pub deductions: DeductionSummary,
    /// Every step of the calculation, with reasoning.
    pub audit_trace: AuditTrace,
}
