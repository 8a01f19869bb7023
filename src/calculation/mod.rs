//! Calculation logic for the tax engine.
//!
//! Each step of an income tax calculation lives in its own module and
//! returns its figures together with the [`AuditStep`](crate::models::AuditStep)
//! that explains them: period conversion, deduction aggregation, bracket
//! resolution, base tax and the dependant reduction. [`compute_income_tax`]
//! runs them in order. The business calculator and the compliance checks
//! are independent of the salary and wages schedule.

mod base_tax;
mod bracket;
mod business_tax;
mod compliance;
mod deductions;
mod dependant_reduction;
mod income_tax;
mod period;

pub use base_tax::{BaseTaxResult, calculate_base_tax};
pub use bracket::{BracketResolution, resolve_bracket};
pub use business_tax::{
    CORPORATE_TAX_RATE, GST_RATE, GST_REGISTRATION_THRESHOLD, SME_THRESHOLD,
    compute_business_tax, is_business_data_valid, validate_business_data,
    validate_business_data_on,
};
pub use compliance::{
    COMPLIANCE_REQUIREMENTS, ComplianceRequirement, applicable_requirements,
    check_business_compliance, generate_compliance_report,
};
pub use deductions::{DeductionAggregation, NEGATIVE_TAXABLE_INCOME, aggregate_deductions};
pub use dependant_reduction::{DependantReductionResult, apply_dependant_reduction};
pub use income_tax::compute_income_tax;
pub use period::{
    FORTNIGHTS_PER_YEAR, PeriodConversionResult, fortnights_per_year, normalize_income,
    to_annual, to_fortnightly,
};
