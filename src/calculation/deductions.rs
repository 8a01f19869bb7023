//! Deduction aggregation.
//!
//! Salary sacrifice and itemized deductions come off the tax base. The
//! pension contribution does not: it is taken from pay after tax, so it is
//! reported here but excluded from `annual_taxable_income`.

use rust_decimal::Decimal;

use crate::config::DeductionRates;
use crate::models::{AuditStep, AuditWarning, DeductionSummary, TaxpayerProfile};

/// Warning code raised when deductions exceed gross income.
pub const NEGATIVE_TAXABLE_INCOME: &str = "NEGATIVE_TAXABLE_INCOME";

/// The result of aggregating deductions.
#[derive(Debug, Clone)]
pub struct DeductionAggregation {
    /// The deductions, for reporting.
    pub summary: DeductionSummary,
    /// Sum of the itemized deductions.
    pub other_total: Decimal,
    /// Annual gross less salary sacrifice and itemized deductions.
    pub annual_taxable_income: Decimal,
    /// Raised when `annual_taxable_income` is negative.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Computes the deductions of a profile against its annual gross income.
///
/// # Examples
///
/// ```
/// use png_tax_engine::calculation::aggregate_deductions;
/// use png_tax_engine::config::ConfigLoader;
/// use png_tax_engine::models::TaxpayerProfile;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded().unwrap();
/// let mut profile = TaxpayerProfile::fortnightly(Decimal::new(2000, 0));
/// profile.has_salary_sacrifice = true;
///
/// let result = aggregate_deductions(
///     Decimal::new(52000, 0),
///     &profile,
///     config.schedule().deductions(),
///     2,
/// );
/// assert_eq!(result.summary.salary_sacrifice, Decimal::new(20800, 0));
/// assert_eq!(result.annual_taxable_income, Decimal::new(31200, 0));
/// ```
pub fn aggregate_deductions(
    annual_gross: Decimal,
    profile: &TaxpayerProfile,
    rates: &DeductionRates,
    step_number: u32,
) -> DeductionAggregation {
    let salary_sacrifice = if profile.has_salary_sacrifice {
        annual_gross * rates.salary_sacrifice_rate
    } else {
        Decimal::ZERO
    };

    let pension_contribution = if profile.has_pension_contribution {
        annual_gross * rates.pension_contribution_rate
    } else {
        Decimal::ZERO
    };

    let other_total: Decimal = profile.other_deductions.iter().map(|d| d.amount).sum();
    let total = salary_sacrifice + pension_contribution + other_total;
    let annual_taxable_income = annual_gross - salary_sacrifice - other_total;

    let warning = (annual_taxable_income < Decimal::ZERO).then(|| AuditWarning {
        code: NEGATIVE_TAXABLE_INCOME.to_string(),
        message: format!(
            "Deductions of K{} exceed gross income of K{}; tax is computed on zero",
            (salary_sacrifice + other_total).normalize(),
            annual_gross.normalize()
        ),
        severity: "medium".to_string(),
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "deduction_aggregation".to_string(),
        rule_name: "Deduction Aggregation".to_string(),
        statute_ref: "Salary sacrifice, Nasfund and itemized deductions".to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.to_string(),
            "has_salary_sacrifice": profile.has_salary_sacrifice,
            "has_pension_contribution": profile.has_pension_contribution,
            "other_deductions": profile.other_deductions.len()
        }),
        output: serde_json::json!({
            "salary_sacrifice": salary_sacrifice.to_string(),
            "pension_contribution": pension_contribution.to_string(),
            "other_total": other_total.to_string(),
            "total": total.to_string(),
            "annual_taxable_income": annual_taxable_income.to_string()
        }),
        reasoning: format!(
            "K{} - K{} salary sacrifice - K{} other deductions = K{} taxable; \
             K{} pension is deducted after tax",
            annual_gross.normalize(),
            salary_sacrifice.normalize(),
            other_total.normalize(),
            annual_taxable_income.normalize(),
            pension_contribution.normalize()
        ),
    };

    DeductionAggregation {
        summary: DeductionSummary {
            salary_sacrifice,
            pension_contribution,
            other: profile.other_deductions.clone(),
            total,
        },
        other_total,
        annual_taxable_income,
        warning,
        audit_step,
    }
}
