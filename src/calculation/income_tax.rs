//! Income tax calculation.
//!
//! [`compute_income_tax`] runs every step in order (period conversion,
//! deductions, bracket resolution, base tax, dependant reduction) and
//! assembles the per-period figures of a [`TaxResult`].
//!
//! Figures are exact decimals; nothing is rounded until presentation (see
//! [`crate::format`]). Annual tax payable and final net pay are always the
//! fortnightly figure times 26.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxSchedule;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, PeriodAmount, TaxBreakdown, TaxResult, TaxpayerProfile};

use super::{
    aggregate_deductions, apply_dependant_reduction, calculate_base_tax, fortnights_per_year,
    normalize_income, resolve_bracket,
};

/// Computes the income tax of a taxpayer under `schedule`.
///
/// # Errors
///
/// Returns `InvalidInput` if the profile fails
/// [`TaxpayerProfile::validate`]. No partial result is produced.
///
/// # Examples
///
/// ```
/// use png_tax_engine::calculation::compute_income_tax;
/// use png_tax_engine::config::ConfigLoader;
/// use png_tax_engine::models::TaxpayerProfile;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::embedded().unwrap();
/// let profile = TaxpayerProfile::fortnightly(Decimal::new(1000, 0));
///
/// let result = compute_income_tax(&profile, config.schedule()).unwrap();
/// assert_eq!(result.tax_payable.fortnightly, Decimal::from_str("69.231").unwrap());
/// ```
pub fn compute_income_tax(
    profile: &TaxpayerProfile,
    schedule: &TaxSchedule,
) -> EngineResult<TaxResult> {
    profile.validate()?;

    let class = profile.classification();
    let mut steps: Vec<AuditStep> = Vec::with_capacity(6);
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let gross = normalize_income(profile.income, profile.is_fortnightly, step_number);
    steps.push(gross.audit_step);
    step_number += 1;

    let deductions = aggregate_deductions(
        gross.annual,
        profile,
        schedule.deductions(),
        step_number,
    );
    steps.push(deductions.audit_step);
    warnings.extend(deductions.warning);
    step_number += 1;

    let periods = fortnights_per_year();
    let annual_taxable = deductions.annual_taxable_income;
    let fortnightly_taxable = annual_taxable / periods;

    let bracket = resolve_bracket(fortnightly_taxable, class, schedule, step_number)?;
    step_number += 1;

    let base = calculate_base_tax(&bracket, step_number);
    step_number += 1;

    let reduction = apply_dependant_reduction(
        base.total_before_reduction,
        class,
        profile.dependants,
        schedule,
        step_number,
    );
    step_number += 1;

    let tax_payable = PeriodAmount::from_fortnightly(reduction.final_tax);
    let net_income = PeriodAmount {
        fortnightly: fortnightly_taxable - tax_payable.fortnightly,
        annual: annual_taxable - tax_payable.annual,
    };
    let pension = deductions.summary.pension_contribution;
    let final_net_pay = PeriodAmount::from_fortnightly(net_income.fortnightly - pension / periods);

    let effective_tax_rate = if gross.annual.is_zero() {
        Decimal::ZERO
    } else {
        tax_payable.annual / gross.annual
    };

    let assembly_step = AuditStep {
        step_number,
        rule_id: "result_assembly".to_string(),
        rule_name: "Net Pay".to_string(),
        statute_ref: "Net pay after tax and Nasfund".to_string(),
        input: serde_json::json!({
            "annual_taxable_income": annual_taxable.to_string(),
            "fortnightly_tax": reduction.final_tax.to_string(),
            "pension_contribution": pension.to_string()
        }),
        output: serde_json::json!({
            "annual_tax": tax_payable.annual.to_string(),
            "annual_net_income": net_income.annual.to_string(),
            "annual_final_net_pay": final_net_pay.annual.to_string(),
            "effective_tax_rate": effective_tax_rate.to_string()
        }),
        reasoning: format!(
            "K{} taxable - K{} tax = K{} net; less K{} pension = K{} final net pay per year",
            annual_taxable.normalize(),
            tax_payable.annual.normalize(),
            net_income.annual.normalize(),
            pension.normalize(),
            final_net_pay.annual.normalize()
        ),
    };

    debug!(
        tax_class = class.as_str(),
        band = ?bracket.band,
        fortnightly_taxable = %fortnightly_taxable,
        fortnightly_tax = %reduction.final_tax,
        dependant_reduction = %reduction.reduction,
        "Income tax computed"
    );

    let tax_breakdown = TaxBreakdown {
        base_tax: base.base_tax,
        excess_amount: base.excess_amount,
        excess_tax: base.excess_tax,
        total_before_reduction: base.total_before_reduction,
        dependant_reduction: reduction.reduction,
        final_tax: reduction.final_tax,
        bracket_label: bracket.label,
    };

    steps.push(bracket.audit_step);
    steps.push(base.audit_step);
    steps.push(reduction.audit_step);
    steps.push(assembly_step);

    Ok(TaxResult {
        gross_income: PeriodAmount {
            fortnightly: gross.fortnightly,
            annual: gross.annual,
        },
        taxable_income: PeriodAmount {
            fortnightly: fortnightly_taxable,
            annual: annual_taxable,
        },
        tax_payable,
        net_income,
        final_net_pay,
        effective_tax_rate,
        tax_breakdown,
        deductions: deductions.summary,
        audit_trace: AuditTrace { steps, warnings },
    })
}
