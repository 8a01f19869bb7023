//! Base tax calculation.
//!
//! Applies a resolved band formula: the band's fixed amount plus the
//! marginal rate on income above the band's excess threshold.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::BracketResolution;

/// The tax of a fortnightly income before any dependant reduction.
#[derive(Debug, Clone)]
pub struct BaseTaxResult {
    /// The fixed amount of the band.
    pub base_tax: Decimal,
    /// Income above the excess threshold.
    pub excess_amount: Decimal,
    /// `excess_amount * marginal_rate`.
    pub excess_tax: Decimal,
    /// `base_tax + excess_tax`.
    pub total_before_reduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the pre-reduction tax for the resolved bracket.
///
/// Amounts are kept at full decimal precision.
pub fn calculate_base_tax(resolution: &BracketResolution, step_number: u32) -> BaseTaxResult {
    let formula = &resolution.formula;
    let income = resolution.taxable_income;

    let base_tax = formula.base_tax;
    let excess_amount = income - formula.excess_threshold;
    let excess_tax = excess_amount * formula.marginal_rate;
    let total_before_reduction = base_tax + excess_tax;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_tax".to_string(),
        rule_name: "Base Tax".to_string(),
        statute_ref: resolution.audit_step.statute_ref.clone(),
        input: serde_json::json!({
            "fortnightly_taxable_income": income.to_string(),
            "band": resolution.band
        }),
        output: serde_json::json!({
            "base_tax": base_tax.to_string(),
            "excess_amount": excess_amount.to_string(),
            "excess_tax": excess_tax.to_string(),
            "total_before_reduction": total_before_reduction.to_string()
        }),
        reasoning: format!(
            "K{} + (K{} - K{}) x {} = K{}",
            base_tax.normalize(),
            income.normalize(),
            formula.excess_threshold.normalize(),
            formula.marginal_rate.normalize(),
            total_before_reduction.normalize()
        ),
    };

    BaseTaxResult {
        base_tax,
        excess_amount,
        excess_tax,
        total_before_reduction,
        audit_step,
    }
}
