//! Dependant reduction calculation.
//!
//! Resident taxpayers with a declaration lodged get a percentage of their
//! fortnightly tax back for each dependant bracket, up to a fixed ceiling.
//! Other columns get no reduction.

use rust_decimal::Decimal;

use crate::config::TaxSchedule;
use crate::models::{AuditStep, TaxClass};

/// The result of applying the dependant reduction.
#[derive(Debug, Clone)]
pub struct DependantReductionResult {
    /// The amount taken off the tax.
    pub reduction: Decimal,
    /// Tax after the reduction, never below zero.
    pub final_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Reduces `total_before_reduction` for the taxpayer's dependants.
///
/// The reduction is `min(total * rate, cap)` using the schedule's rule for
/// the dependant count; counts above 3 use the three-dependant rule.
///
/// # Examples
///
/// ```
/// use png_tax_engine::calculation::apply_dependant_reduction;
/// use png_tax_engine::config::ConfigLoader;
/// use png_tax_engine::models::TaxClass;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded().unwrap();
/// let result = apply_dependant_reduction(
///     Decimal::new(1000, 0),
///     TaxClass::ResidentDeclared,
///     1,
///     config.schedule(),
///     5,
/// );
/// assert_eq!(result.reduction, Decimal::new(1731, 2));
/// ```
pub fn apply_dependant_reduction(
    total_before_reduction: Decimal,
    class: TaxClass,
    dependants: u8,
    schedule: &TaxSchedule,
    step_number: u32,
) -> DependantReductionResult {
    let rule = if class == TaxClass::ResidentDeclared && dependants > 0 {
        let count = dependants.min(crate::models::MAX_DEPENDANTS);
        schedule.dependant_reduction(count)
    } else {
        None
    };

    let (reduction, reasoning) = match rule {
        Some(rule) => {
            let uncapped = total_before_reduction * rule.rate;
            let reduction = uncapped.min(rule.cap);
            let reasoning = format!(
                "{} dependant(s): min(K{} x {}, K{}) = K{}",
                dependants,
                total_before_reduction.normalize(),
                rule.rate.normalize(),
                rule.cap.normalize(),
                reduction.normalize()
            );
            (reduction, reasoning)
        }
        None if class != TaxClass::ResidentDeclared => (
            Decimal::ZERO,
            format!(
                "No dependant reduction - {} taxpayers are not eligible",
                class.description().to_lowercase()
            ),
        ),
        None => (
            Decimal::ZERO,
            "No dependant reduction - no dependants claimed".to_string(),
        ),
    };

    let final_tax = (total_before_reduction - reduction).max(Decimal::ZERO);

    let audit_step = AuditStep {
        step_number,
        rule_id: "dependant_reduction".to_string(),
        rule_name: "Dependant Reduction".to_string(),
        statute_ref: "Dependant rebate".to_string(),
        input: serde_json::json!({
            "total_before_reduction": total_before_reduction.to_string(),
            "tax_class": class.as_str(),
            "dependants": dependants
        }),
        output: serde_json::json!({
            "reduction": reduction.to_string(),
            "final_tax": final_tax.to_string(),
            "reduction_applied": rule.is_some()
        }),
        reasoning,
    };

    DependantReductionResult {
        reduction,
        final_tax,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reduce(total: &str, class: TaxClass, dependants: u8) -> DependantReductionResult {
        let config = ConfigLoader::embedded().unwrap();
        apply_dependant_reduction(dec(total), class, dependants, config.schedule(), 5)
    }

    #[test]
    fn test_no_dependants_no_reduction() {
        let result = reduce("69.231", TaxClass::ResidentDeclared, 0);
        assert_eq!(result.reduction, Decimal::ZERO);
        assert_eq!(result.final_tax, dec("69.231"));
        assert!(result.audit_step.reasoning.contains("no dependants"));
    }

    #[test]
    fn test_one_dependant_below_cap() {
        let result = reduce("69.231", TaxClass::ResidentDeclared, 1);
        assert_eq!(result.reduction, dec("6.9231"));
        assert_eq!(result.final_tax, dec("62.3079"));
    }

    #[test]
    fn test_two_dependants_below_cap() {
        let result = reduce("69.231", TaxClass::ResidentDeclared, 2);
        assert_eq!(result.reduction, dec("10.38465"));
    }

    #[test]
    fn test_three_dependants_below_cap() {
        let result = reduce("69.231", TaxClass::ResidentDeclared, 3);
        assert_eq!(result.reduction, dec("24.23085"));
    }

    #[test]
    fn test_caps_enforced_for_large_tax() {
        assert_eq!(
            reduce("1000", TaxClass::ResidentDeclared, 1).reduction,
            dec("17.31")
        );
        assert_eq!(
            reduce("1000", TaxClass::ResidentDeclared, 2).reduction,
            dec("28.85")
        );
        assert_eq!(
            reduce("1000", TaxClass::ResidentDeclared, 3).reduction,
            dec("40.38")
        );
    }

    #[test]
    fn test_more_than_three_dependants_uses_top_rule() {
        let result = reduce("1000", TaxClass::ResidentDeclared, 5);
        assert_eq!(result.reduction, dec("40.38"));
    }

    #[test]
    fn test_undeclared_resident_not_eligible() {
        let result = reduce("420.7434", TaxClass::ResidentUndeclared, 3);
        assert_eq!(result.reduction, Decimal::ZERO);
        assert_eq!(result.final_tax, dec("420.7434"));
        assert!(result.audit_step.reasoning.contains("not eligible"));
    }

    #[test]
    fn test_non_resident_not_eligible() {
        let result = reduce("154", TaxClass::NonResident, 2);
        assert_eq!(result.reduction, Decimal::ZERO);
        assert_eq!(
            result.audit_step.output["reduction_applied"].as_bool().unwrap(),
            false
        );
    }

    #[test]
    fn test_zero_tax_stays_zero() {
        let result = reduce("0", TaxClass::ResidentDeclared, 3);
        assert_eq!(result.reduction, Decimal::ZERO);
        assert_eq!(result.final_tax, Decimal::ZERO);
    }

    #[test]
    fn test_audit_reasoning_shows_cap() {
        let result = reduce("1000", TaxClass::ResidentDeclared, 1);
        assert_eq!(result.audit_step.rule_id, "dependant_reduction");
        assert_eq!(
            result.audit_step.reasoning,
            "1 dependant(s): min(K1000 x 0.1, K17.31) = K17.31"
        );
    }
}
