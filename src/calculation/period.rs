//! Pay period conversion.
//!
//! The statutory tables are defined per fortnight; annual figures are
//! fortnightly figures times 26.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Number of fortnightly pay periods in a year.
pub const FORTNIGHTS_PER_YEAR: u32 = 26;

/// Returns [`FORTNIGHTS_PER_YEAR`] as a decimal.
pub fn fortnights_per_year() -> Decimal {
    Decimal::from(FORTNIGHTS_PER_YEAR)
}

/// Expresses `income` per fortnight.
///
/// # Examples
///
/// ```
/// use png_tax_engine::calculation::to_fortnightly;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_fortnightly(Decimal::new(52000, 0), false), Decimal::new(2000, 0));
/// assert_eq!(to_fortnightly(Decimal::new(2000, 0), true), Decimal::new(2000, 0));
/// ```
pub fn to_fortnightly(income: Decimal, is_fortnightly: bool) -> Decimal {
    if is_fortnightly {
        income
    } else {
        income / fortnights_per_year()
    }
}

/// Expresses `income` per year.
pub fn to_annual(income: Decimal, is_fortnightly: bool) -> Decimal {
    if is_fortnightly {
        income * fortnights_per_year()
    } else {
        income
    }
}

/// The result of normalising an income figure to both periods.
#[derive(Debug, Clone)]
pub struct PeriodConversionResult {
    /// Income per fortnight.
    pub fortnightly: Decimal,
    /// Income per year.
    pub annual: Decimal,
    /// The audit step recording this conversion.
    pub audit_step: AuditStep,
}

/// Normalises gross income to fortnightly and annual figures.
pub fn normalize_income(
    income: Decimal,
    is_fortnightly: bool,
    step_number: u32,
) -> PeriodConversionResult {
    let fortnightly = to_fortnightly(income, is_fortnightly);
    let annual = to_annual(income, is_fortnightly);
    let period = if is_fortnightly { "fortnightly" } else { "annual" };

    let reasoning = if is_fortnightly {
        format!(
            "Fortnightly income K{} x {} = K{} per year",
            income.normalize(),
            FORTNIGHTS_PER_YEAR,
            annual.normalize()
        )
    } else {
        format!(
            "Annual income K{} / {} = K{} per fortnight",
            income.normalize(),
            FORTNIGHTS_PER_YEAR,
            fortnightly.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "period_conversion".to_string(),
        rule_name: "Period Conversion".to_string(),
        statute_ref: "Fortnightly tables".to_string(),
        input: serde_json::json!({
            "income": income.to_string(),
            "period": period
        }),
        output: serde_json::json!({
            "fortnightly": fortnightly.to_string(),
            "annual": annual.to_string()
        }),
        reasoning,
    };

    PeriodConversionResult {
        fortnightly,
        annual,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fortnightly_income_is_unchanged() {
        assert_eq!(to_fortnightly(dec("1000"), true), dec("1000"));
    }

    #[test]
    fn test_annual_income_divided_by_26() {
        assert_eq!(to_fortnightly(dec("52000"), false), dec("2000"));
    }

    #[test]
    fn test_fortnightly_income_annualised() {
        assert_eq!(to_annual(dec("2000"), true), dec("52000"));
    }

    #[test]
    fn test_annual_income_is_unchanged() {
        assert_eq!(to_annual(dec("52000"), false), dec("52000"));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let tolerance = dec("0.000001");
        for s in ["0", "1", "769.23", "1234.567", "99999.99"] {
            let x = dec(s);
            let back = to_fortnightly(to_annual(x, true), false);
            assert!((back - x).abs() <= tolerance, "round trip of {} gave {}", x, back);

            let back = to_annual(to_fortnightly(x, false), true);
            assert!((back - x).abs() <= tolerance, "round trip of {} gave {}", x, back);
        }
    }

    #[test]
    fn test_normalize_income_audit_step() {
        let result = normalize_income(dec("52000"), false, 1);

        assert_eq!(result.fortnightly, dec("2000"));
        assert_eq!(result.annual, dec("52000"));
        assert_eq!(result.audit_step.rule_id, "period_conversion");
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.input["period"].as_str().unwrap(), "annual");
        assert!(result.audit_step.reasoning.contains("K52000 / 26 = K2000"));
    }

    #[test]
    fn test_fortnights_per_year_is_26() {
        assert_eq!(fortnights_per_year(), dec("26"));
    }
}
