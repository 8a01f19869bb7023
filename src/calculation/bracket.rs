//! Bracket resolution.
//!
//! Selects the statutory band for a fortnightly taxable income and looks up
//! the formula of the taxpayer's column. The lookup is driven entirely by the
//! loaded [`TaxSchedule`]; no rates live in code.

use rust_decimal::Decimal;

use crate::config::{BandFormula, TaxSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Band, TaxClass};

/// The result of a bracket lookup.
#[derive(Debug, Clone)]
pub struct BracketResolution {
    /// The band the income falls in.
    pub band: Band,
    /// The column the formula was taken from.
    pub class: TaxClass,
    /// The formula of `band` for `class`.
    pub formula: BandFormula,
    /// Band label combined with the column description.
    pub label: String,
    /// The income used for the lookup, clamped at zero.
    pub taxable_income: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Finds the band of `fortnightly_taxable_income` and the formula for `class`.
///
/// Negative income is treated as zero. A band's upper bound belongs to it
/// only when the schedule marks it inclusive, so K769.23 resolves to Table A
/// while K1,269.23 resolves to the first step of Table C.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the schedule has no band or formula for
/// the income; a validated schedule always has one.
///
/// # Examples
///
/// ```
/// use png_tax_engine::calculation::resolve_bracket;
/// use png_tax_engine::config::ConfigLoader;
/// use png_tax_engine::models::{Band, TaxClass};
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded().unwrap();
/// let resolution = resolve_bracket(
///     Decimal::new(1000, 0),
///     TaxClass::ResidentDeclared,
///     config.schedule(),
///     3,
/// )
/// .unwrap();
/// assert_eq!(resolution.band, Band::B);
/// ```
pub fn resolve_bracket(
    fortnightly_taxable_income: Decimal,
    class: TaxClass,
    schedule: &TaxSchedule,
    step_number: u32,
) -> EngineResult<BracketResolution> {
    let taxable_income = fortnightly_taxable_income.max(Decimal::ZERO);

    let definition = schedule
        .bands()
        .iter()
        .find(|b| b.contains_upper(taxable_income))
        .ok_or_else(|| EngineError::InvalidConfiguration {
            message: format!("no band covers fortnightly income {}", taxable_income),
        })?;

    let formula = *schedule
        .formula(class, definition.band)
        .ok_or_else(|| EngineError::InvalidConfiguration {
            message: format!(
                "no formula for band {:?} in {}",
                definition.band,
                class.as_str()
            ),
        })?;

    let label = format!("{} - {}", definition.label, class.description());

    let audit_step = AuditStep {
        step_number,
        rule_id: "bracket_resolution".to_string(),
        rule_name: "Bracket Resolution".to_string(),
        statute_ref: definition.label.clone(),
        input: serde_json::json!({
            "fortnightly_taxable_income": fortnightly_taxable_income.to_string(),
            "tax_class": class.as_str()
        }),
        output: serde_json::json!({
            "band": definition.band,
            "base_tax": formula.base_tax.to_string(),
            "excess_threshold": formula.excess_threshold.to_string(),
            "marginal_rate": formula.marginal_rate.to_string()
        }),
        reasoning: format!(
            "Fortnightly taxable income K{} falls in {}",
            taxable_income.normalize(),
            label
        ),
    };

    Ok(BracketResolution {
        band: definition.band,
        class,
        formula,
        label,
        taxable_income,
        audit_step,
    })
}
