//! Business tax calculation.
//!
//! A simpler, annual calculator for businesses: companies pay the flat
//! corporate rate, every other business type pays progressive rates on
//! profit. SMEs below the SME threshold get a 25% reduction, and GST is
//! added on revenue when the business is registered.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BusinessTaxInput, BusinessTaxResult, BusinessType, MAX_AMOUNT, RuleSeverity,
    ValidationOutcome,
};

/// The flat income tax rate for companies.
pub const CORPORATE_TAX_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// The GST rate on revenue.
pub const GST_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Revenue at or above which GST registration is expected.
pub const GST_REGISTRATION_THRESHOLD: Decimal = Decimal::from_parts(250_000, 0, 0, false, 0);

/// Taxable income below which an SME gets its reduction.
pub const SME_THRESHOLD: Decimal = Decimal::from_parts(250_000, 0, 0, false, 0);

/// The share of tax an eligible SME keeps paying.
const SME_TAX_FACTOR: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Progressive brackets as `(lower threshold, rate)`, ascending.
const PROGRESSIVE_BRACKETS: [(Decimal, Decimal); 5] = [
    (Decimal::ZERO, Decimal::ZERO),
    (
        Decimal::from_parts(12_500, 0, 0, false, 0),
        Decimal::from_parts(22, 0, 0, false, 2),
    ),
    (
        Decimal::from_parts(33_000, 0, 0, false, 0),
        Decimal::from_parts(30, 0, 0, false, 2),
    ),
    (
        Decimal::from_parts(70_000, 0, 0, false, 0),
        Decimal::from_parts(35, 0, 0, false, 2),
    ),
    (
        Decimal::from_parts(250_000, 0, 0, false, 0),
        Decimal::from_parts(40, 0, 0, false, 2),
    ),
];

/// Computes the annual tax of a business.
///
/// # Errors
///
/// Returns `InvalidInput` if revenue or expenses are negative or above
/// [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use png_tax_engine::calculation::compute_business_tax;
/// use png_tax_engine::models::{BusinessTaxInput, BusinessType};
/// use rust_decimal::Decimal;
///
/// let input = BusinessTaxInput::new(
///     BusinessType::Company,
///     Decimal::new(500_000, 0),
///     Decimal::new(200_000, 0),
/// );
///
/// let result = compute_business_tax(&input).unwrap();
/// assert_eq!(result.income_tax, Decimal::new(90_000, 0));
/// ```
pub fn compute_business_tax(input: &BusinessTaxInput) -> EngineResult<BusinessTaxResult> {
    check_amount("annual_revenue", input.annual_revenue)?;
    check_amount("expenses", input.expenses)?;

    let taxable_income = (input.annual_revenue - input.expenses).max(Decimal::ZERO);

    let income_tax = match input.business_type {
        BusinessType::Company => taxable_income * CORPORATE_TAX_RATE,
        BusinessType::Sme if taxable_income < SME_THRESHOLD => {
            progressive_tax(taxable_income) * SME_TAX_FACTOR
        }
        _ => progressive_tax(taxable_income),
    };

    let gst_payable = if input.has_gst_registration {
        input.annual_revenue * GST_RATE
    } else {
        Decimal::ZERO
    };

    let total_tax_liability = income_tax + gst_payable;
    let effective_tax_rate = if input.annual_revenue.is_zero() {
        Decimal::ZERO
    } else {
        total_tax_liability / input.annual_revenue
    };

    debug!(
        business_type = ?input.business_type,
        taxable_income = %taxable_income,
        income_tax = %income_tax,
        gst_payable = %gst_payable,
        "Business tax computed"
    );

    Ok(BusinessTaxResult {
        taxable_income,
        income_tax,
        gst_payable,
        total_tax_liability,
        effective_tax_rate,
    })
}

fn check_amount(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", amount),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(EngineError::invalid_input(
            field,
            format!("too large, must not exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(())
}

/// Tax on `income` under the progressive brackets.
fn progressive_tax(income: Decimal) -> Decimal {
    PROGRESSIVE_BRACKETS
        .iter()
        .enumerate()
        .map(|(i, (lower, rate))| {
            let upper = PROGRESSIVE_BRACKETS.get(i + 1).map(|(next, _)| *next);
            let top = upper.map_or(income, |u| income.min(u));
            (top - *lower).max(Decimal::ZERO) * *rate
        })
        .sum()
}

/// Checks business data against the filing rules as of today (UTC).
///
/// Every rule is reported, whether it passed or not.
pub fn validate_business_data(input: &BusinessTaxInput) -> Vec<ValidationOutcome> {
    validate_business_data_on(input, Utc::now().date_naive())
}

/// Checks business data against the filing rules as of `today`.
///
/// The filing deadline is inclusive: filing on the deadline itself passes.
pub fn validate_business_data_on(
    input: &BusinessTaxInput,
    today: NaiveDate,
) -> Vec<ValidationOutcome> {
    let revenue_ok = input.annual_revenue >= Decimal::ZERO;
    let expenses_ok = input.expenses >= Decimal::ZERO && input.expenses <= input.annual_revenue;
    let gst_ok =
        input.annual_revenue < GST_REGISTRATION_THRESHOLD || input.has_gst_registration;
    let foreign_income_ok = !input.has_foreign_income || input.foreign_income_documented;
    let documents_ok = input
        .required_documents
        .iter()
        .all(|doc| input.provided_documents.contains(doc));
    let deadline_ok = input.filing_deadline.is_none_or(|deadline| today <= deadline);

    vec![
        outcome(
            "revenue_threshold",
            "Revenue Reporting Accuracy",
            revenue_ok,
            "Annual revenue must be a valid positive number",
            RuleSeverity::Error,
        ),
        outcome(
            "expense_validity",
            "Expense Validity",
            expenses_ok,
            "Expenses cannot exceed annual revenue",
            RuleSeverity::Error,
        ),
        outcome(
            "gst_registration",
            "GST Registration Requirement",
            gst_ok,
            "Your business appears to require GST registration",
            RuleSeverity::Warning,
        ),
        outcome(
            "foreign_income",
            "Foreign Income Declaration",
            foreign_income_ok,
            "Foreign income must be fully documented",
            RuleSeverity::Error,
        ),
        outcome(
            "document_completeness",
            "Document Completeness",
            documents_ok,
            "Missing required tax documents",
            RuleSeverity::Error,
        ),
        outcome(
            "filing_deadline",
            "Filing Deadline Compliance",
            deadline_ok,
            "Filing deadline has passed",
            RuleSeverity::Error,
        ),
    ]
}

/// True when every error-severity rule passes. Warnings do not count.
pub fn is_business_data_valid(input: &BusinessTaxInput) -> bool {
    all_errors_pass(&validate_business_data(input))
}

fn all_errors_pass(outcomes: &[ValidationOutcome]) -> bool {
    outcomes
        .iter()
        .filter(|o| o.severity == RuleSeverity::Error)
        .all(|o| o.valid)
}

fn outcome(
    id: &str,
    name: &str,
    valid: bool,
    error_message: &str,
    severity: RuleSeverity,
) -> ValidationOutcome {
    ValidationOutcome {
        id: id.to_string(),
        name: name.to_string(),
        valid,
        error_message: if valid {
            String::new()
        } else {
            error_message.to_string()
        },
        severity,
    }
}
