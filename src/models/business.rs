//! Business tax models.
//!
//! Inputs and outputs of the revenue/expenses based business tax calculator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The legal form of a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    /// A single owner trading in their own name.
    SoleProprietor,
    /// Two or more owners trading together.
    Partnership,
    /// An incorporated company, taxed at the flat corporate rate.
    Company,
    /// A small-to-medium enterprise eligible for the SME reduction.
    Sme,
}

/// Input to a business tax calculation (annual figures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTaxInput {
    /// The legal form of the business.
    pub business_type: BusinessType,
    /// Gross annual revenue.
    pub annual_revenue: Decimal,
    /// Deductible annual expenses.
    pub expenses: Decimal,
    /// Whether the business is registered for GST.
    #[serde(default)]
    pub has_gst_registration: bool,
    /// Industry, informational only.
    #[serde(default)]
    pub industry: Option<String>,
    /// Whether any income was earned abroad.
    #[serde(default)]
    pub has_foreign_income: bool,
    /// Whether that foreign income is documented.
    #[serde(default)]
    pub foreign_income_documented: bool,
    /// Documents the return must include. Empty means none are required.
    #[serde(default)]
    pub required_documents: Vec<String>,
    /// Documents supplied with the return.
    #[serde(default)]
    pub provided_documents: Vec<String>,
    /// Last day the return may be filed, inclusive.
    #[serde(default)]
    pub filing_deadline: Option<NaiveDate>,
}

impl BusinessTaxInput {
    /// An unregistered business with no industry, no foreign income, no
    /// document requirements and no filing deadline.
    pub fn new(business_type: BusinessType, annual_revenue: Decimal, expenses: Decimal) -> Self {
        Self {
            business_type,
            annual_revenue,
            expenses,
            has_gst_registration: false,
            industry: None,
            has_foreign_income: false,
            foreign_income_documented: false,
            required_documents: vec![],
            provided_documents: vec![],
            filing_deadline: None,
        }
    }
}

/// The result of a business tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTaxResult {
    /// Revenue less expenses, never below zero.
    pub taxable_income: Decimal,
    /// Income tax on the taxable income.
    pub income_tax: Decimal,
    /// GST on revenue, zero when not registered.
    pub gst_payable: Decimal,
    /// `income_tax + gst_payable`.
    pub total_tax_liability: Decimal,
    /// Total liability over revenue.
    pub effective_tax_rate: Decimal,
}

/// Severity of a business data validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    /// Blocks the calculation.
    Error,
    /// Needs the filer's attention but does not block.
    Warning,
}

/// The outcome of one validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Rule identifier, e.g. `expense_validity`.
    pub id: String,
    /// Human-readable rule name.
    pub name: String,
    /// Whether the data satisfied the rule.
    pub valid: bool,
    /// Message to show when the rule failed; empty when it passed.
    pub error_message: String,
    /// How serious a failure is.
    pub severity: RuleSeverity,
}
