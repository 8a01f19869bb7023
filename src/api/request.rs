//! Request types for the tax engine API.
//!
//! This module defines the JSON request body of the `/income-tax` endpoint.
//! `/business-tax` takes a [`BusinessTaxInput`](crate::models::BusinessTaxInput)
//! and `/extracted-income-tax` an
//! [`ExtractedTaxData`](crate::models::ExtractedTaxData) as they are.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{OtherDeduction, TaxpayerProfile};

/// Request body for the `/income-tax` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxRequest {
    /// Salary income for the stated period.
    pub income: Decimal,
    /// Whether `income` is fortnightly; otherwise it is annual.
    #[serde(default = "default_true")]
    pub is_fortnightly: bool,
    /// Residency status.
    #[serde(default = "default_true")]
    pub is_resident: bool,
    /// Whether a salary or wages tax declaration has been lodged.
    #[serde(default = "default_true")]
    pub has_declaration_lodged: bool,
    /// Number of dependants claimed (0 to 3).
    #[serde(default)]
    pub dependants: u8,
    /// Whether the salary sacrifice arrangement applies.
    #[serde(default)]
    pub has_salary_sacrifice: bool,
    /// Whether a Nasfund contribution is made.
    #[serde(default, alias = "has_nasfund")]
    pub has_pension_contribution: bool,
    /// Itemized annual deductions.
    #[serde(default)]
    pub other_deductions: Vec<DeductionRequest>,
}

fn default_true() -> bool {
    true
}

/// An itemized deduction in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// Description of the deduction.
    pub name: String,
    /// Annual amount.
    pub amount: Decimal,
}

impl From<DeductionRequest> for OtherDeduction {
    fn from(req: DeductionRequest) -> Self {
        OtherDeduction {
            name: req.name,
            amount: req.amount,
        }
    }
}

impl From<IncomeTaxRequest> for TaxpayerProfile {
    fn from(req: IncomeTaxRequest) -> Self {
        TaxpayerProfile {
            income: req.income,
            is_fortnightly: req.is_fortnightly,
            is_resident: req.is_resident,
            has_declaration_lodged: req.has_declaration_lodged,
            dependants: req.dependants,
            has_salary_sacrifice: req.has_salary_sacrifice,
            has_pension_contribution: req.has_pension_contribution,
            other_deductions: req.other_deductions.into_iter().map(Into::into).collect(),
        }
    }
}
