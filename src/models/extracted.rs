//! Records produced by the document-extraction service.
//!
//! Extraction is best effort: any field may be missing and amounts arrive as
//! floating-point numbers. [`ExtractedTaxData::into_profile`] turns such a
//! record into an ordinary, validated [`TaxpayerProfile`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{OtherDeduction, TaxpayerProfile};

/// A deduction as read from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDeduction {
    /// Name printed on the document.
    pub name: String,
    /// Amount as extracted.
    pub amount: f64,
}

/// A partial taxpayer profile read from an uploaded document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTaxData {
    /// Salary income.
    pub income: Option<f64>,
    /// Whether the income figure is fortnightly. Defaults to annual.
    pub is_fortnightly: Option<bool>,
    /// Residency. Defaults to resident.
    pub is_resident: Option<bool>,
    /// Declaration status. Defaults to not lodged.
    pub has_declaration_lodged: Option<bool>,
    /// Dependant count. Defaults to none.
    pub dependants: Option<u8>,
    /// Salary sacrifice flag. Defaults to false.
    pub has_salary_sacrifice: Option<bool>,
    /// Pension contribution flag. Defaults to false.
    pub has_pension_contribution: Option<bool>,
    /// Itemized deductions found on the document.
    #[serde(default)]
    pub other_deductions: Vec<ExtractedDeduction>,
}

fn to_decimal(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::invalid_input(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Decimal::try_from(value)
        .map_err(|e| EngineError::invalid_input(field, format!("cannot be represented: {}", e)))
}

impl ExtractedTaxData {
    /// Converts the record into a validated profile.
    ///
    /// Missing flags fall back to the conservative reading: annual income,
    /// resident, no declaration lodged, no dependants and no deductions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when income is missing or not finite, or when
    /// the assembled profile fails [`TaxpayerProfile::validate`].
    pub fn into_profile(self) -> EngineResult<TaxpayerProfile> {
        let income = self
            .income
            .ok_or_else(|| EngineError::invalid_input("income", "was not extracted"))?;
        let income = to_decimal("income", income)?;

        let other_deductions = self
            .other_deductions
            .into_iter()
            .enumerate()
            .map(|(index, d)| {
                let amount = to_decimal(&format!("other_deductions[{}].amount", index), d.amount)?;
                Ok(OtherDeduction {
                    name: d.name,
                    amount,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let profile = TaxpayerProfile {
            income,
            is_fortnightly: self.is_fortnightly.unwrap_or(false),
            is_resident: self.is_resident.unwrap_or(true),
            has_declaration_lodged: self.has_declaration_lodged.unwrap_or(false),
            dependants: self.dependants.unwrap_or(0),
            has_salary_sacrifice: self.has_salary_sacrifice.unwrap_or(false),
            has_pension_contribution: self.has_pension_contribution.unwrap_or(false),
            other_deductions,
        };

        profile.validate()?;
        Ok(profile)
    }
}
