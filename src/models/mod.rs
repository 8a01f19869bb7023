//! Core data models for the PNG tax engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod business;
mod compliance;
mod extracted;
mod tax_result;
mod taxpayer;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use business::{
    BusinessTaxInput, BusinessTaxResult, BusinessType, RuleSeverity, ValidationOutcome,
};
pub use compliance::{ComplianceCategory, ComplianceData, ComplianceReport, RequirementOutcome};
pub use extracted::{ExtractedDeduction, ExtractedTaxData};
pub use tax_result::{DeductionSummary, PeriodAmount, TaxBreakdown, TaxResult};
pub use taxpayer::{Band, MAX_AMOUNT, MAX_DEPENDANTS, OtherDeduction, TaxClass, TaxpayerProfile};
