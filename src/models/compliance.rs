//! Business compliance models.
//!
//! Facts about a business's filings and registrations, and the report that
//! checks them against the PNG regulatory requirements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BusinessType;

/// The area of regulation a requirement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceCategory {
    /// Tax registration, GST and withholding.
    Tax,
    /// General business obligations.
    Business,
    /// Returns and disclosures to regulators.
    Reporting,
    /// Obligations specific to one industry.
    Industry,
}

/// Facts about a business used by the compliance check.
///
/// Flags that are absent default to `false`, i.e. the obligation is treated
/// as not met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceData {
    /// The legal form of the business.
    pub business_type: BusinessType,
    /// Gross annual revenue.
    pub annual_revenue: Decimal,
    /// Whether the business is registered for GST.
    #[serde(default)]
    pub has_gst_registration: bool,
    /// Whether this year's annual return was filed.
    #[serde(default)]
    pub annual_return_filed: bool,
    /// IRC tax registration number, if any.
    #[serde(default)]
    pub tax_registration_number: Option<String>,
    /// Whether the business employs staff.
    #[serde(default)]
    pub has_employees: bool,
    /// Whether salary and wages tax withheld from staff was remitted.
    #[serde(default)]
    pub employee_taxes_remitted: bool,
    /// Whether the business operates outside PNG.
    #[serde(default)]
    pub has_foreign_operations: bool,
    /// Whether those foreign operations were reported.
    #[serde(default)]
    pub foreign_operations_reported: bool,
    /// Industry, e.g. `mining`.
    #[serde(default)]
    pub industry: Option<String>,
    /// Whether the special mining levies were paid.
    #[serde(default)]
    pub mining_levy_paid: bool,
}

impl ComplianceData {
    /// A business with the given type and revenue that has met none of its
    /// obligations yet.
    pub fn new(business_type: BusinessType, annual_revenue: Decimal) -> Self {
        Self {
            business_type,
            annual_revenue,
            has_gst_registration: false,
            annual_return_filed: false,
            tax_registration_number: None,
            has_employees: false,
            employee_taxes_remitted: false,
            has_foreign_operations: false,
            foreign_operations_reported: false,
            industry: None,
            mining_levy_paid: false,
        }
    }
}

/// The outcome of one requirement for one business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementOutcome {
    /// Requirement identifier, e.g. `annual_return`.
    pub id: String,
    /// Human-readable requirement name.
    pub name: String,
    /// What the requirement asks of the business.
    pub description: String,
    /// Area of regulation.
    pub category: ComplianceCategory,
    /// The law or regulation that imposes it.
    pub regulation_reference: String,
    /// What non-compliance can cost.
    pub penalty_description: String,
    /// Whether the business meets it.
    pub compliant: bool,
    /// What to do about it; only present when not compliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Compliance of one business against every requirement that applies to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The business type the requirements were filtered by.
    pub business_type: BusinessType,
    /// True when every applicable requirement is met.
    pub compliant: bool,
    /// One entry per applicable requirement, in table order.
    pub requirements: Vec<RequirementOutcome>,
}

impl ComplianceReport {
    /// The requirements the business does not meet.
    pub fn failures(&self) -> impl Iterator<Item = &RequirementOutcome> {
        self.requirements.iter().filter(|r| !r.compliant)
    }
}
