//! Business compliance checks.
//!
//! A fixed table of PNG regulatory requirements. Each requirement names the
//! business types it applies to, the regulation behind it, the penalty for
//! breaching it and what to do about a breach.

use tracing::debug;

use crate::models::{
    BusinessType, ComplianceCategory, ComplianceData, ComplianceReport, RequirementOutcome,
};

use super::GST_REGISTRATION_THRESHOLD;

/// One regulatory requirement.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceRequirement {
    /// Stable identifier.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// What the requirement asks of the business.
    pub description: &'static str,
    /// Area of regulation.
    pub category: ComplianceCategory,
    /// The business types the requirement applies to.
    pub business_types: &'static [BusinessType],
    /// The law or regulation that imposes it.
    pub regulation_reference: &'static str,
    /// What non-compliance can cost.
    pub penalty_description: &'static str,
    /// The specific action recommended on a breach.
    pub remedy: &'static str,
    check: fn(&ComplianceData) -> bool,
}

impl ComplianceRequirement {
    /// Whether the requirement applies to `business_type`.
    pub fn applies_to(&self, business_type: BusinessType) -> bool {
        self.business_types.contains(&business_type)
    }

    /// Whether `data` meets the requirement.
    pub fn is_met(&self, data: &ComplianceData) -> bool {
        (self.check)(data)
    }

    /// The full recommendation shown for a breach.
    pub fn recommendation(&self) -> String {
        format!("Ensure compliance with {}. {}", self.name, self.remedy)
    }
}

const ALL_TYPES: &[BusinessType] = &[
    BusinessType::SoleProprietor,
    BusinessType::Partnership,
    BusinessType::Company,
    BusinessType::Sme,
];

/// The PNG requirements, in reporting order.
pub static COMPLIANCE_REQUIREMENTS: [ComplianceRequirement; 6] = [
    ComplianceRequirement {
        id: "annual_return",
        name: "Annual Return Filing",
        description: "All registered businesses must file annual returns",
        category: ComplianceCategory::Reporting,
        business_types: ALL_TYPES,
        regulation_reference: "PNG Companies Act 1997, Section 215",
        penalty_description: "Penalty of up to 10,000 PGK for non-compliance",
        remedy: "File your annual return immediately to avoid penalties.",
        check: annual_return_filed,
    },
    ComplianceRequirement {
        id: "tax_registration",
        name: "Tax Registration",
        description: "Business must be registered with IRC for tax purposes",
        category: ComplianceCategory::Tax,
        business_types: ALL_TYPES,
        regulation_reference: "PNG Income Tax Act",
        penalty_description: "Penalties and interest on unpaid taxes",
        remedy: "Register your business with IRC as soon as possible.",
        check: tax_registered,
    },
    ComplianceRequirement {
        id: "gst_compliance",
        name: "GST Compliance",
        description: "Businesses with revenue over 250,000 PGK must register for GST",
        category: ComplianceCategory::Tax,
        business_types: ALL_TYPES,
        regulation_reference: "PNG Goods and Services Tax Act 2003",
        penalty_description: "Penalties of up to 100% of unpaid GST",
        remedy: "Apply for GST registration as your revenue exceeds the threshold.",
        check: gst_registered_if_required,
    },
    ComplianceRequirement {
        id: "employee_taxes",
        name: "Employee Tax Compliance",
        description: "Withholding and remitting correct employee taxes",
        category: ComplianceCategory::Tax,
        business_types: ALL_TYPES,
        regulation_reference: "PNG Income Tax Act, Employment Regulations",
        penalty_description: "Penalties and criminal charges for non-compliance",
        remedy: "Set up proper employee tax withholding and remittance procedures.",
        check: employee_taxes_remitted,
    },
    ComplianceRequirement {
        id: "foreign_operations",
        name: "Foreign Operations Reporting",
        description: "Reporting of foreign business activities and income",
        category: ComplianceCategory::Reporting,
        business_types: &[BusinessType::Company, BusinessType::Sme],
        regulation_reference: "PNG Foreign Exchange Control Act",
        penalty_description: "Penalties and restrictions on foreign exchange",
        remedy: "Report all foreign business activities to comply with regulations.",
        check: foreign_operations_reported,
    },
    ComplianceRequirement {
        id: "mining_levy",
        name: "Mining Operations Special Levy",
        description: "Special tax requirements for mining operations",
        category: ComplianceCategory::Industry,
        business_types: &[BusinessType::Company],
        regulation_reference: "PNG Mining Act and Special Mining Levies",
        penalty_description: "Potential loss of mining license and financial penalties",
        remedy: "Ensure all special mining levies are calculated and paid correctly.",
        check: mining_levy_paid,
    },
];

fn annual_return_filed(data: &ComplianceData) -> bool {
    data.annual_return_filed
}

fn tax_registered(data: &ComplianceData) -> bool {
    data.tax_registration_number
        .as_deref()
        .is_some_and(|number| !number.trim().is_empty())
}

fn gst_registered_if_required(data: &ComplianceData) -> bool {
    data.annual_revenue < GST_REGISTRATION_THRESHOLD || data.has_gst_registration
}

fn employee_taxes_remitted(data: &ComplianceData) -> bool {
    !data.has_employees || data.employee_taxes_remitted
}

fn foreign_operations_reported(data: &ComplianceData) -> bool {
    !data.has_foreign_operations || data.foreign_operations_reported
}

fn mining_levy_paid(data: &ComplianceData) -> bool {
    let is_mining = data
        .industry
        .as_deref()
        .is_some_and(|industry| industry.trim().eq_ignore_ascii_case("mining"));
    !is_mining || data.mining_levy_paid
}

/// The requirements that apply to `business_type`, in table order.
pub fn applicable_requirements(
    business_type: BusinessType,
) -> impl Iterator<Item = &'static ComplianceRequirement> {
    COMPLIANCE_REQUIREMENTS
        .iter()
        .filter(move |r| r.applies_to(business_type))
}

/// Checks a business against every requirement that applies to it.
///
/// Returns each applicable requirement with whether it is met, in table
/// order, without recommendations.
pub fn check_business_compliance(
    data: &ComplianceData,
) -> Vec<(&'static ComplianceRequirement, bool)> {
    applicable_requirements(data.business_type)
        .map(|requirement| (requirement, requirement.is_met(data)))
        .collect()
}

/// Builds the compliance report, with a recommendation for every breach.
///
/// # Examples
///
/// ```
/// use png_tax_engine::calculation::generate_compliance_report;
/// use png_tax_engine::models::{BusinessType, ComplianceData};
/// use rust_decimal::Decimal;
///
/// let mut data = ComplianceData::new(BusinessType::SoleProprietor, Decimal::new(80_000, 0));
/// data.annual_return_filed = true;
/// data.tax_registration_number = Some("501234567".to_string());
///
/// let report = generate_compliance_report(&data);
/// assert!(report.compliant);
/// assert_eq!(report.requirements.len(), 4);
/// ```
pub fn generate_compliance_report(data: &ComplianceData) -> ComplianceReport {
    let requirements: Vec<RequirementOutcome> = check_business_compliance(data)
        .into_iter()
        .map(|(requirement, compliant)| RequirementOutcome {
            id: requirement.id.to_string(),
            name: requirement.name.to_string(),
            description: requirement.description.to_string(),
            category: requirement.category,
            regulation_reference: requirement.regulation_reference.to_string(),
            penalty_description: requirement.penalty_description.to_string(),
            compliant,
            recommendation: (!compliant).then(|| requirement.recommendation()),
        })
        .collect();
    let compliant = requirements.iter().all(|r| r.compliant);

    debug!(
        business_type = ?data.business_type,
        checked = requirements.len(),
        compliant,
        "Compliance checked"
    );

    ComplianceReport {
        business_type: data.business_type,
        compliant,
        requirements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// A business that meets every obligation that could apply to it.
    fn compliant_data(business_type: BusinessType) -> ComplianceData {
        let mut data = ComplianceData::new(business_type, dec("100000"));
        data.annual_return_filed = true;
        data.tax_registration_number = Some("501234567".to_string());
        data
    }

    fn ids(report: &ComplianceReport) -> Vec<&str> {
        report.requirements.iter().map(|r| r.id.as_str()).collect()
    }

    fn outcome<'a>(report: &'a ComplianceReport, id: &str) -> &'a RequirementOutcome {
        report.requirements.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn test_requirement_ids_are_unique() {
        let mut ids: Vec<&str> = COMPLIANCE_REQUIREMENTS.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), COMPLIANCE_REQUIREMENTS.len());
    }

    #[test]
    fn test_requirements_filtered_by_business_type() {
        let report = generate_compliance_report(&compliant_data(BusinessType::Company));
        assert_eq!(
            ids(&report),
            vec![
                "annual_return",
                "tax_registration",
                "gst_compliance",
                "employee_taxes",
                "foreign_operations",
                "mining_levy",
            ]
        );

        let report = generate_compliance_report(&compliant_data(BusinessType::Sme));
        assert_eq!(report.requirements.len(), 5);
        assert!(!ids(&report).contains(&"mining_levy"));

        for business_type in [BusinessType::SoleProprietor, BusinessType::Partnership] {
            let report = generate_compliance_report(&compliant_data(business_type));
            assert_eq!(
                ids(&report),
                vec!["annual_return", "tax_registration", "gst_compliance", "employee_taxes"]
            );
        }
    }

    #[test]
    fn test_compliant_business_has_no_recommendations() {
        let report = generate_compliance_report(&compliant_data(BusinessType::Company));

        assert!(report.compliant);
        assert_eq!(report.failures().count(), 0);
        assert!(report.requirements.iter().all(|r| r.recommendation.is_none()));
    }

    #[test]
    fn test_unfiled_annual_return() {
        let mut data = compliant_data(BusinessType::Partnership);
        data.annual_return_filed = false;
        let report = generate_compliance_report(&data);

        assert!(!report.compliant);
        let annual_return = outcome(&report, "annual_return");
        assert!(!annual_return.compliant);
        assert_eq!(annual_return.category, ComplianceCategory::Reporting);
        assert_eq!(
            annual_return.regulation_reference,
            "PNG Companies Act 1997, Section 215"
        );
        assert_eq!(
            annual_return.recommendation.as_deref(),
            Some(
                "Ensure compliance with Annual Return Filing. \
                 File your annual return immediately to avoid penalties."
            )
        );
    }

    #[test]
    fn test_blank_registration_number_is_unregistered() {
        let mut data = compliant_data(BusinessType::SoleProprietor);
        data.tax_registration_number = Some("  ".to_string());
        assert!(!outcome(&generate_compliance_report(&data), "tax_registration").compliant);

        data.tax_registration_number = None;
        assert!(!outcome(&generate_compliance_report(&data), "tax_registration").compliant);
    }

    #[test]
    fn test_gst_required_at_threshold() {
        let mut data = compliant_data(BusinessType::Sme);
        data.annual_revenue = dec("249999.99");
        assert!(outcome(&generate_compliance_report(&data), "gst_compliance").compliant);

        data.annual_revenue = dec("250000");
        let report = generate_compliance_report(&data);
        let gst = outcome(&report, "gst_compliance");
        assert!(!gst.compliant);
        assert_eq!(gst.penalty_description, "Penalties of up to 100% of unpaid GST");

        data.has_gst_registration = true;
        assert!(generate_compliance_report(&data).compliant);
    }

    #[test]
    fn test_employee_taxes_only_matter_with_employees() {
        let mut data = compliant_data(BusinessType::Company);
        data.has_employees = true;
        assert!(!outcome(&generate_compliance_report(&data), "employee_taxes").compliant);

        data.employee_taxes_remitted = true;
        assert!(generate_compliance_report(&data).compliant);
    }

    #[test]
    fn test_foreign_operations_ignored_for_partnerships() {
        let mut data = compliant_data(BusinessType::Partnership);
        data.has_foreign_operations = true;
        assert!(generate_compliance_report(&data).compliant);

        data.business_type = BusinessType::Sme;
        let report = generate_compliance_report(&data);
        assert!(!report.compliant);
        assert!(!outcome(&report, "foreign_operations").compliant);
    }

    #[test]
    fn test_mining_levy_applies_to_mining_companies() {
        let mut data = compliant_data(BusinessType::Company);
        data.industry = Some("Mining".to_string());
        let report = generate_compliance_report(&data);
        let levy = outcome(&report, "mining_levy");
        assert!(!levy.compliant);
        assert_eq!(levy.category, ComplianceCategory::Industry);

        data.mining_levy_paid = true;
        assert!(generate_compliance_report(&data).compliant);

        data.mining_levy_paid = false;
        data.industry = Some("agriculture".to_string());
        assert!(generate_compliance_report(&data).compliant);
    }

    #[test]
    fn test_check_reports_every_applicable_requirement() {
        let data = ComplianceData::new(BusinessType::SoleProprietor, dec("1000"));
        let checks = check_business_compliance(&data);

        let met: Vec<(&str, bool)> = checks.iter().map(|(r, met)| (r.id, *met)).collect();
        assert_eq!(
            met,
            vec![
                ("annual_return", false),
                ("tax_registration", false),
                ("gst_compliance", true),
                ("employee_taxes", true),
            ]
        );
    }
}
