//! Response types for the tax engine API.
//!
//! This module defines the success envelopes returned by each endpoint and
//! the error response structures of the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{BandDefinition, DeductionRates, DependantReductionRule, ScheduleMetadata};
use crate::error::EngineError;
use crate::format::{format_kina, format_percentage};
use crate::models::{BusinessTaxResult, TaxResult, ValidationOutcome};

/// Envelope around every successful calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse<T> {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// Code of the schedule the result was computed under.
    pub schedule_code: String,
    /// The calculation output.
    pub result: T,
}

impl<T> CalculationResponse<T> {
    /// Wraps `result` with a fresh id and the current time.
    pub fn new(schedule_code: impl Into<String>, result: T) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            schedule_code: schedule_code.into(),
            result,
        }
    }
}

/// Income tax result with a formatted summary for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxReport {
    /// The full calculation result.
    #[serde(flatten)]
    pub tax: TaxResult,
    /// Display strings for the headline figures.
    pub summary: IncomeTaxSummary,
}

/// Headline figures formatted as Kina.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxSummary {
    /// Fortnightly tax, e.g. `K69.23`.
    pub fortnightly_tax: String,
    /// Annual tax.
    pub annual_tax: String,
    /// Fortnightly pay after tax and pension.
    pub fortnightly_net_pay: String,
    /// Annual pay after tax and pension.
    pub annual_net_pay: String,
    /// Effective tax rate, e.g. `6.92%`.
    pub effective_tax_rate: String,
    /// The audit trace as numbered lines.
    pub explanation: String,
}

impl From<TaxResult> for IncomeTaxReport {
    fn from(tax: TaxResult) -> Self {
        let summary = IncomeTaxSummary {
            fortnightly_tax: format_kina(tax.tax_payable.fortnightly),
            annual_tax: format_kina(tax.tax_payable.annual),
            fortnightly_net_pay: format_kina(tax.final_net_pay.fortnightly),
            annual_net_pay: format_kina(tax.final_net_pay.annual),
            effective_tax_rate: format_percentage(tax.effective_tax_rate),
            explanation: tax.audit_trace.explain(),
        };
        Self { tax, summary }
    }
}

/// Business tax result with the outcome of every filing rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessTaxReport {
    /// The calculation result.
    #[serde(flatten)]
    pub tax: BusinessTaxResult,
    /// Every validation rule, including passed ones and warnings.
    pub validation: Vec<ValidationOutcome>,
}

/// Body of `GET /schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// Schedule identification.
    #[serde(flatten)]
    pub metadata: ScheduleMetadata,
    /// Salary sacrifice and pension rates.
    pub deductions: DeductionRates,
    /// Income bands, lowest first.
    pub bands: Vec<BandDefinition>,
    /// Dependant reduction rules.
    pub dependant_reductions: Vec<DependantReductionRule>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = if error.is_configuration_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        };

        let error = match error {
            EngineError::InvalidInput { field, message } => ApiError::with_details(
                "INVALID_INPUT",
                format!("Invalid input field '{}': {}", field, message),
                "The request contains a value the engine cannot calculate with",
            ),
            EngineError::ConfigNotFound { path } => ApiError::with_details(
                "CONFIG_ERROR",
                "Configuration error",
                format!("Configuration file not found: {}", path),
            ),
            EngineError::ConfigParseError { path, message } => ApiError::with_details(
                "CONFIG_ERROR",
                "Configuration parse error",
                format!("Failed to parse {}: {}", path, message),
            ),
            EngineError::InvalidConfiguration { message } => {
                ApiError::with_details("CONFIG_ERROR", "Invalid tax schedule", message)
            }
        };

        ApiErrorResponse { status, error }
    }
}
