//! HTTP request handlers for the tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_business_tax, compute_income_tax, generate_compliance_report, validate_business_data,
};
use crate::models::{
    BusinessTaxInput, ComplianceData, ExtractedTaxData, RuleSeverity, TaxpayerProfile,
};

use super::request::IncomeTaxRequest;
use super::response::{
    ApiError, ApiErrorResponse, BusinessTaxReport, CalculationResponse, IncomeTaxReport,
    ScheduleResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/income-tax", post(income_tax_handler))
        .route("/extracted-income-tax", post(extracted_income_tax_handler))
        .route("/business-tax", post(business_tax_handler))
        .route("/compliance", post(compliance_handler))
        .route("/schedule", get(schedule_handler))
        .with_state(state)
}

/// Handler for POST /income-tax.
async fn income_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<IncomeTaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing income tax request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let profile: TaxpayerProfile = request.into();
    income_tax_response(&state, &profile, correlation_id)
}

/// Handler for POST /extracted-income-tax.
///
/// Accepts a document-extraction record, fills in defaults and calculates
/// like `/income-tax`.
async fn extracted_income_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractedTaxData>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing extracted income tax request");

    let data = match payload {
        Ok(Json(data)) => data,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match data.into_profile() {
        Ok(profile) => income_tax_response(&state, &profile, correlation_id),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Extracted data rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /business-tax.
///
/// Failed error-severity rules reject the request; warnings are returned
/// alongside the result.
async fn business_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<BusinessTaxInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing business tax request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let validation = validate_business_data(&input);
    let failures: Vec<&str> = validation
        .iter()
        .filter(|o| o.severity == RuleSeverity::Error && !o.valid)
        .map(|o| o.error_message.as_str())
        .collect();
    if !failures.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            failures = failures.len(),
            "Business data failed validation"
        );
        return error_response(ApiErrorResponse::bad_request(ApiError::with_details(
            "VALIDATION_ERROR",
            "Business data failed validation",
            failures.join("; "),
        )));
    }

    match compute_business_tax(&input) {
        Ok(tax) => {
            info!(
                correlation_id = %correlation_id,
                total_tax_liability = %tax.total_tax_liability,
                "Business tax calculated"
            );
            let code = state.schedule().metadata().code.clone();
            json_response(
                StatusCode::OK,
                &CalculationResponse::new(code, BusinessTaxReport { tax, validation }),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Business tax calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /compliance.
///
/// A non-compliant business is still a successful check; the report lists
/// each breach with its recommendation.
async fn compliance_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComplianceData>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compliance request");

    let data = match payload {
        Ok(Json(data)) => data,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let report = generate_compliance_report(&data);
    info!(
        correlation_id = %correlation_id,
        compliant = report.compliant,
        breaches = report.failures().count(),
        "Compliance checked"
    );

    let code = state.schedule().metadata().code.clone();
    json_response(StatusCode::OK, &CalculationResponse::new(code, report))
}

/// Handler for GET /schedule.
async fn schedule_handler(State(state): State<AppState>) -> Response {
    let schedule = state.schedule();
    json_response(
        StatusCode::OK,
        &ScheduleResponse {
            metadata: schedule.metadata().clone(),
            deductions: schedule.deductions().clone(),
            bands: schedule.bands().to_vec(),
            dependant_reductions: schedule.dependant_reductions().to_vec(),
        },
    )
}

fn income_tax_response(
    state: &AppState,
    profile: &TaxpayerProfile,
    correlation_id: Uuid,
) -> Response {
    let start_time = Instant::now();
    match compute_income_tax(profile, state.schedule()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                tax_class = profile.classification().as_str(),
                fortnightly_tax = %result.tax_payable.fortnightly,
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Income tax calculated"
            );
            let code = state.schedule().metadata().code.clone();
            json_response(
                StatusCode::OK,
                &CalculationResponse::new(code, IncomeTaxReport::from(result)),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Income tax calculation failed"
            );
            error_response(err.into())
        }
    }
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, &api_error.error)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::ComplianceReport;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/png_2023").expect("Failed to load config");
        AppState::from(config)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn send(method: &str, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_income_tax_valid_request_returns_200() {
        let (status, json) = send("POST", "/income-tax", r#"{"income": "1000"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let response: CalculationResponse<IncomeTaxReport> = serde_json::from_value(json).unwrap();
        assert_eq!(response.schedule_code, "PNG-SWT-2023");
        assert_eq!(response.result.tax.tax_payable.fortnightly, dec("69.231"));
        assert_eq!(response.result.summary.fortnightly_tax, "K69.23");
    }

    #[tokio::test]
    async fn test_income_tax_malformed_json_returns_400() {
        let (status, json) = send("POST", "/income-tax", "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_income_tax_missing_income_returns_400() {
        let (status, json) = send("POST", "/income-tax", r#"{"dependants": 1}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("income"));
    }

    #[tokio::test]
    async fn test_income_tax_too_many_dependants_returns_400() {
        let (status, json) =
            send("POST", "/income-tax", r#"{"income": "1000", "dependants": 4}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("dependants"));
    }

    #[tokio::test]
    async fn test_extracted_income_tax_uses_conservative_defaults() {
        // Annual, resident, no declaration lodged
        let (status, json) = send("POST", "/extracted-income-tax", r#"{"income": 26000.0}"#).await;

        assert_eq!(status, StatusCode::OK);
        let response: CalculationResponse<IncomeTaxReport> = serde_json::from_value(json).unwrap();
        assert_eq!(response.result.tax.gross_income.fortnightly, dec("1000"));
        assert_eq!(
            response.result.tax.tax_payable.fortnightly,
            dec("420.7434")
        );
    }

    #[tokio::test]
    async fn test_extracted_income_tax_without_income_returns_400() {
        let (status, json) = send("POST", "/extracted-income-tax", r#"{"dependants": 2}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_business_tax_returns_result_and_warnings() {
        let body = r#"{
            "business_type": "company",
            "annual_revenue": "300000",
            "expenses": "100000"
        }"#;
        let (status, json) = send("POST", "/business-tax", body).await;

        assert_eq!(status, StatusCode::OK);
        let response: CalculationResponse<BusinessTaxReport> =
            serde_json::from_value(json).unwrap();
        assert_eq!(response.result.tax.income_tax, dec("60000"));
        let gst = &response.result.validation[2];
        assert_eq!(gst.id, "gst_registration");
        assert!(!gst.valid);
    }

    #[tokio::test]
    async fn test_business_tax_invalid_data_returns_400() {
        let body = r#"{
            "business_type": "sme",
            "annual_revenue": "1000",
            "expenses": "5000"
        }"#;
        let (status, json) = send("POST", "/business-tax", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(
            error.details.as_deref(),
            Some("Expenses cannot exceed annual revenue")
        );
    }

    #[tokio::test]
    async fn test_income_tax_huge_income_returns_400() {
        let (status, json) = send(
            "POST",
            "/income-tax",
            r#"{"income": "10000000000000000000000000000"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("too large"));
    }

    #[tokio::test]
    async fn test_extracted_income_tax_huge_income_returns_400() {
        let (status, json) = send(
            "POST",
            "/extracted-income-tax",
            r#"{"income": 1e28, "is_fortnightly": true}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("income"));
    }

    #[tokio::test]
    async fn test_business_tax_huge_revenue_returns_400() {
        let body = r#"{
            "business_type": "company",
            "annual_revenue": "10000000000000000000000000000",
            "expenses": "0",
            "has_gst_registration": true
        }"#;
        let (status, json) = send("POST", "/business-tax", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_business_tax_missing_documents_returns_400() {
        let body = r#"{
            "business_type": "partnership",
            "annual_revenue": "90000",
            "expenses": "30000",
            "has_foreign_income": true,
            "required_documents": ["financial_statements"],
            "provided_documents": []
        }"#;
        let (status, json) = send("POST", "/business-tax", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(
            error.details.as_deref(),
            Some("Foreign income must be fully documented; Missing required tax documents")
        );
    }

    #[tokio::test]
    async fn test_business_tax_past_deadline_returns_400() {
        let body = r#"{
            "business_type": "company",
            "annual_revenue": "100000",
            "expenses": "20000",
            "filing_deadline": "2000-04-30"
        }"#;
        let (status, json) = send("POST", "/business-tax", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.details.as_deref(), Some("Filing deadline has passed"));
    }

    #[tokio::test]
    async fn test_compliance_reports_breaches_with_recommendations() {
        let body = r#"{
            "business_type": "company",
            "annual_revenue": "400000",
            "annual_return_filed": true,
            "tax_registration_number": "501234567",
            "industry": "mining"
        }"#;
        let (status, json) = send("POST", "/compliance", body).await;

        assert_eq!(status, StatusCode::OK);
        let response: CalculationResponse<ComplianceReport> =
            serde_json::from_value(json).unwrap();
        let report = response.result;
        assert!(!report.compliant);
        assert_eq!(report.requirements.len(), 6);

        let breaches: Vec<&str> = report.failures().map(|r| r.id.as_str()).collect();
        assert_eq!(breaches, vec!["gst_compliance", "mining_levy"]);
        for breach in report.failures() {
            let recommendation = breach.recommendation.as_deref().unwrap();
            assert!(recommendation.starts_with(&format!("Ensure compliance with {}.", breach.name)));
        }
    }

    #[tokio::test]
    async fn test_compliance_filters_by_business_type() {
        let body = r#"{
            "business_type": "sole_proprietor",
            "annual_revenue": "50000",
            "annual_return_filed": true,
            "tax_registration_number": "501234567",
            "has_foreign_operations": true,
            "industry": "mining"
        }"#;
        let (status, json) = send("POST", "/compliance", body).await;

        assert_eq!(status, StatusCode::OK);
        let response: CalculationResponse<ComplianceReport> =
            serde_json::from_value(json).unwrap();
        assert!(response.result.compliant);
        assert_eq!(response.result.requirements.len(), 4);
    }

    #[tokio::test]
    async fn test_compliance_unknown_business_type_returns_400() {
        let body = r#"{"business_type": "trust", "annual_revenue": "1000"}"#;
        let (status, json) = send("POST", "/compliance", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
        assert!(error.message.contains("unknown variant"));
    }

    #[tokio::test]
    async fn test_schedule_endpoint() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/schedule")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let schedule: ScheduleResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(schedule.metadata.code, "PNG-SWT-2023");
        assert_eq!(schedule.bands.len(), 5);
        assert_eq!(schedule.dependant_reductions.len(), 3);
    }
}
