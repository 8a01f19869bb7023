//! HTTP API module for the tax engine.
//!
//! This module provides the REST endpoints for salary and wages tax,
//! document-extraction input, business tax, business compliance and the
//! loaded schedule.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionRequest, IncomeTaxRequest};
pub use response::{
    ApiError, ApiErrorResponse, BusinessTaxReport, CalculationResponse, IncomeTaxReport,
    IncomeTaxSummary, ScheduleResponse,
};
pub use state::AppState;
