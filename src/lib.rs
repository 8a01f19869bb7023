//! Salary and Wages Tax Engine for Papua New Guinea
//!
//! This crate computes fortnightly and annual income tax under the Salary or
//! Wages Tax (Rates) schedule, including residency and declaration status,
//! dependant reductions, salary sacrifice and Nasfund contributions. Every
//! calculation carries an audit trace explaining how each figure was reached.
//! A simpler business tax calculator, a business compliance check and an
//! HTTP API are also provided.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
