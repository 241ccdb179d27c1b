//! Shared types and infrastructure for vacdb
//!
//! This crate holds the domain model passed between the ingestion
//! pipeline and the vacancy store, plus the logging subsystem used by
//! every binary in the workspace.

pub mod logging;
pub mod types;

pub use types::{CompanyGroup, Salary, Vacancy, NOT_SPECIFIED, REFERENCE_CURRENCY};
