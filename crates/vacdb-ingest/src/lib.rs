//! Vacancy ingestion for vacdb
//!
//! Fetches a single page of salaried vacancy listings from the remote
//! recruiting API, normalizes every salary into the reference currency,
//! and groups the listings by employer ready for persistence.

pub mod api;
pub mod currency;
pub mod error;
pub mod grouper;
pub mod pipeline;

pub use api::ApiClient;
pub use error::{FetchError, Result};
pub use pipeline::IngestPipeline;
