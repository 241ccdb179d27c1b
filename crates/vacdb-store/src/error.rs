//! Error types for the vacancy store.

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store operation errors.
///
/// Connection and configuration failures are fatal at startup. Insert
/// and query failures propagate to the caller, except through the one
/// deliberately lenient query wrapper
/// ([`crate::VacancyStore::above_average_vacancies`]).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not establish the database connection
    #[error("Failed to connect to the vacancy store: {0}. Check DATABASE_URL and connection settings.")]
    Connection(#[source] sqlx::Error),

    /// Connection parameters are missing or invalid
    #[error("Store configuration error: {0}")]
    Config(String),

    /// A query statement failed
    #[error("Store query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// An insert statement failed mid-batch; previously committed rows
    /// are retained (per-statement commit semantics)
    #[error("Store insert failed: {0}")]
    Insert(#[source] sqlx::Error),

    /// The average salary is undefined because no vacancies are stored,
    /// so an above-average comparison has nothing to compare against
    #[error("Average salary is undefined: no vacancies stored")]
    UndefinedAverage,
}

impl StoreError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
