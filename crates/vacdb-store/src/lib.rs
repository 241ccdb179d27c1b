//! PostgreSQL persistence for vacdb
//!
//! Two relations, companies and vacancies, plus the aggregate and
//! filter queries the CLI report is built from.

pub mod config;
pub mod error;
pub mod store;

pub use config::DbConfig;
pub use error::{Result, StoreError};
pub use store::{
    CompanyVacancyCount, KeywordVacancyRow, SalariedVacancyRow, VacancyRow, VacancyStore,
};
