//! The vacancy store: schema management, inserts, and report queries.

use crate::config::DbConfig;
use crate::error::{Result, StoreError};
use serde::Serialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use vacdb_common::CompanyGroup;

/// Schema DDL. Destructive: drops both tables before recreating them.
const SCHEMA_DDL: &str = r#"
DROP TABLE IF EXISTS vacancies CASCADE;
DROP TABLE IF EXISTS companies CASCADE;

CREATE TABLE companies (
    company_id SERIAL PRIMARY KEY,
    company_name TEXT UNIQUE NOT NULL
);

CREATE TABLE vacancies (
    vacancy_id SERIAL PRIMARY KEY,
    company_id INT NOT NULL REFERENCES companies(company_id),
    vacancy_name VARCHAR(250),
    salary_to BIGINT,
    salary_from BIGINT,
    currency TEXT
);
"#;

/// Per-company vacancy count, including companies with zero vacancies.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CompanyVacancyCount {
    pub company_id: i32,
    pub company_name: String,
    pub vacancy_count: i64,
}

/// One row of the full vacancy listing.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct VacancyRow {
    pub vacancy_id: i32,
    pub company_name: Option<String>,
    pub vacancy_name: Option<String>,
    pub salary_to: Option<i64>,
    pub salary_from: Option<i64>,
}

/// A vacancy whose salary exceeds the current average.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SalariedVacancyRow {
    pub company_name: String,
    pub vacancy_name: Option<String>,
    pub salary_to: Option<i64>,
    pub salary_from: Option<i64>,
    pub currency: Option<String>,
}

/// A vacancy matched by keyword search.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct KeywordVacancyRow {
    pub vacancy_id: i32,
    pub company_name: String,
    pub vacancy_name: Option<String>,
    pub salary_to: Option<i64>,
    pub salary_from: Option<i64>,
    pub currency: Option<String>,
}

/// Owns the companies and vacancies relations.
///
/// One sequential caller per store instance; no operation is designed
/// to run concurrently with another against the same instance.
pub struct VacancyStore {
    pool: PgPool,
}

impl VacancyStore {
    /// Connect to the database described by the configuration
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(StoreError::Connection)?;

        tracing::info!(
            max_connections = config.max_connections,
            "Connected to vacancy store"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drop and recreate both relations.
    ///
    /// Destructive and idempotent. Any failure here is fatal to the
    /// run and propagates.
    pub async fn reset_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA_DDL)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;

        tracing::info!("Schema reset: companies and vacancies recreated");

        Ok(())
    }

    /// Insert grouped vacancies.
    ///
    /// Per group: upsert the company by name (insert-or-ignore), resolve
    /// its id, then insert one vacancy row per listing. Statements commit
    /// individually; a mid-batch failure leaves previously committed rows
    /// in place and propagates. An empty slice is a no-op.
    pub async fn insert(&self, groups: &[CompanyGroup]) -> Result<()> {
        for group in groups {
            sqlx::query(
                "INSERT INTO companies (company_name) VALUES ($1) \
                 ON CONFLICT (company_name) DO NOTHING",
            )
            .bind(&group.company_name)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Insert)?;

            let company_id: i32 =
                sqlx::query_scalar("SELECT company_id FROM companies WHERE company_name = $1")
                    .bind(&group.company_name)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(StoreError::Insert)?;

            for vacancy in &group.vacancies {
                let (salary_from, salary_to, currency) = match &vacancy.salary {
                    Some(salary) => (salary.from, salary.to, Some(salary.currency.as_str())),
                    None => (None, None, None),
                };

                sqlx::query(
                    "INSERT INTO vacancies \
                     (company_id, vacancy_name, salary_to, salary_from, currency) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(company_id)
                .bind(&vacancy.name)
                .bind(salary_to)
                .bind(salary_from)
                .bind(currency)
                .execute(&self.pool)
                .await
                .map_err(StoreError::Insert)?;
            }

            tracing::debug!(
                company = %group.company_name,
                vacancies = group.vacancies.len(),
                "Inserted company group"
            );
        }

        Ok(())
    }

    /// Vacancy count per company, zero-vacancy companies included.
    pub async fn count_per_company(&self) -> Result<Vec<CompanyVacancyCount>> {
        sqlx::query_as(
            r#"
            SELECT c.company_id, c.company_name, COUNT(v.vacancy_id) AS vacancy_count
            FROM companies c
            LEFT JOIN vacancies v ON c.company_id = v.company_id
            GROUP BY c.company_id, c.company_name
            ORDER BY c.company_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Query)
    }

    /// Every stored vacancy with its company name, duplicates removed.
    pub async fn all_vacancies(&self) -> Result<Vec<VacancyRow>> {
        sqlx::query_as(
            r#"
            SELECT DISTINCT v.vacancy_id, c.company_name, v.vacancy_name,
                   v.salary_to, v.salary_from
            FROM vacancies v
            LEFT JOIN companies c ON c.company_id = v.company_id
            ORDER BY v.vacancy_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Query)
    }

    /// Average of `coalesce(salary_from, 0) + coalesce(salary_to, 0)`
    /// across all vacancy rows. `None` when no rows are stored (the SQL
    /// aggregate is NULL); callers decide how to present that.
    pub async fn average_salary(&self) -> Result<Option<f64>> {
        sqlx::query_scalar(
            r#"
            SELECT CAST(AVG(COALESCE(salary_from, 0) + COALESCE(salary_to, 0)) AS DOUBLE PRECISION)
            FROM vacancies
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Query)
    }

    /// Vacancies whose salary exceeds the current average.
    ///
    /// Typed variant: an undefined average (empty table) or a failed
    /// statement comes back as an error, so callers can tell "empty"
    /// from "failed".
    pub async fn try_above_average_vacancies(&self) -> Result<Vec<SalariedVacancyRow>> {
        let average = self
            .average_salary()
            .await?
            .ok_or(StoreError::UndefinedAverage)?;

        sqlx::query_as(
            r#"
            SELECT DISTINCT c.company_name, v.vacancy_name, v.salary_to,
                   v.salary_from, v.currency
            FROM vacancies v
            JOIN companies c ON v.company_id = c.company_id
            WHERE v.salary_to > $1 OR v.salary_from > $1
            ORDER BY c.company_name, v.vacancy_name
            "#,
        )
        .bind(average)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Query)
    }

    /// Lenient wrapper around [`Self::try_above_average_vacancies`]:
    /// any failure is logged and surfaced as an empty list.
    pub async fn above_average_vacancies(&self) -> Vec<SalariedVacancyRow> {
        match self.try_above_average_vacancies().await {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(error = %error, "Above-average query failed; returning empty list");
                Vec::new()
            },
        }
    }

    /// Vacancies whose name contains the keyword, case-insensitively.
    /// An empty keyword matches every vacancy.
    pub async fn vacancies_with_keyword(&self, keyword: &str) -> Result<Vec<KeywordVacancyRow>> {
        let pattern = format!("%{keyword}%");

        sqlx::query_as(
            r#"
            SELECT DISTINCT v.vacancy_id, c.company_name, v.vacancy_name,
                   v.salary_to, v.salary_from, v.currency
            FROM vacancies v
            JOIN companies c ON v.company_id = c.company_id
            WHERE v.vacancy_name ILIKE $1
            ORDER BY v.vacancy_id
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Query)
    }

    /// Release the underlying connections. Callers are expected to
    /// reach this on every exit path of a long-running run.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!("Vacancy store closed");
    }
}
