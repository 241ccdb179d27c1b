//! HTTP client for the remote vacancy API.
//!
//! One GET against the vacancy search endpoint, restricted to listings
//! that advertise a salary. Pagination is out of scope; only the first
//! page of results is consumed.

use crate::error::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use vacdb_common::{Salary, Vacancy, NOT_SPECIFIED};

/// Default base URL of the vacancy API.
/// Can be overridden via the VACDB_API_BASE_URL environment variable.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hh.ru";

/// Default timeout for API requests in seconds.
/// Can be overridden via the VACDB_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Search response envelope; the API wraps listings in an `items` array.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<ApiVacancy>,
}

/// A vacancy listing as it appears on the wire.
///
/// Every field may be absent; [`ApiVacancy::flatten`] substitutes the
/// "Не указано" placeholder where the API left a gap.
#[derive(Debug, Deserialize)]
struct ApiVacancy {
    name: Option<String>,
    salary: Option<Salary>,
    url: Option<String>,
    employer: Option<Employer>,
}

#[derive(Debug, Deserialize)]
struct Employer {
    name: Option<String>,
}

impl ApiVacancy {
    fn flatten(self) -> Vacancy {
        let company_name = self
            .employer
            .and_then(|e| e.name)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        Vacancy {
            name: self.name.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            salary: self.salary,
            url: self.url.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            company_name,
        }
    }
}

/// Client for the vacancy search endpoint
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let timeout_secs = std::env::var("VACDB_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("VACDB_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Self::new(base_url)
    }

    /// Fetch one page of salaried vacancy listings.
    ///
    /// Attempted exactly once; any transport failure, non-2xx status or
    /// body that does not match the expected shape is a [`FetchError`].
    pub async fn fetch_vacancies(&self) -> Result<Vec<Vacancy>> {
        let url = format!("{}/vacancies", self.base_url);

        tracing::debug!(url = %url, "Fetching vacancies");

        let response = self
            .client
            .get(&url)
            .query(&[("only_with_salary", "true")])
            .send()
            .await?
            .error_for_status()?;

        // Parse via serde_json rather than reqwest's own decoder so a
        // bad body surfaces as MalformedResponse, not a generic HTTP
        // error.
        let body = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&body)?;

        tracing::info!(count = search.items.len(), "Fetched vacancy listings");

        Ok(search.items.into_iter().map(ApiVacancy::flatten).collect())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_flatten_fills_placeholders() {
        let api_vacancy: ApiVacancy = serde_json::from_str(r#"{"salary": null}"#).unwrap();
        let vacancy = api_vacancy.flatten();

        assert_eq!(vacancy.name, NOT_SPECIFIED);
        assert_eq!(vacancy.url, NOT_SPECIFIED);
        assert_eq!(vacancy.company_name, NOT_SPECIFIED);
        assert!(vacancy.salary.is_none());
    }

    #[test]
    fn test_flatten_unwraps_employer() {
        let api_vacancy: ApiVacancy = serde_json::from_str(
            r#"{"name": "Dev", "url": "https://example.com/1", "employer": {"name": "Acme"}}"#,
        )
        .unwrap();
        let vacancy = api_vacancy.flatten();

        assert_eq!(vacancy.name, "Dev");
        assert_eq!(vacancy.company_name, "Acme");
    }

    #[test]
    fn test_employer_without_name_falls_back() {
        let api_vacancy: ApiVacancy = serde_json::from_str(r#"{"employer": {}}"#).unwrap();
        assert_eq!(api_vacancy.flatten().company_name, NOT_SPECIFIED);
    }
}
