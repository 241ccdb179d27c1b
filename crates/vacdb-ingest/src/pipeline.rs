//! The ingestion pipeline: fetch, normalize, group.

use crate::api::ApiClient;
use crate::error::Result;
use crate::{currency, grouper};
use vacdb_common::CompanyGroup;

/// Composes the API client with the currency normalizer and grouper.
///
/// The pipeline owns the in-memory groups only until they are handed to
/// the store; it never talks to the database itself.
pub struct IngestPipeline {
    client: ApiClient,
}

impl IngestPipeline {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a pipeline with an API client built from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ApiClient::from_env()?))
    }

    /// Fetch one page of salaried listings, normalize every salary into
    /// the reference currency, and group by employer.
    ///
    /// A fetch failure propagates as [`crate::FetchError`] and produces
    /// no partial output.
    pub async fn fetch_and_prepare(&self) -> Result<Vec<CompanyGroup>> {
        let mut vacancies = self.client.fetch_vacancies().await?;

        for vacancy in &mut vacancies {
            if let Some(salary) = vacancy.salary.take() {
                vacancy.salary = Some(currency::normalize(salary));
            }
        }

        let groups = grouper::group_by_company(vacancies);

        tracing::info!(companies = groups.len(), "Prepared vacancy groups");

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vacdb_common::{Salary, Vacancy};

    #[test]
    fn test_normalize_then_group_shape() {
        // The pipeline's transform steps, applied the way
        // fetch_and_prepare does, without the network.
        let mut vacancies = vec![
            Vacancy {
                name: "Dev".to_string(),
                salary: Some(Salary {
                    from: Some(100),
                    to: None,
                    currency: "BYR".to_string(),
                }),
                url: "https://example.com/1".to_string(),
                company_name: "Acme".to_string(),
            },
            Vacancy {
                name: "QA".to_string(),
                salary: None,
                url: "https://example.com/2".to_string(),
                company_name: "Acme".to_string(),
            },
        ];

        for vacancy in &mut vacancies {
            if let Some(salary) = vacancy.salary.take() {
                vacancy.salary = Some(currency::normalize(salary));
            }
        }
        let groups = grouper::group_by_company(vacancies);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].company_name, "Acme");
        assert_eq!(groups[0].vacancies.len(), 2);

        let dev_salary = groups[0].vacancies[0].salary.as_ref().unwrap();
        assert_eq!(dev_salary.from, Some(2800));
        assert_eq!(dev_salary.currency, "RUB");
        assert!(groups[0].vacancies[1].salary.is_none());
    }
}
