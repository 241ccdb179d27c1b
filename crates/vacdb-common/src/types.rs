//! Domain model shared between ingestion and storage.

use serde::{Deserialize, Serialize};

/// Placeholder used for listing fields the remote API left out.
pub const NOT_SPECIFIED: &str = "Не указано";

/// All stored salary figures are normalized to this currency code.
pub const REFERENCE_CURRENCY: &str = "RUB";

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

/// Salary range as advertised on a listing.
///
/// Either bound may be absent; a listing with no salary at all is
/// represented as `Option::<Salary>::None` on [`Vacancy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub from: Option<i64>,
    pub to: Option<i64>,
    #[serde(default = "not_specified")]
    pub currency: String,
}

impl Salary {
    /// True once the record carries the reference currency code.
    pub fn is_normalized(&self) -> bool {
        self.currency == REFERENCE_CURRENCY
    }
}

/// A single vacancy listing, flattened from the remote API shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    #[serde(default = "not_specified")]
    pub name: String,
    #[serde(default)]
    pub salary: Option<Salary>,
    #[serde(default = "not_specified")]
    pub url: String,
    #[serde(default = "not_specified")]
    pub company_name: String,
}

/// Vacancies grouped under one employer, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyGroup {
    pub company_name: String,
    pub vacancies: Vec<Vacancy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_placeholder() {
        let vacancy: Vacancy = serde_json::from_str(r#"{"salary": null}"#).unwrap();
        assert_eq!(vacancy.name, NOT_SPECIFIED);
        assert_eq!(vacancy.url, NOT_SPECIFIED);
        assert_eq!(vacancy.company_name, NOT_SPECIFIED);
        assert!(vacancy.salary.is_none());
    }

    #[test]
    fn test_salary_bounds_optional() {
        let salary: Salary = serde_json::from_str(r#"{"from": 1000, "currency": "RUB"}"#).unwrap();
        assert_eq!(salary.from, Some(1000));
        assert_eq!(salary.to, None);
        assert!(salary.is_normalized());
    }

    #[test]
    fn test_salary_missing_currency_defaults_to_placeholder() {
        let salary: Salary = serde_json::from_str(r#"{"from": 500}"#).unwrap();
        assert_eq!(salary.currency, NOT_SPECIFIED);
        assert!(!salary.is_normalized());
    }
}
