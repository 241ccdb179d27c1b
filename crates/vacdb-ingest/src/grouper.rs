//! Grouping of flat vacancy lists by employer.

use std::collections::HashMap;
use vacdb_common::{CompanyGroup, Vacancy};

/// Group vacancies by exact, case-sensitive company name.
///
/// Groups appear in order of each company's first occurrence in the
/// input; vacancies within a group keep their input order. Lookup of an
/// existing group is O(1) via a name-to-index map over the accumulator.
pub fn group_by_company(vacancies: Vec<Vacancy>) -> Vec<CompanyGroup> {
    let mut groups: Vec<CompanyGroup> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for vacancy in vacancies {
        match index_by_name.get(vacancy.company_name.as_str()) {
            Some(&index) => groups[index].vacancies.push(vacancy),
            None => {
                index_by_name.insert(vacancy.company_name.clone(), groups.len());
                groups.push(CompanyGroup {
                    company_name: vacancy.company_name.clone(),
                    vacancies: vec![vacancy],
                });
            },
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use vacdb_common::NOT_SPECIFIED;

    fn vacancy(name: &str, company: &str) -> Vacancy {
        Vacancy {
            name: name.to_string(),
            salary: None,
            url: NOT_SPECIFIED.to_string(),
            company_name: company.to_string(),
        }
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_company(vec![]).is_empty());
    }

    #[test]
    fn test_first_seen_company_order_preserved() {
        let groups = group_by_company(vec![
            vacancy("Dev", "Acme"),
            vacancy("QA", "Globex"),
            vacancy("Ops", "Acme"),
            vacancy("PM", "Initech"),
        ]);

        let names: Vec<&str> = groups.iter().map(|g| g.company_name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Globex", "Initech"]);
    }

    #[test]
    fn test_vacancies_keep_input_order_within_group() {
        let groups = group_by_company(vec![
            vacancy("Dev", "Acme"),
            vacancy("QA", "Acme"),
            vacancy("Ops", "Acme"),
        ]);

        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].vacancies.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Dev", "QA", "Ops"]);
    }

    #[test]
    fn test_grouping_is_complete() {
        let input = vec![
            vacancy("Dev", "Acme"),
            vacancy("QA", "Globex"),
            vacancy("Ops", "Acme"),
        ];
        let total: usize = group_by_company(input).iter().map(|g| g.vacancies.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_company_match_is_case_sensitive() {
        let groups = group_by_company(vec![vacancy("Dev", "Acme"), vacancy("QA", "acme")]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_company_names_not_trimmed() {
        let groups = group_by_company(vec![vacancy("Dev", "Acme"), vacancy("QA", "Acme ")]);
        assert_eq!(groups.len(), 2);
    }
}
