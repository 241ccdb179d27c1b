//! vacdb - interactive vacancy database run
//!
//! One pass: reset the schema, ingest a page of salaried listings from
//! the remote API, then print the full report (per-company counts, all
//! vacancies, average salary, above-average listings, keyword matches).

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::process;
use tracing::error;
use vacdb_common::logging::{init_logging, LogConfig, LogLevel};
use vacdb_ingest::IngestPipeline;
use vacdb_store::{DbConfig, VacancyStore};

#[derive(Parser)]
#[command(
    name = "vacdb",
    version,
    about = "Ingest vacancy listings and report on them"
)]
struct Cli {
    /// Enable debug logging on the console
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    let base = LogConfig::default()
        .with_level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .with_file_prefix("vacdb")
        .with_filter_directives("sqlx=warn");
    let log_config = LogConfig::from_env(base.clone()).unwrap_or(base);

    // The run works without logging; ignore subscriber setup failures.
    let _ = init_logging(&log_config);

    if let Err(e) = run().await {
        error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    println!("Добрый день! Welcome to vacancies database!");

    let keyword = prompt_keyword()?;

    let config = DbConfig::from_env()?;
    let store = VacancyStore::connect(&config).await?;

    // Close on every exit path, error paths included.
    let result = run_report(&store, &keyword).await;
    store.close().await;
    result
}

/// The full fetch -> normalize -> group -> insert -> query sequence.
async fn run_report(store: &VacancyStore, keyword: &str) -> Result<()> {
    store.reset_schema().await?;
    println!("## БАЗА ДАННЫХ СОЗДАНА ##");

    let pipeline = IngestPipeline::from_env()?;
    let groups = pipeline.fetch_and_prepare().await?;
    store.insert(&groups).await?;
    println!("## База данных заполнена ##");

    println!("\nA list of all companies and the number of vacancies each company has:");
    for count in store.count_per_company().await? {
        println!(
            "  [{}] {} — {} vacancies",
            count.company_id, count.company_name, count.vacancy_count
        );
    }

    println!("\nA list of all vacancies with all information of them:");
    for row in store.all_vacancies().await? {
        println!(
            "  [{}] {} | {} | from {} to {}",
            row.vacancy_id,
            row.company_name.as_deref().unwrap_or("-"),
            row.vacancy_name.as_deref().unwrap_or("-"),
            format_bound(row.salary_from),
            format_bound(row.salary_to),
        );
    }

    let average = store.average_salary().await?;
    println!(
        "\nThe average salary for all of the vacancies: {}",
        format_average(average)
    );

    println!("\nA list of all jobs with a salary higher than the average for all the vacancies:");
    for row in store.above_average_vacancies().await {
        println!(
            "  {} | {} | from {} to {} {}",
            row.company_name,
            row.vacancy_name.as_deref().unwrap_or("-"),
            format_bound(row.salary_from),
            format_bound(row.salary_to),
            row.currency.as_deref().unwrap_or(""),
        );
    }

    println!("\nA list of all vacancies whose titles contain your keyword:");
    for row in store.vacancies_with_keyword(keyword).await? {
        println!(
            "  [{}] {} | {} | from {} to {} {}",
            row.vacancy_id,
            row.company_name,
            row.vacancy_name.as_deref().unwrap_or("-"),
            format_bound(row.salary_from),
            format_bound(row.salary_to),
            row.currency.as_deref().unwrap_or(""),
        );
    }

    Ok(())
}

fn prompt_keyword() -> Result<String> {
    print!("Введите ключевое слово: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{value:.2} RUB"),
        None => "not available (no vacancies stored)".to_string(),
    }
}

fn format_bound(bound: Option<i64>) -> String {
    match bound {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_average_rounds_to_two_places() {
        assert_eq!(format_average(Some(2000.0)), "2000.00 RUB");
        assert_eq!(format_average(Some(1234.567)), "1234.57 RUB");
    }

    #[test]
    fn test_format_average_handles_empty_store() {
        assert_eq!(format_average(None), "not available (no vacancies stored)");
    }

    #[test]
    fn test_format_bound() {
        assert_eq!(format_bound(Some(1500)), "1500");
        assert_eq!(format_bound(None), "-");
    }
}
