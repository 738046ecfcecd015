//! Analyze a contracts CSV and print a consolidated portability report
//!
//! Configuration comes from environment variables, with `--json` switching
//! the output to a machine-readable document:
//!   LOANS_CSV         path to the contracts CSV (default: data/loans.csv)
//!   BORROWER_NAME     borrower display name
//!   BIRTH_DATE        borrower birth date, YYYY-MM-DD
//!   PORTABILITY_PCT   portability rate offer, percent per period
//!   AS_OF             reference date, YYYY-MM-DD (default: today)

use anyhow::Context;
use chrono::{Local, NaiveDate};
use loan_engine::{analyze_loan, consolidate, AnalysisConfig, Borrower, LoanAnalysis};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct ReportDocument {
    borrower: String,
    as_of: NaiveDate,
    loans: Vec<LoanAnalysis>,
    consolidated: loan_engine::ConsolidatedReport,
}

fn parse_date_var(name: &str) -> anyhow::Result<Option<NaiveDate>> {
    match env::var(name) {
        Ok(s) => {
            let date = NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("{name} must be YYYY-MM-DD, got '{s}'"))?;
            Ok(Some(date))
        }
        Err(_) => Ok(None),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");

    let csv_path: PathBuf = env::var("LOANS_CSV")
        .unwrap_or_else(|_| "data/loans.csv".to_string())
        .into();

    let borrower = Borrower {
        name: env::var("BORROWER_NAME").unwrap_or_else(|_| "Borrower".to_string()),
        birth_date: parse_date_var("BIRTH_DATE")?
            .context("BIRTH_DATE is required (YYYY-MM-DD)")?,
        portability_rate: env::var("PORTABILITY_PCT")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .map(|pct| pct / 100.0)
            .unwrap_or(0.0),
    };

    let as_of = parse_date_var("AS_OF")?.unwrap_or_else(|| Local::now().date_naive());
    let config = AnalysisConfig::new(as_of);

    let records = loan_engine::loan::load_loan_records(&csv_path)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", csv_path.display()))?;

    let mut analyses = Vec::with_capacity(records.len());
    for record in &records {
        let analysis = analyze_loan(record, &borrower, &config)?;
        analyses.push(analysis);
    }
    let consolidated = consolidate(&analyses);

    if json_output {
        let document = ReportDocument {
            borrower: borrower.name,
            as_of,
            loans: analyses,
            consolidated,
        };
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("Portability Report for {} (as of {})", borrower.name, as_of);
    println!("{}", "=".repeat(96));
    println!(
        "{:<14} {:<12} {:>9} {:>6} {:>11} {:>12} {:>12} {:>11}",
        "Lender", "Contract", "Rate %", "Left", "Balance", "Installment", "Portability", "Eligible"
    );
    println!("{}", "-".repeat(96));

    for (record, a) in records.iter().zip(&analyses) {
        println!(
            "{:<14} {:<12} {:>9.4} {:>6} {:>11.2} {:>12.2} {:>12} {:>11}",
            a.lender,
            a.contract_id,
            a.effective_rate * 100.0,
            a.periods_remaining,
            a.outstanding_balance,
            record.terms.payment,
            a.portability_payment
                .map(|p| format!("{p:.2}"))
                .unwrap_or_else(|| "-".to_string()),
            if a.eligible { "yes" } else { "no" }
        );
    }

    println!("{}", "-".repeat(96));
    println!(
        "Eligible: {}   Rejected: {}   Total balance: {:.2}   Total portability installment: {:.2}",
        consolidated.eligible_count,
        consolidated.rejected_count,
        consolidated.total_outstanding_balance,
        consolidated.total_portability_payment
    );

    Ok(())
}
