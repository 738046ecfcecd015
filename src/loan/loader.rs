//! Load loan records from a contracts CSV

use super::{LoanRecord, LoanTerms};
use chrono::NaiveDate;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the contracts export columns
///
/// Rates arrive as percentages (the way borrowers read them off a
/// statement) and are converted to fractions here.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Lender")]
    lender: String,
    #[serde(rename = "LenderCode")]
    lender_code: String,
    #[serde(rename = "ContractID")]
    contract_id: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Payment")]
    payment: f64,
    #[serde(rename = "Installments")]
    installments: u32,
    #[serde(rename = "StartDate")]
    start_date: String,
    #[serde(rename = "InformedRatePct")]
    informed_rate_pct: Option<f64>,
    #[serde(rename = "InformedCetPct")]
    informed_cet_pct: Option<f64>,
}

impl CsvRow {
    fn to_record(self) -> Result<LoanRecord, Box<dyn Error>> {
        let start_date = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")
            .map_err(|e| format!("bad StartDate '{}': {e}", self.start_date))?;

        let terms = LoanTerms::new(self.principal, self.payment, self.installments, start_date)?;

        Ok(LoanRecord {
            lender: self.lender,
            lender_code: self.lender_code,
            contract_id: self.contract_id,
            terms,
            informed_rate: self.informed_rate_pct.map(|p| p / 100.0),
            informed_cost_of_credit: self.informed_cet_pct.map(|p| p / 100.0),
        })
    }
}

/// Load all loan records from a CSV file
pub fn load_loan_records(path: &Path) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let row: CsvRow = row?;
        records.push(row.to_record()?);
    }

    Ok(records)
}

/// Parse loan records from CSV text already in memory
pub fn parse_loan_records(csv_text: &str) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(csv_text.as_bytes());
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let row: CsvRow = row?;
        records.push(row.to_record()?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Lender,LenderCode,ContractID,Principal,Payment,Installments,StartDate,InformedRatePct,InformedCetPct\n";

    #[test]
    fn test_parse_full_row() {
        let csv = format!("{HEADER}Acme Bank,001,CT-123,10000,500,24,2024-01-01,2.0,2.3\n");
        let records = parse_loan_records(&csv).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.lender, "Acme Bank");
        assert_eq!(r.contract_id, "CT-123");
        assert_eq!(r.terms.term, 24);
        assert_eq!(r.informed_rate, Some(0.02));
        assert_eq!(r.informed_cost_of_credit, Some(0.023));
    }

    #[test]
    fn test_parse_row_without_rates() {
        let csv = format!("{HEADER}Acme Bank,001,CT-124,8000,450,20,2023-06-15,,\n");
        let records = parse_loan_records(&csv).unwrap();

        assert_eq!(records[0].informed_rate, None);
        assert_eq!(records[0].informed_cost_of_credit, None);
    }

    #[test]
    fn test_rejects_bad_date() {
        let csv = format!("{HEADER}Acme Bank,001,CT-125,8000,450,20,15/06/2023,,\n");
        assert!(parse_loan_records(&csv).is_err());
    }

    #[test]
    fn test_rejects_invalid_terms() {
        let csv = format!("{HEADER}Acme Bank,001,CT-126,-8000,450,20,2023-06-15,,\n");
        assert!(parse_loan_records(&csv).is_err());
    }
}
