//! Loan Engine CLI
//!
//! Runs a sample loan analysis and prints the amortization schedule

use chrono::NaiveDate;
use loan_engine::{
    amortization_schedule, analyze_loan, AnalysisConfig, Borrower, LoanRecord, LoanTerms,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Loan Engine v0.1.0");
    println!("==================\n");

    // Sample contract: 10k over 24 installments of 500
    let terms = LoanTerms::new(
        10_000.0,
        500.0,
        24,
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
    )?;
    let record = LoanRecord {
        lender: "Acme Bank".to_string(),
        lender_code: "001".to_string(),
        contract_id: "CT-2024-001".to_string(),
        terms,
        informed_rate: None,
        informed_cost_of_credit: None,
    };
    let borrower = Borrower {
        name: "Maria".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1958, 7, 22).expect("valid date"),
        portability_rate: 0.014,
    };

    let as_of = NaiveDate::from_ymd_opt(2024, 8, 1).expect("valid date");
    let config = AnalysisConfig::new(as_of);
    let analysis = analyze_loan(&record, &borrower, &config)?;

    println!("Contract: {} ({})", analysis.contract_id, analysis.lender);
    println!("  Principal:        ${:.2}", terms.principal);
    println!("  Installment:      ${:.2} x {}", terms.payment, terms.term);
    println!("  Estimated rate:   {:.4}%/period", analysis.estimated_rate * 100.0);
    println!("  Cost of credit:   {:.4}%/period", analysis.cost_of_credit * 100.0);
    println!("  Elapsed/remaining: {}/{}", analysis.periods_elapsed, analysis.periods_remaining);
    println!("  Outstanding:      ${:.2}", analysis.outstanding_balance);
    if let Some(portability) = analysis.portability_payment {
        println!(
            "  Portability:      ${:.2} at {:.4}%/period",
            portability,
            analysis.portability_rate * 100.0
        );
    }
    println!(
        "  Age at final date: {}y {}m -> {}",
        analysis.age_at_final.years,
        analysis.age_at_final.months,
        if analysis.eligible { "eligible" } else { "not eligible" }
    );
    println!();

    // Full amortization table at the estimated rate
    let schedule = amortization_schedule(
        terms.principal,
        terms.payment,
        terms.term,
        analysis.effective_rate,
        terms.start_date,
    )?;

    println!("Amortization Schedule ({} periods):", schedule.len());
    println!(
        "{:>6} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Period", "Date", "Payment", "Interest", "Principal", "Balance"
    );
    println!("{}", "-".repeat(70));

    for row in &schedule {
        println!(
            "{:>6} {:>12} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
            row.period,
            row.date.to_string(),
            row.payment,
            row.interest,
            row.principal,
            row.balance
        );
    }

    println!("{}", "-".repeat(70));
    println!(
        "{:>19} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
        "Totals:",
        schedule.rows().iter().map(|r| r.payment).sum::<f64>(),
        schedule.total_interest(),
        schedule.total_principal(),
        schedule.final_balance()
    );

    Ok(())
}
