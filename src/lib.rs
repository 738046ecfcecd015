//! Loan Engine - Financial calculation engine for installment loans
//!
//! This library provides:
//! - Implied periodic rate estimation from cash-flow terms (Newton-Raphson)
//! - Closed-form annuity present-value and payment formulas
//! - Period-by-period amortization schedule generation
//! - Borrower age and age-based eligibility screening
//! - Per-loan portability analysis and multi-loan consolidation
//!
//! All calculations are pure, synchronous and stateless; every period is
//! modeled as a fixed 30 days.

pub mod age;
pub mod analysis;
pub mod annuity;
pub mod error;
pub mod loan;
pub mod rate;
pub mod schedule;

// Re-export commonly used types
pub use age::{age_between, AgeResult, EligibilityRule};
pub use analysis::{analyze_loan, consolidate, AnalysisConfig, ConsolidatedReport, LoanAnalysis};
pub use error::EngineError;
pub use loan::{Borrower, LoanRecord, LoanTerms};
pub use rate::{estimate_rate, try_estimate_rate};
pub use schedule::{amortization_schedule, AmortizationRow, AmortizationSchedule};
