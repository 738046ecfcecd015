//! Loan value objects and input loading

mod terms;
pub mod loader;

pub use terms::{Borrower, LoanRecord, LoanTerms, PERIOD_DAYS};
pub use loader::load_loan_records;
