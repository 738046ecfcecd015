//! Loan, lender and borrower value objects
//!
//! All period-date arithmetic lives here. A period is modeled as exactly
//! [`PERIOD_DAYS`] days, not a true calendar month. That approximation is
//! shared by the rate estimator, the schedule generator and the
//! periods-elapsed count, so it is kept as a single named constant.

use crate::error::EngineError;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed period length in days (30-day-month approximation)
pub const PERIOD_DAYS: i64 = 30;

/// Cash-flow terms of a single installment loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Financed amount
    pub principal: f64,

    /// Fixed installment amount
    pub payment: f64,

    /// Number of installments
    pub term: u32,

    /// Date of the first installment
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// Validate and construct loan terms
    ///
    /// Enforces principal > 0, payment > 0 and term >= 1 up front, so the
    /// downstream formulas never see out-of-contract values.
    pub fn new(
        principal: f64,
        payment: f64,
        term: u32,
        start_date: NaiveDate,
    ) -> Result<Self, EngineError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(EngineError::invalid(format!(
                "principal must be positive, got {principal}"
            )));
        }
        if !payment.is_finite() || payment <= 0.0 {
            return Err(EngineError::invalid(format!(
                "payment must be positive, got {payment}"
            )));
        }
        if term < 1 {
            return Err(EngineError::invalid("term must be at least 1 period"));
        }

        Ok(Self { principal, payment, term, start_date })
    }

    /// Calendar date of the i-th installment (1-based)
    pub fn period_date(&self, period: u32) -> NaiveDate {
        self.start_date + Duration::days(PERIOD_DAYS * (period as i64 - 1))
    }

    /// Date of the final installment
    pub fn final_date(&self) -> NaiveDate {
        self.period_date(self.term)
    }

    /// Number of installments already due on `as_of`
    ///
    /// The start date itself counts as the first installment, matching the
    /// reference workbook's paid-installment count.
    pub fn periods_elapsed(&self, as_of: NaiveDate) -> u32 {
        (0..self.term)
            .filter(|&i| self.start_date + Duration::days(PERIOD_DAYS * i as i64) <= as_of)
            .count() as u32
    }

    /// Installments still outstanding on `as_of`
    pub fn periods_remaining(&self, as_of: NaiveDate) -> u32 {
        self.term - self.periods_elapsed(as_of)
    }
}

/// Borrower identity and the portability rate quoted to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub name: String,

    pub birth_date: NaiveDate,

    /// Periodic rate offered for portability, as a fraction (0 disables
    /// the portability comparison)
    pub portability_rate: f64,
}

/// One loan contract as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Lender display name
    pub lender: String,

    /// Lender clearing/institution code
    pub lender_code: String,

    /// Contract identifier at the lender
    pub contract_id: String,

    pub terms: LoanTerms,

    /// Contractual periodic rate, when the borrower knows it; None means
    /// the engine estimates it from the cash flows
    pub informed_rate: Option<f64>,

    /// Contractual total-cost-of-credit periodic rate, when known
    pub informed_cost_of_credit: Option<f64>,
}
