//! Amortization schedule output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One installment period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Period index, 1-based
    pub period: u32,

    /// Installment date
    pub date: NaiveDate,

    /// Installment amount
    pub payment: f64,

    /// Interest portion of the installment
    pub interest: f64,

    /// Principal portion of the installment
    pub principal: f64,

    /// Outstanding balance after the installment
    pub balance: f64,
}

/// Full period-by-period amortization table, one row per installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub(crate) fn new(rows: Vec<AmortizationRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AmortizationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Balance after the last installment
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.balance).unwrap_or(0.0)
    }

    /// Interest paid over the whole schedule
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    /// Principal amortized over the whole schedule
    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationRow;
    type IntoIter = std::slice::Iter<'a, AmortizationRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
