//! Borrower age calculation and the age-based eligibility rule
//!
//! Age is split into whole years and a residual month count in [0, 11].
//! The two components are computed by separate rules that match the
//! reference workbook:
//! - years compare the full (month, day) tuple against the birthday
//! - months use full-month arithmetic with a day-only adjustment, then
//!   reduce modulo 12
//!
//! Near month/day boundaries the two rules can disagree by one unit. That
//! behavior is intentional and must be kept until the eligibility rule
//! itself is redesigned.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default eligibility ceiling: 79 years and 8 months, in total months
pub const DEFAULT_MAX_AGE_MONTHS: i32 = 79 * 12 + 8;

/// Whole-year / residual-month age at a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeResult {
    /// Completed years
    pub years: i32,

    /// Residual months, always in [0, 11]
    pub months: u32,
}

impl AgeResult {
    /// Total age expressed in months (years*12 + months)
    pub fn total_months(&self) -> i32 {
        self.years * 12 + self.months as i32
    }
}

/// Compute the borrower's age at `reference`, as (years, months)
pub fn age_between(birth: NaiveDate, reference: NaiveDate) -> AgeResult {
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    let mut months = (reference.year() - birth.year()) * 12
        + reference.month() as i32
        - birth.month() as i32;
    if reference.day() < birth.day() {
        months -= 1;
    }
    let months = months.rem_euclid(12) as u32;

    AgeResult { years, months }
}

/// Maximum borrower age, in total months, at the final installment date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRule {
    /// Inclusive ceiling on `AgeResult::total_months`
    pub max_total_months: i32,
}

impl EligibilityRule {
    /// Rule with an explicit ceiling in total months
    pub fn new(max_total_months: i32) -> Self {
        Self { max_total_months }
    }

    /// A loan is eligible while the borrower's age stays at or under the ceiling
    pub fn is_eligible(&self, age: &AgeResult) -> bool {
        age.total_months() <= self.max_total_months
    }
}

impl Default for EligibilityRule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE_MONTHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_before_birthday() {
        let age = age_between(date(1945, 3, 10), date(2024, 3, 9));
        assert_eq!(age, AgeResult { years: 78, months: 11 });
    }

    #[test]
    fn test_on_birthday() {
        let age = age_between(date(1945, 3, 10), date(2024, 3, 10));
        assert_eq!(age, AgeResult { years: 79, months: 0 });
    }

    #[test]
    fn test_day_after_birthday() {
        let age = age_between(date(1945, 3, 10), date(2024, 3, 11));
        assert_eq!(age, AgeResult { years: 79, months: 0 });
    }

    #[test]
    fn test_one_day_boundary_shifts() {
        let before = age_between(date(1945, 3, 10), date(2024, 3, 9));
        let on = age_between(date(1945, 3, 10), date(2024, 3, 10));
        assert_eq!(on.years - before.years, 1);
        // Months wrap from 11 back to 0 across the birthday
        assert_eq!(before.months, 11);
        assert_eq!(on.months, 0);
    }

    #[test]
    fn test_mid_year_age() {
        let age = age_between(date(1960, 6, 15), date(2024, 9, 20));
        assert_eq!(age, AgeResult { years: 64, months: 3 });
    }

    #[test]
    fn test_total_months() {
        let age = AgeResult { years: 79, months: 8 };
        assert_eq!(age.total_months(), 956);
    }

    #[test]
    fn test_eligibility_at_threshold() {
        let rule = EligibilityRule::default();
        assert!(rule.is_eligible(&AgeResult { years: 79, months: 8 }));
        assert!(!rule.is_eligible(&AgeResult { years: 79, months: 9 }));
        assert!(rule.is_eligible(&AgeResult { years: 40, months: 0 }));
    }

    #[test]
    fn test_eligibility_one_day_past_month_boundary() {
        // Borrower turns 79y8m on 2024-11-10; a day earlier they are 79y7m
        let rule = EligibilityRule::default();
        let birth = date(1945, 3, 10);

        let at_boundary = age_between(birth, date(2024, 11, 10));
        assert_eq!(at_boundary, AgeResult { years: 79, months: 8 });
        assert!(rule.is_eligible(&at_boundary));

        let next_month = age_between(birth, date(2024, 12, 10));
        assert_eq!(next_month, AgeResult { years: 79, months: 9 });
        assert!(!rule.is_eligible(&next_month));
    }
}
