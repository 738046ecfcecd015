//! Amortization table generator

use super::row::{AmortizationRow, AmortizationSchedule};
use crate::error::EngineError;
use crate::loan::PERIOD_DAYS;
use chrono::{Duration, NaiveDate};

/// Generate the period-by-period amortization table for a loan
///
/// Each period's date is `start_date + 30 * (i - 1)` days (the engine-wide
/// fixed-period approximation). Interest accrues on the running balance;
/// the remainder of the installment is recorded as the principal portion,
/// and the balance is floored at zero when an installment overshoots
/// (possible when payment and rate are inconsistent with the term).
///
/// The schedule always has exactly `term` rows.
pub fn amortization_schedule(
    principal: f64,
    payment: f64,
    term: u32,
    rate: f64,
    start_date: NaiveDate,
) -> Result<AmortizationSchedule, EngineError> {
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
    if !rate.is_finite() {
        return Err(EngineError::invalid("rate must be finite"));
    }

    let mut balance = principal;
    let mut rows = Vec::with_capacity(term as usize);

    for period in 1..=term {
        let date = start_date + Duration::days(PERIOD_DAYS * (period as i64 - 1));
        let interest = balance * rate;
        let amortized = payment - interest;
        balance = (balance - amortized).max(0.0);

        rows.push(AmortizationRow {
            period,
            date,
            payment,
            interest,
            principal: amortized,
            balance,
        });
    }

    Ok(AmortizationSchedule::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{annuity, rate::estimate_rate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_length_matches_term() {
        let schedule =
            amortization_schedule(10_000.0, 500.0, 24, 0.015, date(2024, 1, 1)).unwrap();
        assert_eq!(schedule.len(), 24);
    }

    #[test]
    fn test_consistent_inputs_zero_out_balance() {
        // Payment derived from the rate amortizes to exactly zero
        let rate = 0.02;
        let pmt = annuity::payment(rate, 36, 50_000.0);
        let schedule = amortization_schedule(50_000.0, pmt, 36, rate, date(2024, 1, 1)).unwrap();

        assert!(schedule.final_balance().abs() < 1e-6);
    }

    #[test]
    fn test_balance_non_increasing_and_non_negative() {
        let schedule =
            amortization_schedule(10_000.0, 500.0, 24, 0.01, date(2024, 1, 1)).unwrap();

        let mut prev = f64::INFINITY;
        for row in &schedule {
            assert!(row.balance <= prev + 1e-9);
            assert!(row.balance >= 0.0);
            prev = row.balance;
        }
    }

    #[test]
    fn test_row_invariant_interest_plus_principal() {
        let schedule =
            amortization_schedule(10_000.0, 500.0, 24, 0.01, date(2024, 1, 1)).unwrap();

        for row in &schedule {
            assert!((row.interest + row.principal - row.payment).abs() < 1e-9);
        }
    }

    #[test]
    fn test_overshooting_payment_floors_balance() {
        // Oversized payment retires the loan at row 2; the full principal
        // portion is still recorded and the balance is floored at zero
        let schedule =
            amortization_schedule(1_000.0, 600.0, 3, 0.01, date(2024, 1, 1)).unwrap();

        assert_eq!(schedule.len(), 3);
        let rows = schedule.rows();

        assert!((rows[0].balance - 410.0).abs() < 1e-9);
        assert!((rows[1].principal - (600.0 - 410.0 * 0.01)).abs() < 1e-9);
        assert_eq!(rows[1].balance, 0.0);

        // Rows after payoff accrue no interest but keep the row identity
        assert!(rows[2].interest.abs() < 1e-12);
        assert!((rows[2].interest + rows[2].principal - rows[2].payment).abs() < 1e-9);
        assert_eq!(rows[2].balance, 0.0);
    }

    #[test]
    fn test_period_dates_step_thirty_days() {
        let schedule =
            amortization_schedule(10_000.0, 500.0, 3, 0.01, date(2024, 1, 1)).unwrap();

        assert_eq!(schedule.rows()[0].date, date(2024, 1, 1));
        assert_eq!(schedule.rows()[1].date, date(2024, 1, 31));
        assert_eq!(schedule.rows()[2].date, date(2024, 3, 1));
    }

    #[test]
    fn test_zero_rate_schedule_is_linear() {
        let schedule =
            amortization_schedule(1_200.0, 100.0, 12, 0.0, date(2024, 1, 1)).unwrap();

        for row in &schedule {
            assert!(row.interest.abs() < 1e-12);
        }
        assert!(schedule.final_balance().abs() < 1e-9);
    }

    #[test]
    fn test_estimated_rate_round_trips_through_schedule() {
        // End-to-end: estimate the rate, then amortize with it
        let rate = estimate_rate(10_000.0, 500.0, 24);
        let schedule =
            amortization_schedule(10_000.0, 500.0, 24, rate, date(2024, 1, 1)).unwrap();

        assert_eq!(schedule.len(), 24);
        assert!(schedule.final_balance().abs() < 1e-3);
    }

    #[test]
    fn test_rejects_contract_violations() {
        let start = date(2024, 1, 1);
        assert!(amortization_schedule(0.0, 500.0, 24, 0.01, start).is_err());
        assert!(amortization_schedule(10_000.0, -1.0, 24, 0.01, start).is_err());
        assert!(amortization_schedule(10_000.0, 500.0, 0, 0.01, start).is_err());
        assert!(amortization_schedule(10_000.0, 500.0, 24, f64::NAN, start).is_err());
    }
}
