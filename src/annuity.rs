//! Closed-form ordinary-annuity formulas
//!
//! Used for outstanding-balance and portability-payment calculations.
//! Both functions have a linear zero-rate branch so a degenerate rate never
//! reaches the rate-in-denominator form.

/// Rates with magnitude under this are treated as zero
pub const ZERO_RATE_EPSILON: f64 = 1e-10;

/// Present value of `periods` level end-of-period payments at `rate`
///
/// `pmt * (1 - (1+r)^-n) / r` for r != 0, `pmt * n` at r == 0.
/// Reported as a non-negative magnitude regardless of sign convention.
pub fn present_value(rate: f64, periods: u32, payment: f64) -> f64 {
    if rate.abs() < ZERO_RATE_EPSILON {
        return (payment * periods as f64).abs();
    }

    let pv = payment * (1.0 - (1.0 + rate).powi(-(periods as i32))) / rate;
    pv.abs()
}

/// Level end-of-period payment that amortizes `present_value` over `periods` at `rate`
///
/// `pv * r * (1+r)^n / ((1+r)^n - 1)` for r != 0, `pv / n` at r == 0.
/// Reported as a non-negative magnitude.
pub fn payment(rate: f64, periods: u32, present_value: f64) -> f64 {
    if rate.abs() < ZERO_RATE_EPSILON {
        return (present_value / periods as f64).abs();
    }

    let growth = (1.0 + rate).powi(periods as i32);
    let pmt = present_value * rate * growth / (growth - 1.0);
    pmt.abs()
}
