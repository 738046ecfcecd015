//! Implied periodic rate estimation via Newton-Raphson root finding
//!
//! Solves the ordinary-annuity identity `pv = pmt * (1 - (1+r)^-n) / r`
//! for the periodic rate, approximating a spreadsheet RATE() call. The
//! public entry point never fails: inputs with no positive real solution
//! (e.g. `pmt * n < pv`) resolve to a fixed fallback rate.

use thiserror::Error;

/// Substituted when the solver cannot find a rate: 1% per period
pub const FALLBACK_RATE: f64 = 0.01;

/// Initial Newton-Raphson guess
const INITIAL_GUESS: f64 = 0.01;

/// Iteration budget for the Newton-Raphson phase
const MAX_ITERATIONS: u32 = 100;

/// Iteration budget for the bisection fallback phase
const BISECTION_MAX_ITERATIONS: u32 = 200;

/// Convergence tolerance on successive iterate differences
const TOLERANCE: f64 = 1e-12;

/// Rates with magnitude under this use the zero-rate series limit
const RATE_EPSILON: f64 = 1e-9;

/// Upper bound on the periodic rate considered by the solver (1000%/period)
const MAX_RATE: f64 = 10.0;

/// The solver exhausted its iteration budget or found no bracketed root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rate estimation did not converge")]
pub struct NonConvergent;

/// Estimate the periodic rate implied by `pv`, `pmt` and `n` installments
///
/// Never fails: on non-convergence or a domain error the fixed
/// [`FALLBACK_RATE`] is returned and the substitution is logged at debug
/// level. Callers that need to observe the degraded path should use
/// [`try_estimate_rate`] instead.
pub fn estimate_rate(pv: f64, pmt: f64, n: u32) -> f64 {
    match try_estimate_rate(pv, pmt, n) {
        Ok(rate) => rate,
        Err(NonConvergent) => {
            log::debug!(
                "rate estimation failed for pv={pv} pmt={pmt} n={n}, substituting fallback {FALLBACK_RATE}"
            );
            FALLBACK_RATE
        }
    }
}

/// Estimate the periodic rate, surfacing non-convergence to the caller
pub fn try_estimate_rate(pv: f64, pmt: f64, n: u32) -> Result<f64, NonConvergent> {
    if !pv.is_finite() || !pmt.is_finite() || n == 0 {
        return Err(NonConvergent);
    }

    let mut rate = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let (residual, derivative) = residual_and_derivative(pv, pmt, n, rate);

        if !residual.is_finite() || !derivative.is_finite() {
            return bisect_rate(pv, pmt, n);
        }
        if derivative.abs() < 1e-20 {
            // Derivative too small for a stable Newton step
            return bisect_rate(pv, pmt, n);
        }

        let new_rate = (rate - residual / derivative).clamp(0.0, MAX_RATE);

        if (new_rate - rate).abs() < TOLERANCE {
            if let Some(root) = verify_root(pv, pmt, n, new_rate) {
                return Ok(root);
            }
            // Stalled at the clamp boundary without an actual root
            return bisect_rate(pv, pmt, n);
        }

        rate = new_rate;
    }

    bisect_rate(pv, pmt, n)
}

/// Residual `pmt * a(r, n) - pv` and its derivative with respect to the rate
///
/// The annuity factor `a(r, n) = (1 - (1+r)^-n) / r` and its derivative are
/// replaced by their series limits near r = 0 (`a -> n`,
/// `a' -> -n(n+1)/2`) so iteration never divides by a zero rate.
fn residual_and_derivative(pv: f64, pmt: f64, n: u32, rate: f64) -> (f64, f64) {
    let n_f = n as f64;

    if rate.abs() < RATE_EPSILON {
        let factor = n_f - n_f * (n_f + 1.0) / 2.0 * rate;
        let d_factor = -n_f * (n_f + 1.0) / 2.0;
        return (pmt * factor - pv, pmt * d_factor);
    }

    let discount = (1.0 + rate).powi(-(n as i32));
    let factor = (1.0 - discount) / rate;
    let d_factor = (n_f * discount / (1.0 + rate) * rate - (1.0 - discount)) / (rate * rate);

    (pmt * factor - pv, pmt * d_factor)
}

/// Accept a candidate root only if it actually reproduces the present value
fn verify_root(pv: f64, pmt: f64, n: u32, rate: f64) -> Option<f64> {
    let (residual, _) = residual_and_derivative(pv, pmt, n, rate);
    if residual.abs() <= 1e-6 * pv.abs().max(1.0) {
        Some(rate)
    } else {
        None
    }
}

/// Bisection fallback over [0, MAX_RATE]
///
/// The annuity residual is strictly decreasing in the rate, so a sign
/// change over the interval pins down the unique root. No sign change
/// means no non-negative solution exists (e.g. `pmt * n < pv`).
fn bisect_rate(pv: f64, pmt: f64, n: u32) -> Result<f64, NonConvergent> {
    let mut low = 0.0_f64;
    let mut high = MAX_RATE;

    let residual_at = |rate: f64| residual_and_derivative(pv, pmt, n, rate).0;

    let res_low = residual_at(low);
    let res_high = residual_at(high);
    if !res_low.is_finite() || !res_high.is_finite() || res_low * res_high > 0.0 {
        return Err(NonConvergent);
    }

    for _ in 0..BISECTION_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let res_mid = residual_at(mid);

        if res_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return verify_root(pv, pmt, n, mid).ok_or(NonConvergent);
        }

        if res_mid * residual_at(low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    Err(NonConvergent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_known_rate() {
        // Payment computed at 2%/period must estimate back to 2%
        let pmt = annuity::payment(0.02, 24, 10_000.0);
        let rate = estimate_rate(10_000.0, pmt, 24);
        assert_relative_eq!(rate, 0.02, max_relative = 1e-6);
    }

    #[test]
    fn test_annuity_identity_holds() {
        let rate = estimate_rate(10_000.0, 500.0, 24);
        let pv = annuity::present_value(rate, 24, 500.0);
        assert_relative_eq!(pv, 10_000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_zero_rate_case() {
        // pmt * n == pv implies a true rate of zero, not the fallback
        let rate = estimate_rate(12_000.0, 500.0, 24);
        assert!(rate.abs() < 1e-6, "expected ~0, got {rate}");
    }

    #[test]
    fn test_no_positive_solution_falls_back() {
        // pmt * n < pv has no non-negative root
        assert_eq!(estimate_rate(20_000.0, 500.0, 24), FALLBACK_RATE);
        assert_eq!(try_estimate_rate(20_000.0, 500.0, 24), Err(NonConvergent));
    }

    #[test]
    fn test_non_finite_input_falls_back() {
        assert_eq!(estimate_rate(f64::NAN, 500.0, 24), FALLBACK_RATE);
        assert_eq!(estimate_rate(10_000.0, f64::INFINITY, 24), FALLBACK_RATE);
    }

    #[test]
    fn test_zero_term_falls_back() {
        assert_eq!(estimate_rate(10_000.0, 500.0, 0), FALLBACK_RATE);
    }

    #[test]
    fn test_high_rate_converges() {
        // Short high-interest loan: 1000 repaid as 2 x 900
        let rate = estimate_rate(1_000.0, 900.0, 2);
        let pv = annuity::present_value(rate, 2, 900.0);
        assert_relative_eq!(pv, 1_000.0, max_relative = 1e-6);
        assert!(rate > 0.3);
    }

    #[test]
    fn test_long_term_converges() {
        let pmt = annuity::payment(0.008, 360, 250_000.0);
        let rate = estimate_rate(250_000.0, pmt, 360);
        assert_relative_eq!(rate, 0.008, max_relative = 1e-6);
    }

    #[test]
    fn test_single_installment() {
        // 100 now, 105 in one period: rate is exactly 5%
        let rate = estimate_rate(100.0, 105.0, 1);
        assert_relative_eq!(rate, 0.05, max_relative = 1e-6);
    }
}
