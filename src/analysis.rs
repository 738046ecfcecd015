//! Per-loan derived analysis and multi-loan consolidation
//!
//! Pulls the individual calculators together for one loan: effective rate
//! (informed or estimated), outstanding balance, portability comparison,
//! cost of credit and the age-based eligibility flag. The engine stays
//! stateless; consolidation runs over a caller-owned slice of analyses.

use crate::age::{age_between, AgeResult, EligibilityRule};
use crate::error::EngineError;
use crate::loan::{Borrower, LoanRecord};
use crate::rate::estimate_rate;
use crate::{annuity, rate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Principal haircut applied when estimating the cost-of-credit rate,
/// modeling a fixed origination fee
pub const DEFAULT_COST_OF_CREDIT_HAIRCUT: f64 = 0.97;

/// Inputs shared by every loan analyzed in one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Reference date for the periods-elapsed count
    pub as_of: NaiveDate,

    /// Age ceiling applied at the final installment date
    pub eligibility: EligibilityRule,

    /// Fraction of the principal assumed actually disbursed after fees
    pub cost_of_credit_haircut: f64,
}

impl AnalysisConfig {
    /// Config with the default eligibility rule and fee haircut
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            eligibility: EligibilityRule::default(),
            cost_of_credit_haircut: DEFAULT_COST_OF_CREDIT_HAIRCUT,
        }
    }
}

/// Everything derived from a single loan contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub lender: String,
    pub lender_code: String,
    pub contract_id: String,

    /// Rate used in all downstream calculations: the informed rate when
    /// supplied, otherwise the estimate from the cash flows
    pub effective_rate: f64,

    /// Rate estimated from the cash flows, kept for comparison
    pub estimated_rate: f64,

    /// True when the solver could not converge and `estimated_rate` is the
    /// fixed fallback substitution rather than a genuine estimate
    pub rate_estimate_degraded: bool,

    /// Estimated minus informed rate, in percentage points (0 when no
    /// rate was informed)
    pub rate_difference_pp: f64,

    /// Total-cost-of-credit periodic rate: informed, or estimated against
    /// the fee-reduced principal
    pub cost_of_credit: f64,

    pub periods_elapsed: u32,
    pub periods_remaining: u32,

    /// Present value of the remaining installments at the effective rate;
    /// zero once the loan is fully elapsed
    pub outstanding_balance: f64,

    /// Portability rate the comparison was run at
    pub portability_rate: f64,

    /// Installment that amortizes the outstanding balance over the
    /// remaining periods at the portability rate; None when the
    /// comparison does not apply
    pub portability_payment: Option<f64>,

    /// Borrower age at the final installment date
    pub age_at_final: AgeResult,

    pub eligible: bool,
}

/// Analyze one loan contract for a borrower
pub fn analyze_loan(
    record: &LoanRecord,
    borrower: &Borrower,
    config: &AnalysisConfig,
) -> Result<LoanAnalysis, EngineError> {
    if !(0.0..=1.0).contains(&config.cost_of_credit_haircut) {
        return Err(EngineError::invalid(format!(
            "cost-of-credit haircut must be in [0, 1], got {}",
            config.cost_of_credit_haircut
        )));
    }

    let terms = &record.terms;

    let estimate = rate::try_estimate_rate(terms.principal, terms.payment, terms.term);
    let rate_estimate_degraded = estimate.is_err();
    let estimated_rate = estimate.unwrap_or(rate::FALLBACK_RATE);
    let effective_rate = record.informed_rate.unwrap_or(estimated_rate);
    let rate_difference_pp = record
        .informed_rate
        .map(|informed| (estimated_rate - informed) * 100.0)
        .unwrap_or(0.0);

    let cost_of_credit = record.informed_cost_of_credit.unwrap_or_else(|| {
        estimate_rate(
            terms.principal * config.cost_of_credit_haircut,
            terms.payment,
            terms.term,
        )
    });

    let periods_elapsed = terms.periods_elapsed(config.as_of);
    let periods_remaining = terms.term - periods_elapsed;

    let outstanding_balance = if periods_remaining > 0 {
        annuity::present_value(effective_rate, periods_remaining, terms.payment)
    } else {
        0.0
    };

    let portability_rate = borrower.portability_rate;
    let portability_payment =
        if portability_rate > 0.0 && outstanding_balance > 0.0 && periods_remaining > 0 {
            Some(annuity::payment(portability_rate, periods_remaining, outstanding_balance))
        } else {
            None
        };

    let age_at_final = age_between(borrower.birth_date, terms.final_date());
    let eligible = config.eligibility.is_eligible(&age_at_final);

    Ok(LoanAnalysis {
        lender: record.lender.clone(),
        lender_code: record.lender_code.clone(),
        contract_id: record.contract_id.clone(),
        effective_rate,
        estimated_rate,
        rate_estimate_degraded,
        rate_difference_pp,
        cost_of_credit,
        periods_elapsed,
        periods_remaining,
        outstanding_balance,
        portability_rate,
        portability_payment,
        age_at_final,
        eligible,
    })
}

/// Totals across a caller-owned set of analyzed loans
///
/// Balance and payment totals cover eligible loans only, matching the
/// consolidated report the analyses feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    pub eligible_count: usize,
    pub rejected_count: usize,
    pub total_outstanding_balance: f64,
    pub total_portability_payment: f64,
}

/// Consolidate previously analyzed loans
pub fn consolidate(analyses: &[LoanAnalysis]) -> ConsolidatedReport {
    let eligible: Vec<&LoanAnalysis> = analyses.iter().filter(|a| a.eligible).collect();

    ConsolidatedReport {
        eligible_count: eligible.len(),
        rejected_count: analyses.len() - eligible.len(),
        total_outstanding_balance: eligible.iter().map(|a| a.outstanding_balance).sum(),
        total_portability_payment: eligible
            .iter()
            .filter_map(|a| a.portability_payment)
            .sum(),
    }
}
