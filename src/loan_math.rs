//! Loan Arithmetic
//!
//! Amortization helpers behind the loans table.

/// Monthly payment for a fixed-rate loan.
///
/// `None` unless principal, rate and term are all positive.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, years: f64) -> Option<f64> {
    if !(principal > 0.0 && annual_rate_pct > 0.0 && years > 0.0) {
        return None;
    }
    let r = annual_rate_pct / 100.0 / 12.0;
    let n = years * 12.0;
    let growth = (1.0 + r).powf(n);
    Some(principal * (r * growth) / (growth - 1.0))
}

/// Payments left on `balance` at `payment` per month.
///
/// `None` when the payment does not cover the monthly interest.
pub fn remaining_payments(balance: f64, annual_rate_pct: f64, payment: f64) -> Option<u32> {
    if !(balance > 0.0 && annual_rate_pct > 0.0 && payment > 0.0) {
        return None;
    }
    let r = annual_rate_pct / 100.0 / 12.0;
    let interest = balance * r;
    if interest >= payment {
        return None;
    }
    let n = -(1.0 - interest / payment).ln() / (1.0 + r).ln();
    // absorb float noise so an exact term is not rounded up a month
    n.is_finite().then(|| (n - 1e-9).ceil() as u32)
}

/// Percent of the original amount already repaid, clamped to [0, 100].
pub fn loan_progress(amount: f64, balance: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    ((amount - balance) / amount * 100.0).clamp(0.0, 100.0)
}
