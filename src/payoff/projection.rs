use rust_decimal::Decimal;

use super::error::{InputProblem, PayoffError, Result};
use super::simulate::{simulate, Blend};
use crate::models::{Debt, Savings};

/// Longest payoff, in months, that gets a month-by-month curve.
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// Remaining aggregate balance at the end of each month, using the same
/// blended rate as [`simulate`]. Has exactly `simulate(..).months` entries
/// and the last one is always zero.
///
/// Payoffs longer than [`MAX_PROJECTION_MONTHS`] fail with `OutOfRange`
/// rather than building a curve with billions of points.
pub fn projection(debts: &[Debt], extra: Decimal) -> Result<Vec<Decimal>> {
    let Some(blend) = Blend::from_debts(debts, extra)? else {
        return Ok(Vec::new());
    };
    let months = blend.months()?;
    if months > MAX_PROJECTION_MONTHS {
        return Err(InputProblem::OutOfRange.into());
    }

    let growth = Decimal::ONE + blend.monthly_rate;
    let mut balance = blend.total_balance;
    let mut points = Vec::with_capacity(months as usize);
    for month in 1..=months {
        balance = if month == months {
            Decimal::ZERO
        } else {
            (balance * growth - blend.monthly_payment).max(Decimal::ZERO)
        };
        points.push(balance.round_dp(2));
    }
    Ok(points)
}

/// What paying `extra` on top of the minimums saves.
///
/// `Ok(None)` when minimums alone never clear the debt, so there is no
/// baseline to compare against.
pub fn compare_with_minimums(debts: &[Debt], extra: Decimal) -> Result<Option<Savings>> {
    let baseline = match simulate(debts, Decimal::ZERO) {
        Ok(r) => r,
        Err(PayoffError::InvalidInput(
            InputProblem::NonPositivePayment | InputProblem::PaymentBelowInterest,
        )) => return Ok(None),
        Err(e) => return Err(e),
    };
    let with_extra = simulate(debts, extra)?;

    Ok(Some(Savings {
        months_saved: baseline.months.saturating_sub(with_extra.months),
        interest_saved: (baseline.total_interest - with_extra.total_interest)
            .max(Decimal::ZERO),
    }))
}
