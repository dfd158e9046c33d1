use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::error::{InputProblem, Result};
use crate::models::{Debt, SimulationResult};

/// Aggregate view of the unpaid debts: one balance, one payment and one
/// balance-weighted rate. Every debt is treated as if it carried that rate,
/// which is an estimate rather than a per-debt amortization schedule.
#[derive(Debug, Clone)]
pub(crate) struct Blend {
    pub(crate) total_balance: Decimal,
    pub(crate) monthly_payment: Decimal,
    /// Annual percent.
    pub(crate) weighted_rate: Decimal,
    /// Fraction per month, e.g. `0.015` for 18% a year.
    pub(crate) monthly_rate: Decimal,
}

impl Blend {
    /// `Ok(None)` when nothing is owed.
    pub(crate) fn from_debts(debts: &[Debt], extra: Decimal) -> Result<Option<Self>> {
        if extra < Decimal::ZERO {
            return Err(InputProblem::NegativeAmount.into());
        }
        for debt in debts {
            debt.validate()?;
        }

        let mut total_balance = Decimal::ZERO;
        let mut total_minimum = Decimal::ZERO;
        let mut rate_weight = Decimal::ZERO;
        for debt in debts.iter().filter(|d| !d.is_paid_off()) {
            total_balance = checked(total_balance.checked_add(debt.balance))?;
            total_minimum = checked(total_minimum.checked_add(debt.minimum_payment))?;
            let weight = checked(debt.interest_rate.checked_mul(debt.balance))?;
            rate_weight = checked(rate_weight.checked_add(weight))?;
        }

        if total_balance.is_zero() {
            return Ok(None);
        }

        let weighted_rate = rate_weight / total_balance;
        let monthly_payment = checked(total_minimum.checked_add(extra))?;
        if monthly_payment <= Decimal::ZERO {
            return Err(InputProblem::NonPositivePayment.into());
        }

        Ok(Some(Self {
            total_balance,
            monthly_payment,
            weighted_rate,
            monthly_rate: weighted_rate / Decimal::from(1200),
        }))
    }

    /// Months until the aggregate balance reaches zero, rounded up.
    pub(crate) fn months(&self) -> Result<u32> {
        if self.monthly_rate.is_zero() {
            let months = (self.total_balance / self.monthly_payment).ceil();
            return months
                .to_u32()
                .ok_or_else(|| InputProblem::OutOfRange.into());
        }

        let first_interest = checked(self.total_balance.checked_mul(self.monthly_rate))?;
        if self.monthly_payment <= first_interest {
            return Err(InputProblem::PaymentBelowInterest.into());
        }

        // n = -ln(1 - B·r / P) / ln(1 + r)
        let ratio = to_f64(first_interest / self.monthly_payment)?;
        let rate = to_f64(self.monthly_rate)?;
        let months = -(1.0 - ratio).ln() / rate.ln_1p();
        if !months.is_finite() || months < 0.0 || months > f64::from(u32::MAX) {
            return Err(InputProblem::PaymentBelowInterest.into());
        }
        Ok(months.ceil() as u32)
    }
}

/// Estimate months-to-payoff and total interest for `debts` when paying
/// every minimum plus `extra` each month.
///
/// Debts with a zero balance are ignored. Fails with `InvalidInput` instead
/// of returning NaN or infinity when the payment can never clear the debt.
pub fn simulate(debts: &[Debt], extra: Decimal) -> Result<SimulationResult> {
    let Some(blend) = Blend::from_debts(debts, extra)? else {
        return Ok(SimulationResult::paid_off(extra));
    };

    let months = blend.months()?;
    let paid = checked(blend.monthly_payment.checked_mul(Decimal::from(months)))?;
    let total_interest = (paid - blend.total_balance).max(Decimal::ZERO);

    Ok(SimulationResult::from_months(
        months,
        total_interest,
        blend.monthly_payment,
        blend.total_balance,
        blend.weighted_rate,
    ))
}

fn checked(value: Option<Decimal>) -> Result<Decimal> {
    value.ok_or_else(|| InputProblem::OutOfRange.into())
}

fn to_f64(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| InputProblem::OutOfRange.into())
}
