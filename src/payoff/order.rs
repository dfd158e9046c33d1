use rust_decimal::prelude::ToPrimitive;

use crate::models::{Debt, Strategy};

/// Return `debts` in the order `strategy` would attack them.
///
/// The input is left untouched and ties keep their original relative order.
pub fn order(debts: &[Debt], strategy: Strategy) -> Vec<Debt> {
    let mut ordered = debts.to_vec();
    match strategy {
        Strategy::Avalanche => ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate)),
        Strategy::Snowball => ordered.sort_by(|a, b| a.balance.cmp(&b.balance)),
        Strategy::Balanced => {
            ordered.sort_by(|a, b| balanced_score(b).total_cmp(&balanced_score(a)))
        }
    }
    ordered
}

/// The debt that receives the extra payment: first unpaid one in strategy order.
pub fn focus(debts: &[Debt], strategy: Strategy) -> Option<Debt> {
    order(debts, strategy)
        .into_iter()
        .find(|d| !d.is_paid_off())
}

/// `rate / sqrt(balance)`. Paid-off debts, and amounts that do not fit an
/// `f64`, score lowest so they sink to the end.
pub(crate) fn balanced_score(debt: &Debt) -> f64 {
    match (debt.balance.to_f64(), debt.interest_rate.to_f64()) {
        (Some(balance), Some(rate)) if balance > 0.0 => rate / balance.sqrt(),
        _ => f64::NEG_INFINITY,
    }
}
