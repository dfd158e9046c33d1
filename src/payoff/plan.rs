use rust_decimal::Decimal;

use super::error::PayoffError;
use super::order::order;
use super::projection::{compare_with_minimums, projection};
use super::simulate::simulate;
use crate::models::{Debt, Savings, SimulationResult, Strategy};

/// Everything the dashboard and `payoff plan` show, computed in one pass
/// from the current debts and settings.
#[derive(Debug, Clone)]
pub struct Plan {
    pub strategy: Strategy,
    pub extra_payment: Decimal,
    pub ordered: Vec<Debt>,
    pub result: Result<SimulationResult, PayoffError>,
    pub projection: Vec<Decimal>,
    pub savings: Option<Savings>,
}

impl Plan {
    pub fn build(debts: &[Debt], extra_payment: Decimal, strategy: Strategy) -> Self {
        let result = simulate(debts, extra_payment);
        let (projection, savings) = if result.is_ok() {
            (
                projection(debts, extra_payment).unwrap_or_default(),
                compare_with_minimums(debts, extra_payment).ok().flatten(),
            )
        } else {
            (Vec::new(), None)
        };

        Self {
            strategy,
            extra_payment,
            ordered: order(debts, strategy),
            result,
            projection,
            savings,
        }
    }

    /// First unpaid debt in strategy order.
    pub fn focus(&self) -> Option<&Debt> {
        self.ordered.iter().find(|d| !d.is_paid_off())
    }

    pub fn total_balance(&self) -> Decimal {
        self.ordered.iter().map(|d| d.balance).sum()
    }

    pub fn total_minimums(&self) -> Decimal {
        self.ordered.iter().map(|d| d.minimum_payment).sum()
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::build(&[], Decimal::ZERO, Strategy::default())
    }
}
