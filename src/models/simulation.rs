use rust_decimal::Decimal;

/// Outcome of a payoff simulation. Derived on every change, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub months: u32,
    pub years: u32,
    pub remaining_months: u32,
    pub total_interest: Decimal,
    pub monthly_payment: Decimal,
    pub total_balance: Decimal,
    /// Balance-weighted annual rate, in percent.
    pub weighted_rate: Decimal,
}

impl SimulationResult {
    pub fn from_months(
        months: u32,
        total_interest: Decimal,
        monthly_payment: Decimal,
        total_balance: Decimal,
        weighted_rate: Decimal,
    ) -> Self {
        Self {
            months,
            years: months / 12,
            remaining_months: months % 12,
            total_interest,
            monthly_payment,
            total_balance,
            weighted_rate,
        }
    }

    pub fn paid_off(monthly_payment: Decimal) -> Self {
        Self::from_months(
            0,
            Decimal::ZERO,
            monthly_payment,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }

    /// Human readable duration, e.g. `"5y 8m"`, `"11m"`, `"debt-free"`.
    pub fn duration_label(&self) -> String {
        match (self.years, self.remaining_months) {
            (0, 0) => "debt-free".to_string(),
            (0, m) => format!("{m}m"),
            (y, 0) => format!("{y}y"),
            (y, m) => format!("{y}y {m}m"),
        }
    }

    /// Month (`YYYY-MM`) in which the last payment lands, counting from `start`.
    pub fn payoff_month(&self, start: chrono::NaiveDate) -> String {
        start
            .checked_add_months(chrono::Months::new(self.months))
            .unwrap_or(start)
            .format("%Y-%m")
            .to_string()
    }
}

/// Difference between paying only minimums and paying minimums plus extra.
#[derive(Debug, Clone, PartialEq)]
pub struct Savings {
    pub months_saved: u32,
    pub interest_saved: Decimal,
}
