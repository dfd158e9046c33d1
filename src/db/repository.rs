use anyhow::Result;

use crate::models::Debt;

/// Storage for the user's debts. The planner only ever needs these five
/// operations, so the TUI and CLI talk to this trait rather than to SQL.
pub(crate) trait DebtRepository {
    fn list_debts(&self) -> Result<Vec<Debt>>;
    fn get_debt(&self, id: &str) -> Result<Option<Debt>>;
    /// Stores `debt` under a fresh id derived from its name and returns that id.
    fn create_debt(&mut self, debt: &Debt) -> Result<String>;
    /// Returns `false` when no debt has `debt.id`.
    fn update_debt(&mut self, debt: &Debt) -> Result<bool>;
    fn delete_debt(&mut self, id: &str) -> Result<bool>;
}
