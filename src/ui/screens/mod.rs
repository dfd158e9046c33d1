pub(crate) mod dashboard;
pub(crate) mod debts;
pub(crate) mod strategies;
