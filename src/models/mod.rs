mod debt;
mod simulation;
mod strategy;

pub use debt::{slugify, Debt, DebtKind};
pub use simulation::{Savings, SimulationResult};
pub use strategy::Strategy;

#[cfg(test)]
mod tests;
