use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputProblem {
    #[error("debt amounts and extra payment must not be negative")]
    NegativeAmount,
    #[error("non-positive monthly payment against positive balance")]
    NonPositivePayment,
    #[error("payment insufficient to cover accruing interest")]
    PaymentBelowInterest,
    #[error("amount too large to simulate")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayoffError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputProblem),
}

impl PayoffError {
    pub fn problem(&self) -> InputProblem {
        match self {
            Self::InvalidInput(p) => *p,
        }
    }

    /// Short advice suitable for a status bar or CLI output.
    pub fn hint(&self) -> &'static str {
        match self.problem() {
            InputProblem::NegativeAmount => "Check for negative balances, payments or rates",
            InputProblem::NonPositivePayment | InputProblem::PaymentBelowInterest => {
                "Increase your monthly payment amount"
            }
            InputProblem::OutOfRange => "Amounts are too large",
        }
    }
}

pub type Result<T> = std::result::Result<T, PayoffError>;
