use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::payoff::{InputProblem, PayoffError};

static NON_SLUG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("[^a-z0-9]+").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtKind {
    CreditCard,
    PersonalLoan,
    StudentLoan,
    AutoLoan,
    Mortgage,
    Medical,
    Other,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::PersonalLoan => "Personal Loan",
            Self::StudentLoan => "Student Loan",
            Self::AutoLoan => "Auto Loan",
            Self::Mortgage => "Mortgage",
            Self::Medical => "Medical",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "credit card" | "creditcard" | "credit" | "card" => Self::CreditCard,
            "personal loan" | "personal" | "loan" => Self::PersonalLoan,
            "student loan" | "student" => Self::StudentLoan,
            "auto loan" | "auto" | "car" => Self::AutoLoan,
            "mortgage" | "home" => Self::Mortgage,
            "medical" => Self::Medical,
            _ => Self::Other,
        }
    }

    pub fn all() -> &'static [DebtKind] {
        &[
            Self::CreditCard,
            Self::PersonalLoan,
            Self::StudentLoan,
            Self::AutoLoan,
            Self::Mortgage,
            Self::Medical,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for DebtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single debt as entered by the user. Amounts are currency values,
/// `interest_rate` is a nominal annual percentage (`18` means 18%).
#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub kind: DebtKind,
    pub balance: Decimal,
    pub minimum_payment: Decimal,
    pub interest_rate: Decimal,
    pub created_at: String,
}

impl Debt {
    pub fn new(
        name: String,
        kind: DebtKind,
        balance: Decimal,
        minimum_payment: Decimal,
        interest_rate: Decimal,
    ) -> Self {
        Self {
            id: String::new(),
            name,
            kind,
            balance,
            minimum_payment,
            interest_rate,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance.is_zero()
    }

    /// Monthly interest accrued on the current balance.
    pub fn monthly_interest(&self) -> Decimal {
        self.balance * self.interest_rate / Decimal::from(1200)
    }

    pub fn validate(&self) -> Result<(), PayoffError> {
        if self.balance < Decimal::ZERO
            || self.minimum_payment < Decimal::ZERO
            || self.interest_rate < Decimal::ZERO
        {
            return Err(PayoffError::InvalidInput(InputProblem::NegativeAmount));
        }
        Ok(())
    }

    /// Find a debt by id, falling back to a case-insensitive name match.
    pub fn find<'a>(debts: &'a [Debt], key: &str) -> Option<&'a Debt> {
        debts.iter().find(|d| d.id == key).or_else(|| {
            let lower = key.to_lowercase();
            debts.iter().find(|d| d.name.to_lowercase() == lower)
        })
    }
}

/// Turn a display name into an id: lowercase ASCII words joined by `-`.
/// e.g. `"Chase Sapphire (Visa)"` → `"chase-sapphire-visa"`
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = match NON_SLUG.as_ref() {
        Some(re) => re.replace_all(&lower, "-").into_owned(),
        None => lower.replace(' ', "-"),
    };
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "debt".to_string()
    } else {
        slug
    }
}
