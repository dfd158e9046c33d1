#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Avalanche,
    Snowball,
    Balanced,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avalanche => "avalanche",
            Self::Snowball => "snowball",
            Self::Balanced => "balanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "avalanche" | "av" | "rate" => Some(Self::Avalanche),
            "snowball" | "sb" | "balance" => Some(Self::Snowball),
            "balanced" | "blend" | "hybrid" => Some(Self::Balanced),
            _ => None,
        }
    }

    pub fn all() -> &'static [Strategy] {
        &[Self::Avalanche, Self::Snowball, Self::Balanced]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Avalanche => "Highest interest rate first",
            Self::Snowball => "Smallest balance first",
            Self::Balanced => "Blend of rate and balance",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Avalanche => Self::Snowball,
            Self::Snowball => Self::Balanced,
            Self::Balanced => Self::Avalanche,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}
