#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_debt(name: &str, balance: Decimal) -> Debt {
    Debt::new(name.into(), DebtKind::CreditCard, balance, dec!(50), dec!(19.99))
}

// ── Debt ──────────────────────────────────────────────────────

#[test]
fn test_debt_new_defaults() {
    let debt = make_debt("Visa", dec!(1200));
    assert!(debt.id.is_empty());
    assert_eq!(debt.name, "Visa");
    assert_eq!(debt.kind, DebtKind::CreditCard);
    assert!(!debt.created_at.is_empty());
}

#[test]
fn test_paid_off() {
    assert!(make_debt("Visa", Decimal::ZERO).is_paid_off());
    assert!(!make_debt("Visa", dec!(0.01)).is_paid_off());
}

#[test]
fn test_monthly_interest() {
    let debt = Debt::new(
        "Loan".into(),
        DebtKind::PersonalLoan,
        dec!(12000),
        dec!(300),
        dec!(12),
    );
    assert_eq!(debt.monthly_interest(), dec!(120));
}

#[test]
fn test_validate_rejects_negatives() {
    assert!(make_debt("ok", dec!(100)).validate().is_ok());
    assert!(make_debt("bad", dec!(-1)).validate().is_err());

    let mut debt = make_debt("bad", dec!(100));
    debt.minimum_payment = dec!(-5);
    assert!(debt.validate().is_err());

    let mut debt = make_debt("bad", dec!(100));
    debt.interest_rate = dec!(-0.5);
    assert!(debt.validate().is_err());
}

#[test]
fn test_find_by_id_then_name() {
    let mut a = make_debt("Chase Visa", dec!(100));
    a.id = "chase-visa".into();
    let mut b = make_debt("Car", dec!(100));
    b.id = "car".into();
    let debts = vec![a, b];

    assert_eq!(Debt::find(&debts, "car").unwrap().name, "Car");
    assert_eq!(Debt::find(&debts, "CHASE VISA").unwrap().id, "chase-visa");
    assert!(Debt::find(&debts, "mortgage").is_none());
}

// ── slugify ───────────────────────────────────────────────────

#[test]
fn test_slugify() {
    assert_eq!(slugify("Visa Card"), "visa-card");
    assert_eq!(slugify("  Chase Sapphire (Visa) "), "chase-sapphire-visa");
    assert_eq!(slugify("Student loan #2"), "student-loan-2");
}

#[test]
fn test_slugify_empty_falls_back() {
    assert_eq!(slugify(""), "debt");
    assert_eq!(slugify("!!!"), "debt");
}

// ── DebtKind ──────────────────────────────────────────────────

#[test]
fn test_debt_kind_parse() {
    assert_eq!(DebtKind::parse("credit card"), DebtKind::CreditCard);
    assert_eq!(DebtKind::parse("CARD"), DebtKind::CreditCard);
    assert_eq!(DebtKind::parse("student"), DebtKind::StudentLoan);
    assert_eq!(DebtKind::parse("car"), DebtKind::AutoLoan);
    assert_eq!(DebtKind::parse("Mortgage"), DebtKind::Mortgage);
    assert_eq!(DebtKind::parse("whatever"), DebtKind::Other);
}

#[test]
fn test_debt_kind_roundtrip() {
    for kind in DebtKind::all() {
        assert_eq!(DebtKind::parse(kind.as_str()), *kind, "{kind}");
    }
}

// ── Strategy ──────────────────────────────────────────────────

#[test]
fn test_strategy_parse() {
    assert_eq!(Strategy::parse("avalanche"), Some(Strategy::Avalanche));
    assert_eq!(Strategy::parse("SNOWBALL"), Some(Strategy::Snowball));
    assert_eq!(Strategy::parse(" balanced "), Some(Strategy::Balanced));
    assert_eq!(Strategy::parse("random"), None);
}

#[test]
fn test_strategy_display_and_cycle() {
    assert_eq!(format!("{}", Strategy::Avalanche), "Avalanche");
    assert_eq!(Strategy::default(), Strategy::Avalanche);
    let mut s = Strategy::Avalanche;
    for _ in 0..Strategy::all().len() {
        s = s.next();
    }
    assert_eq!(s, Strategy::Avalanche);
}

// ── SimulationResult ──────────────────────────────────────────

#[test]
fn test_result_decomposes_months() {
    let r = SimulationResult::from_months(70, dec!(1), dec!(450), dec!(25000), dec!(18));
    assert_eq!(r.years, 5);
    assert_eq!(r.remaining_months, 10);
    assert_eq!(r.duration_label(), "5y 10m");
}

#[test]
fn test_duration_labels() {
    assert_eq!(SimulationResult::paid_off(dec!(0)).duration_label(), "debt-free");
    let r = SimulationResult::from_months(11, dec!(0), dec!(1), dec!(1), dec!(0));
    assert_eq!(r.duration_label(), "11m");
    let r = SimulationResult::from_months(24, dec!(0), dec!(1), dec!(1), dec!(0));
    assert_eq!(r.duration_label(), "2y");
}

#[test]
fn test_payoff_month() {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let r = SimulationResult::from_months(3, dec!(0), dec!(1), dec!(1), dec!(0));
    assert_eq!(r.payoff_month(start), "2025-02");
}
