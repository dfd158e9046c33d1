#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn card(name: &str, balance: Decimal) -> Debt {
    Debt::new(name.into(), DebtKind::CreditCard, balance, dec!(35), dec!(24.99))
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.list_debts().unwrap().is_empty());
    assert_eq!(db.get_extra_payment().unwrap(), Decimal::ZERO);
    assert_eq!(db.get_strategy().unwrap(), Strategy::Avalanche);
}

#[test]
fn test_reopen_file_database_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payoff.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.create_debt(&card("Visa", dec!(1200))).unwrap();
        db.set_extra_payment(dec!(150)).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.list_debts().unwrap().len(), 1);
    assert_eq!(db.get_extra_payment().unwrap(), dec!(150));
}

// ── Debt CRUD ─────────────────────────────────────────────────

#[test]
fn test_debt_crud() {
    let mut db = Database::open_in_memory().unwrap();
    let id = db.create_debt(&card("Chase Visa", dec!(2500.50))).unwrap();
    assert_eq!(id, "chase-visa");

    let mut fetched = db.get_debt(&id).unwrap().unwrap();
    assert_eq!(fetched.name, "Chase Visa");
    assert_eq!(fetched.kind, DebtKind::CreditCard);
    assert_eq!(fetched.balance, dec!(2500.50));
    assert_eq!(fetched.minimum_payment, dec!(35));
    assert_eq!(fetched.interest_rate, dec!(24.99));

    fetched.balance = dec!(2000);
    assert!(db.update_debt(&fetched).unwrap());
    assert_eq!(db.get_debt(&id).unwrap().unwrap().balance, dec!(2000));

    assert!(db.delete_debt(&id).unwrap());
    assert!(db.get_debt(&id).unwrap().is_none());
    assert!(!db.delete_debt(&id).unwrap());
}

#[test]
fn test_debt_not_found() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(db.get_debt("nope").unwrap().is_none());
    let mut ghost = card("Ghost", dec!(1));
    ghost.id = "ghost".into();
    assert!(!db.update_debt(&ghost).unwrap());
}

#[test]
fn test_ids_are_unique_per_name() {
    let mut db = Database::open_in_memory().unwrap();
    let a = db.create_debt(&card("Visa", dec!(100))).unwrap();
    let b = db.create_debt(&card("Visa", dec!(200))).unwrap();
    let c = db.create_debt(&card("visa!", dec!(300))).unwrap();
    assert_eq!(a, "visa");
    assert_eq!(b, "visa-2");
    assert_eq!(c, "visa-3");
    assert_eq!(db.list_debts().unwrap().len(), 3);
}

#[test]
fn test_create_rejects_negative_amounts() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(db.create_debt(&card("Bad", dec!(-10))).is_err());
    assert!(db.list_debts().unwrap().is_empty());
}

#[test]
fn test_find_by_name_case_insensitive() {
    let mut db = Database::open_in_memory().unwrap();
    db.create_debt(&card("Amex Gold", dec!(900))).unwrap();
    let found = db.find_debt_by_name("AMEX GOLD").unwrap().unwrap();
    assert_eq!(found.id, "amex-gold");
    assert!(db.find_debt_by_name("Discover").unwrap().is_none());
}

#[test]
fn test_debt_totals() {
    let mut db = Database::open_in_memory().unwrap();
    db.create_debt(&card("A", dec!(1000))).unwrap();
    db.create_debt(&card("B", dec!(250.25))).unwrap();
    let (balance, minimums) = db.debt_totals().unwrap();
    assert_eq!(balance, dec!(1250.25));
    assert_eq!(minimums, dec!(70));
}

// ── Batch upsert ──────────────────────────────────────────────

#[test]
fn test_upsert_creates_and_updates() {
    let mut db = Database::open_in_memory().unwrap();
    let id = db.create_debt(&card("Visa", dec!(1000))).unwrap();

    let batch = vec![card("visa", dec!(800)), card("Car Loan", dec!(9000))];
    let (created, updated) = db.upsert_debts_batch(&batch).unwrap();
    assert_eq!((created, updated), (1, 1));

    let visa = db.get_debt(&id).unwrap().unwrap();
    assert_eq!(visa.balance, dec!(800));
    assert_eq!(visa.name, "Visa");
    assert!(db.get_debt("car-loan").unwrap().is_some());
    assert_eq!(db.list_debts().unwrap().len(), 2);
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn test_extra_payment_setting() {
    let db = Database::open_in_memory().unwrap();
    db.set_extra_payment(dec!(250.50)).unwrap();
    assert_eq!(db.get_extra_payment().unwrap(), dec!(250.50));
    db.set_extra_payment(Decimal::ZERO).unwrap();
    assert_eq!(db.get_extra_payment().unwrap(), Decimal::ZERO);
    assert!(db.set_extra_payment(dec!(-1)).is_err());
}

#[test]
fn test_strategy_setting() {
    let db = Database::open_in_memory().unwrap();
    db.set_strategy(Strategy::Snowball).unwrap();
    assert_eq!(db.get_strategy().unwrap(), Strategy::Snowball);
    db.set_strategy(Strategy::Balanced).unwrap();
    assert_eq!(db.get_strategy().unwrap(), Strategy::Balanced);
}
