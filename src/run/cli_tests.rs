#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn test_config(dir: &Path) -> Config {
    let data_dir = dir.display().to_string();
    Config::from_lookup(|key| (key == "PAYOFF_DATA_DIR").then(|| data_dir.clone())).unwrap()
}

// ── Argument helpers ──────────────────────────────────────────

#[test]
fn test_flag_value() {
    let a = args(&["plan", "--extra", "200", "--strategy", "snowball"]);
    assert_eq!(flag_value(&a, "--extra"), Some("200"));
    assert_eq!(flag_value(&a, "--strategy"), Some("snowball"));
    assert_eq!(flag_value(&a, "--type"), None);
}

#[test]
fn test_positional_skips_flags_and_values() {
    let a = args(&["Chase", "Visa", "--type", "card", "5000", "150", "22.9"]);
    assert_eq!(positional(&a), vec!["Chase", "Visa", "5000", "150", "22.9"]);
}

#[test]
fn test_parse_add_args_joins_name() {
    let (name, balance, minimum, rate) =
        parse_add_args(&["Chase", "Sapphire", "$5,000", "150", "22.9%"]).unwrap();
    assert_eq!(name, "Chase Sapphire");
    assert_eq!(balance, dec!(5000));
    assert_eq!(minimum, dec!(150));
    assert_eq!(rate, dec!(22.9));
}

#[test]
fn test_parse_add_args_rejects_short_and_bad_input() {
    assert!(parse_add_args(&["Visa", "5000", "150"]).is_err());
    assert!(parse_add_args(&["Visa", "lots", "150", "20"]).is_err());
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/plan.csv"), "/tmp/plan.csv");
    assert_eq!(shellexpand("plan.csv"), "plan.csv");
}

#[test]
fn test_default_export_path_is_dated_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let path = default_export_path(&config);
    let file = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file.starts_with("payoff-plan-"));
    assert!(file.ends_with(".csv"));
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn test_add_update_remove_flow() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut db = Database::open_in_memory().unwrap();

    as_cli(
        &args(&["payoff", "add", "Car", "Loan", "12000", "300", "6.5", "--type", "auto"]),
        &mut db,
        &config,
    )
    .unwrap();
    let car = db.get_debt("car-loan").unwrap().unwrap();
    assert_eq!(car.kind, DebtKind::AutoLoan);
    assert_eq!(car.balance, dec!(12000));

    as_cli(&args(&["payoff", "update", "Car Loan", "11500"]), &mut db, &config).unwrap();
    assert_eq!(db.get_debt("car-loan").unwrap().unwrap().balance, dec!(11500));

    as_cli(&args(&["payoff", "rm", "car-loan"]), &mut db, &config).unwrap();
    assert!(db.list_debts().unwrap().is_empty());
}

#[test]
fn test_remove_unknown_debt_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut db = Database::open_in_memory().unwrap();
    assert!(as_cli(&args(&["payoff", "remove", "nope"]), &mut db, &config).is_err());
}

#[test]
fn test_settings_commands() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut db = Database::open_in_memory().unwrap();

    as_cli(&args(&["payoff", "extra", "125.50"]), &mut db, &config).unwrap();
    assert_eq!(db.get_extra_payment().unwrap(), dec!(125.50));

    as_cli(&args(&["payoff", "strategy", "balanced"]), &mut db, &config).unwrap();
    assert_eq!(db.get_strategy().unwrap(), Strategy::Balanced);

    assert!(as_cli(&args(&["payoff", "strategy", "random"]), &mut db, &config).is_err());
    assert!(as_cli(&args(&["payoff", "extra", "-10"]), &mut db, &config).is_err());
}

#[test]
fn test_plan_reports_unpayable_debt() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut db = Database::open_in_memory().unwrap();
    as_cli(
        &args(&["payoff", "add", "Card", "10000", "10", "24"]),
        &mut db,
        &config,
    )
    .unwrap();

    let err = as_cli(&args(&["payoff", "plan"]), &mut db, &config).unwrap_err();
    assert!(err.to_string().contains("Increase your monthly payment amount"));

    // Enough extra makes it payable
    as_cli(&args(&["payoff", "plan", "--extra", "500"]), &mut db, &config).unwrap();
}

#[test]
fn test_import_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut db = Database::open_in_memory().unwrap();

    let input = dir.path().join("debts.csv");
    std::fs::write(&input, "Visa,5000,150,22.9,card\nCar,12000,300,6.5,auto\n").unwrap();
    let input_arg = input.display().to_string();
    as_cli(&args(&["payoff", "import", &input_arg]), &mut db, &config).unwrap();
    assert_eq!(db.list_debts().unwrap().len(), 2);

    let output = dir.path().join("plan.csv");
    let output_arg = output.display().to_string();
    as_cli(&args(&["payoff", "export", &output_arg]), &mut db, &config).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("rank,id,name"));
    assert!(written.contains("visa"));
}

#[test]
fn test_unknown_command_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut db = Database::open_in_memory().unwrap();
    assert!(as_cli(&args(&["payoff", "frobnicate"]), &mut db, &config).is_err());
    as_cli(&args(&["payoff", "--version"]), &mut db, &config).unwrap();
}

#[test]
fn test_resolve_debt_by_id_then_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut db = Database::open_in_memory().unwrap();
    as_cli(
        &args(&["payoff", "add", "Chase", "Sapphire", "5000", "150", "22.9"]),
        &mut db,
        &config,
    )
    .unwrap();

    assert_eq!(resolve_debt(&db, "chase-sapphire").unwrap().name, "Chase Sapphire");
    assert_eq!(resolve_debt(&db, "CHASE SAPPHIRE").unwrap().id, "chase-sapphire");
    assert!(resolve_debt(&db, "chase").is_err());
}
