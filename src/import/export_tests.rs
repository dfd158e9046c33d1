#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::DebtKind;
use rust_decimal_macros::dec;

#[test]
fn test_export_plan_writes_rows_and_summary() {
    let mut visa = Debt::new("Visa".into(), DebtKind::CreditCard, dec!(5000), dec!(150), dec!(22.9));
    visa.id = "visa".into();
    let mut car = Debt::new("Car".into(), DebtKind::AutoLoan, dec!(12000), dec!(250), dec!(6.5));
    car.id = "car".into();
    let result = SimulationResult::from_months(22, dec!(2550), dec!(925), dec!(17000), dec!(11));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.csv");
    let count = export_plan(&path, &[visa, car], Strategy::Avalanche, &result).unwrap();
    assert_eq!(count, 2);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "rank,id,name,type,balance,minimum_payment,interest_rate"
    );
    assert_eq!(lines[1], "1,visa,Visa,Credit Card,5000.00,150.00,22.90");
    assert_eq!(lines[2], "2,car,Car,Auto Loan,12000.00,250.00,6.50");
    assert!(text.contains("strategy,avalanche"));
    assert!(text.contains("months,22"));
    assert!(text.contains("total_interest,2550.00"));
}
