use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{Debt, SimulationResult, Strategy};

/// Write the plan as CSV: the debts in attack order, a blank line, then a
/// summary block. Returns the number of debts written.
pub(crate) fn export_plan(
    path: &Path,
    ordered: &[Debt],
    strategy: Strategy,
    result: &SimulationResult,
) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;

    wtr.write_record([
        "rank",
        "id",
        "name",
        "type",
        "balance",
        "minimum_payment",
        "interest_rate",
    ])?;
    for (i, debt) in ordered.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            debt.id.clone(),
            debt.name.clone(),
            debt.kind.as_str().to_string(),
            format!("{:.2}", debt.balance),
            format!("{:.2}", debt.minimum_payment),
            format!("{:.2}", debt.interest_rate),
        ])?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["strategy", strategy.as_str()])?;
    let summary = [
        ("monthly_payment", format!("{:.2}", result.monthly_payment)),
        ("months", result.months.to_string()),
        ("total_interest", format!("{:.2}", result.total_interest)),
    ];
    for (key, value) in &summary {
        wtr.write_record([*key, value.as_str()])?;
    }
    wtr.flush().context("Failed to write export file")?;

    tracing::info!(path = %path.display(), debts = ordered.len(), "plan exported");
    Ok(ordered.len())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
