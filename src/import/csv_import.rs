use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Debt, DebtKind};

/// Which CSV column holds which debt field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DebtColumns {
    pub(crate) name: usize,
    pub(crate) balance: usize,
    pub(crate) minimum_payment: usize,
    pub(crate) interest_rate: usize,
    pub(crate) kind: Option<usize>,
}

impl Default for DebtColumns {
    /// `name,balance,minimum,rate,type`
    fn default() -> Self {
        Self {
            name: 0,
            balance: 1,
            minimum_payment: 2,
            interest_rate: 3,
            kind: Some(4),
        }
    }
}

impl DebtColumns {
    /// Map columns by header name. Falls back to the positional layout for
    /// any required field that cannot be found.
    pub(crate) fn detect(headers: &[String]) -> Self {
        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |needles: &[&str]| {
            lower
                .iter()
                .position(|h| needles.iter().any(|n| h.contains(n)))
        };

        let defaults = Self::default();
        let name = find(&["name", "creditor", "lender", "account", "description"]);
        let minimum_payment = find(&["minimum", "min pay", "min_pay", "payment"]);
        let interest_rate = find(&["rate", "apr", "interest"]);
        let balance = find(&["balance", "owed", "principal", "amount"]);
        let kind = find(&["type", "kind", "category"]);

        match (name, balance, minimum_payment, interest_rate) {
            (Some(name), Some(balance), Some(minimum_payment), Some(interest_rate)) => Self {
                name,
                balance,
                minimum_payment,
                interest_rate,
                kind,
            },
            _ => Self {
                kind: kind.or(if headers.len() > 4 { defaults.kind } else { None }),
                ..defaults
            },
        }
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and return headers + all rows as strings.
    pub(crate) fn preview(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // A header row has no numeric fields at all
        let looks_like_header = all_rows[0]
            .iter()
            .all(|field| parse_decimal(field).is_err() || field.trim().is_empty());

        if looks_like_header {
            let headers = all_rows.remove(0);
            Ok((headers, all_rows))
        } else {
            let headers: Vec<String> = (0..all_rows[0].len())
                .map(|i| format!("Column {}", i + 1))
                .collect();
            Ok((headers, all_rows))
        }
    }

    /// Parse rows into debts using `columns`. Rows without a name are skipped.
    pub(crate) fn parse(rows: &[Vec<String>], columns: &DebtColumns) -> Result<Vec<Debt>> {
        let mut debts = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let name = row
                .get(columns.name)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            if name.is_empty() {
                continue;
            }

            let field = |idx: usize, label: &str| -> Result<Decimal> {
                let raw = row.get(idx).map(|s| s.as_str()).unwrap_or("");
                let value = parse_decimal(raw.trim_end_matches('%'))
                    .with_context(|| format!("Row {}: failed to parse {label} '{raw}'", i + 1))?;
                if value < Decimal::ZERO {
                    anyhow::bail!("Row {}: {label} cannot be negative ({raw})", i + 1);
                }
                Ok(value)
            };

            let balance = field(columns.balance, "balance")?;
            let minimum_payment = field(columns.minimum_payment, "minimum payment")?;
            let interest_rate = field(columns.interest_rate, "interest rate")?;
            let kind = columns
                .kind
                .and_then(|c| row.get(c))
                .map(|s| DebtKind::parse(s))
                .unwrap_or(DebtKind::Other);

            debts.push(Debt::new(name, kind, balance, minimum_payment, interest_rate));
        }

        tracing::debug!(rows = rows.len(), debts = debts.len(), "csv parsed");
        Ok(debts)
    }

    /// Preview, detect columns and parse in one step.
    pub(crate) fn load(path: &Path) -> Result<Vec<Debt>> {
        let (headers, rows) = Self::preview(path)?;
        let columns = DebtColumns::detect(&headers);
        Self::parse(&rows, &columns)
    }
}

/// Parse a user-typed amount: `$1,234.56`, `(50.00)`, `18.5%`, `"42"`.
pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ',', '"', '%'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).with_context(|| format!("Failed to parse '{s}' as decimal"))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
