use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::db::{Database, DebtRepository};
use crate::import::{export_plan, parse_decimal, CsvImporter};
use crate::models::{Debt, DebtKind, Strategy};
use crate::payoff::Plan;
use crate::ui::util::{format_amount, format_rate};

/// Flags that take a value; their values are not positional arguments.
const VALUE_FLAGS: &[&str] = &["--extra", "--strategy", "--type"];

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let rest = &args[2..];
    tracing::debug!(command = %args[1], "cli command");
    match args[1].as_str() {
        "list" | "ls" => cli_list(rest, db),
        "add" => cli_add(rest, db),
        "remove" | "rm" => cli_remove(rest, db),
        "update" => cli_update(rest, db),
        "plan" | "p" => cli_plan(rest, db),
        "extra" => cli_extra(rest, db),
        "strategy" => cli_strategy(rest, db),
        "import" => cli_import(rest, db),
        "export" => cli_export(rest, db, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("payoff {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Payoff - local-only debt payoff planner");
    println!();
    println!("Usage: payoff [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  list [--strategy <s>]               List debts in attack order");
    println!("  add <name> <balance> <min> <rate>   Add a debt (rate is annual %)");
    println!("    --type <type>                     Credit card, student, auto, mortgage, ...");
    println!("  remove <id>                         Remove a debt");
    println!("  update <id> <balance>               Record a new balance");
    println!("  plan [--extra <n>] [--strategy <s>] Show the payoff plan");
    println!("  extra <amount>                      Save the extra monthly payment");
    println!("  strategy <avalanche|snowball|balanced>  Save the default strategy");
    println!("  import <file.csv>                   Import debts (name,balance,minimum,rate[,type])");
    println!("  export [path]                       Export the plan to CSV");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
}

// ── Argument helpers ─────────────────────────────────────────

pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
pub(crate) fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

/// `<name words...> <balance> <minimum> <rate>`; the name may contain spaces.
pub(crate) fn parse_add_args(parts: &[&str]) -> Result<(String, Decimal, Decimal, Decimal)> {
    if parts.len() < 4 {
        anyhow::bail!("Usage: add <name> <balance> <minimum> <rate>");
    }
    let n = parts.len();
    let name = parts[..n - 3].join(" ");
    let balance = parse_decimal(parts[n - 3]).context("Invalid balance")?;
    let minimum = parse_decimal(parts[n - 2]).context("Invalid minimum payment")?;
    let rate = parse_decimal(parts[n - 1]).context("Invalid interest rate")?;
    Ok((name, balance, minimum, rate))
}

fn strategy_arg(args: &[String], db: &Database) -> Result<Strategy> {
    match flag_value(args, "--strategy") {
        Some(s) => Strategy::parse(s).ok_or_else(|| {
            anyhow::anyhow!("Unknown strategy '{s}'. Use avalanche, snowball or balanced")
        }),
        None => db.get_strategy(),
    }
}

// ── Commands ─────────────────────────────────────────────────

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let strategy = strategy_arg(args, db)?;
    let debts = db.list_debts()?;
    if debts.is_empty() {
        println!("No debts. Add one with: payoff add <name> <balance> <minimum> <rate>");
        return Ok(());
    }

    let ordered = crate::payoff::order(&debts, strategy);
    let focus_id = crate::payoff::focus(&debts, strategy).map(|d| d.id);
    println!("{strategy}: {}", strategy.description());
    println!(
        "{:<3} {:<18} {:<22} {:<14} {:>14} {:>10} {:>8}",
        "#", "ID", "Name", "Type", "Balance", "Minimum", "APR"
    );
    println!("{}", "─".repeat(95));
    for (i, debt) in ordered.iter().enumerate() {
        let marker = if Some(&debt.id) == focus_id.as_ref() { " *" } else { "" };
        println!(
            "{:<3} {:<18} {:<22} {:<14} {:>14} {:>10} {:>8}{marker}",
            i + 1,
            debt.id,
            debt.name,
            debt.kind.as_str(),
            format_amount(debt.balance),
            format_amount(debt.minimum_payment),
            format_rate(debt.interest_rate),
        );
    }

    let (balance, minimums) = db.debt_totals()?;
    println!("{}", "─".repeat(95));
    println!(
        "Total {} owed, {} in minimum payments",
        format_amount(balance),
        format_amount(minimums)
    );
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let parts = positional(args);
    let (name, balance, minimum, rate) = parse_add_args(&parts)?;
    let kind = flag_value(args, "--type")
        .map(DebtKind::parse)
        .unwrap_or(DebtKind::Other);

    let debt = Debt::new(name.clone(), kind, balance, minimum, rate);
    let id = db.create_debt(&debt)?;
    println!("Added {name} as '{id}'");
    Ok(())
}

fn cli_remove(args: &[String], db: &mut Database) -> Result<()> {
    let key = positional(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: payoff remove <id>"))?;
    let debt = resolve_debt(db, key)?;
    db.delete_debt(&debt.id)?;
    println!("Removed {} ({})", debt.name, debt.id);
    Ok(())
}

fn cli_update(args: &[String], db: &mut Database) -> Result<()> {
    let parts = positional(args);
    let [key, amount] = parts.as_slice() else {
        anyhow::bail!("Usage: payoff update <id> <balance>");
    };
    let mut debt = resolve_debt(db, key)?;
    let old = debt.balance;
    debt.balance = parse_decimal(amount).context("Invalid balance")?;
    db.update_debt(&debt)?;
    println!(
        "{}: {} -> {}",
        debt.name,
        format_amount(old),
        format_amount(debt.balance)
    );
    Ok(())
}

/// Exact id lookup first, then a case-insensitive name match.
fn resolve_debt(db: &Database, key: &str) -> Result<Debt> {
    if let Some(debt) = db.get_debt(key)? {
        return Ok(debt);
    }
    let debts = db.list_debts()?;
    Debt::find(&debts, key)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Debt '{key}' not found"))
}

fn cli_plan(args: &[String], db: &mut Database) -> Result<()> {
    let strategy = strategy_arg(args, db)?;
    let extra = match flag_value(args, "--extra") {
        Some(v) => parse_decimal(v).context("Invalid --extra amount")?,
        None => db.get_extra_payment()?,
    };
    let debts = db.list_debts()?;
    let plan = Plan::build(&debts, extra, strategy);

    let result = match &plan.result {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "plan rejected");
            anyhow::bail!("Cannot build a payoff plan: {e}. {}", e.hint());
        }
    };

    let today = chrono::Local::now().date_naive();
    println!("Payoff plan: {strategy} ({})", strategy.description());
    println!("{}", "─".repeat(48));
    println!("  Total debt:        {}", format_amount(result.total_balance));
    println!(
        "  Monthly payment:   {}  (minimums {} + extra {})",
        format_amount(result.monthly_payment),
        format_amount(plan.total_minimums()),
        format_amount(plan.extra_payment)
    );
    println!("  Blended APR:       {}", format_rate(result.weighted_rate));
    if result.months == 0 {
        println!("  Debt-free:         now");
    } else {
        println!(
            "  Debt-free in:      {}  ({})",
            result.duration_label(),
            result.payoff_month(today)
        );
    }
    println!("  Total interest:    {}", format_amount(result.total_interest));
    if let Some(savings) = &plan.savings {
        if !plan.extra_payment.is_zero() {
            println!(
                "  Vs minimums only:  {} months sooner, {} less interest",
                savings.months_saved,
                format_amount(savings.interest_saved)
            );
        }
    }

    if !plan.ordered.is_empty() {
        println!();
        println!("Attack order:");
        let focus_id = plan.focus().map(|d| d.id.clone());
        for (i, debt) in plan.ordered.iter().enumerate() {
            let marker = if Some(&debt.id) == focus_id.as_ref() {
                "  <- extra goes here"
            } else if debt.is_paid_off() {
                "  (paid off)"
            } else {
                ""
            };
            println!(
                "  {}. {:<22} {:>14} @ {:>7}  min {}{marker}",
                i + 1,
                debt.name,
                format_amount(debt.balance),
                format_rate(debt.interest_rate),
                format_amount(debt.minimum_payment),
            );
        }
    }

    Ok(())
}

fn cli_extra(args: &[String], db: &mut Database) -> Result<()> {
    match positional(args).first() {
        Some(v) => {
            let amount = parse_decimal(v).context("Invalid amount")?;
            db.set_extra_payment(amount)?;
            println!("Extra monthly payment set to {}", format_amount(amount));
        }
        None => println!(
            "Extra monthly payment: {}",
            format_amount(db.get_extra_payment()?)
        ),
    }
    Ok(())
}

fn cli_strategy(args: &[String], db: &mut Database) -> Result<()> {
    match positional(args).first() {
        Some(v) => {
            let strategy = Strategy::parse(v).ok_or_else(|| {
                anyhow::anyhow!("Unknown strategy '{v}'. Use avalanche, snowball or balanced")
            })?;
            db.set_strategy(strategy)?;
            println!("Strategy set to {strategy}: {}", strategy.description());
        }
        None => {
            let current = db.get_strategy()?;
            for s in Strategy::all() {
                let mark = if *s == current { "*" } else { " " };
                println!("{mark} {:<10} {}", s.as_str(), s.description());
            }
        }
    }
    Ok(())
}

fn cli_import(args: &[String], db: &mut Database) -> Result<()> {
    let file_path = positional(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: payoff import <file.csv>"))?;
    let path = PathBuf::from(shellexpand(file_path));
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let debts = CsvImporter::load(&path)?;
    println!("Parsed {} debts", debts.len());
    let (created, updated) = db.upsert_debts_batch(&debts)?;
    println!("Imported {created} new debts ({updated} updated)");
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let output = positional(args)
        .first()
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| default_export_path(config));

    let strategy = db.get_strategy()?;
    let extra = db.get_extra_payment()?;
    let debts = db.list_debts()?;
    let plan = Plan::build(&debts, extra, strategy);
    let result = plan
        .result
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Cannot export plan: {e}. {}", e.hint()))?;

    let count = export_plan(&output, &plan.ordered, strategy, result)?;
    println!("Exported {count} debts to {}", output.display());
    Ok(())
}

pub(crate) fn default_export_path(config: &Config) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    let dir: PathBuf = directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| config.data_dir().to_path_buf());
    dir.join(format!("payoff-plan-{date}.csv"))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = directories::UserDirs::new()
            .map(|d| d.home_dir().to_path_buf())
            .unwrap_or_else(|| Path::new(".").to_path_buf());
        home.join(rest).display().to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
