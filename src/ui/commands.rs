use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::db::{Database, DebtRepository};
use crate::import::{export_plan, parse_decimal, CsvImporter};
use crate::models::{Debt, DebtKind, Strategy};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Payoff", cmd_quit, r);
    register_command!("quit", "Quit Payoff", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("debts", "Go to Debts", cmd_debts, r);
    register_command!("s", "Go to Strategies", cmd_strategies, r);
    register_command!("strategies", "Go to Strategies", cmd_strategies, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add debt (e.g. :add Chase Visa 5000 150 22.9)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add debt (e.g. :a Car Loan 12000 300 6.5)",
        cmd_add,
        r
    );
    register_command!("delete", "Delete selected debt", cmd_delete, r);
    register_command!("rm", "Delete selected debt", cmd_delete, r);
    register_command!(
        "balance",
        "Set balance of selected debt (e.g. :balance 4200)",
        cmd_balance,
        r
    );
    register_command!(
        "b",
        "Set balance of selected debt (e.g. :b 4200)",
        cmd_balance,
        r
    );
    register_command!(
        "type",
        "Set type of selected debt (e.g. :type student)",
        cmd_type,
        r
    );
    register_command!(
        "extra",
        "Set extra monthly payment (e.g. :extra 200)",
        cmd_extra,
        r
    );
    register_command!(
        "x",
        "Set extra monthly payment (e.g. :x 200)",
        cmd_extra,
        r
    );
    register_command!(
        "strategy",
        "Set strategy (avalanche, snowball, balanced)",
        cmd_strategy,
        r
    );
    register_command!(
        "import",
        "Import debts from CSV (e.g. :import ~/debts.csv)",
        cmd_import,
        r
    );
    register_command!(
        "export",
        "Export plan to CSV (e.g. :export ~/plan.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "tui command");
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

/// One help line per command: `:name, :alias` and the full description.
/// Names sharing a description (ignoring any `(e.g. ...)` tail) are aliases.
pub(crate) fn help_entries() -> Vec<(String, &'static str)> {
    let summary = |desc: &'static str| desc.split(" (").next().unwrap_or(desc);

    let mut names: Vec<(&str, &Command)> = COMMANDS.iter().map(|(n, c)| (*n, c)).collect();
    // Longest first so the full name leads each group.
    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

    let mut groups: Vec<(Vec<&str>, &'static str)> = Vec::new();
    for (name, cmd) in names {
        match groups
            .iter_mut()
            .find(|(_, desc)| summary(*desc) == summary(cmd.description))
        {
            Some((aliases, _)) => aliases.push(name),
            None => groups.push((vec![name], cmd.description)),
        }
    }
    groups.sort_by(|a, b| a.0[0].cmp(b.0[0]));

    groups
        .into_iter()
        .map(|(aliases, desc)| {
            let keys: Vec<String> = aliases.iter().map(|a| format!(":{a}")).collect();
            (keys.join(", "), desc)
        })
        .collect()
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_debts(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Debts;
    Ok(())
}

fn cmd_strategies(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Strategies;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let (name, balance, minimum, rate) = match crate::run::parse_add_args(&parts) {
        Ok(fields) => fields,
        Err(e) => {
            app.set_status(format!("{e}"));
            return Ok(());
        }
    };

    let debt = Debt::new(name.clone(), DebtKind::Other, balance, minimum, rate);
    match db.create_debt(&debt) {
        Ok(id) => {
            app.refresh(db)?;
            if let Some(pos) = app.plan.ordered.iter().position(|d| d.id == id) {
                app.debt_index = pos;
            }
            app.set_status(format!("Added {name} ({})", format_amount(balance)));
        }
        Err(e) => app.set_status(format!("Error: {e}")),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(debt) = app.selected_debt() else {
        app.set_status("No debt selected");
        return Ok(());
    };
    let (id, name) = (debt.id.clone(), debt.name.clone());
    app.confirm_message = format!("Delete '{name}'?");
    app.pending_action = Some(PendingAction::DeleteDebt { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_balance(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(mut debt) = app.selected_debt().cloned() else {
        app.set_status("No debt selected");
        return Ok(());
    };
    let amount = match parse_decimal(args) {
        Ok(v) if !args.is_empty() => v,
        _ => {
            app.set_status("Usage: :balance <amount>");
            return Ok(());
        }
    };

    debt.balance = amount;
    match db.update_debt(&debt) {
        Ok(_) => {
            app.refresh(db)?;
            app.set_status(format!("{}: balance {}", debt.name, format_amount(amount)));
        }
        Err(e) => app.set_status(format!("Error: {e}")),
    }
    Ok(())
}

fn cmd_type(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(mut debt) = app.selected_debt().cloned() else {
        app.set_status("No debt selected");
        return Ok(());
    };
    if args.is_empty() {
        let kinds: Vec<&str> = DebtKind::all().iter().map(|k| k.as_str()).collect();
        app.set_status(format!("Types: {}", kinds.join(", ")));
        return Ok(());
    }

    debt.kind = DebtKind::parse(args);
    db.update_debt(&debt)?;
    app.refresh(db)?;
    app.set_status(format!("{} is now {}", debt.name, debt.kind));
    Ok(())
}

fn cmd_extra(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Extra monthly payment: {}",
            format_amount(app.extra_payment)
        ));
        return Ok(());
    }
    let amount = match parse_decimal(args) {
        Ok(v) => v,
        Err(_) => {
            app.set_status(format!("Invalid amount: {args}"));
            return Ok(());
        }
    };
    if let Err(e) = db.set_extra_payment(amount) {
        app.set_status(format!("Error: {e}"));
        return Ok(());
    }
    app.refresh(db)?;
    app.set_status(format!("Extra monthly payment: {}", format_amount(amount)));
    Ok(())
}

fn cmd_strategy(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let strategy = if args.is_empty() {
        app.strategy.next()
    } else {
        match Strategy::parse(args) {
            Some(s) => s,
            None => {
                app.set_status(format!(
                    "Unknown strategy '{args}'. Use avalanche, snowball or balanced"
                ));
                return Ok(());
            }
        }
    };
    db.set_strategy(strategy)?;
    app.refresh(db)?;
    app.set_status(format!("Strategy: {strategy} ({})", strategy.description()));
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.csv>");
        return Ok(());
    }
    let path = PathBuf::from(crate::run::shellexpand(args));
    if !path.exists() {
        app.set_status(format!("File not found: {args}"));
        return Ok(());
    }

    let debts = match CsvImporter::load(&path) {
        Ok(d) => d,
        Err(e) => {
            app.set_status(format!("Import failed: {e:#}"));
            return Ok(());
        }
    };
    let (created, updated) = db.upsert_debts_batch(&debts)?;
    app.refresh(db)?;
    app.set_status(format!("Imported {created} new debts ({updated} updated)"));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        app.export_path.clone()
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    let result = match &app.plan.result {
        Ok(r) => r.clone(),
        Err(e) => {
            app.set_status(format!("Cannot export: {e}. {}", e.hint()));
            return Ok(());
        }
    };

    let count = export_plan(&path, &app.plan.ordered, app.strategy, &result)?;
    app.set_status(format!("Exported {count} debts to {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn setup() -> (App, Database) {
        let db = Database::open_in_memory().unwrap();
        let mut app = App::new(PathBuf::from("plan.csv"));
        app.refresh(&db).unwrap();
        (app, db)
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("extra", "extra"), 0);
        assert_eq!(levenshtein("exta", "extra"), 1);
        assert_eq!(levenshtein("", "add"), 3);
    }

    #[test]
    fn test_help_entries_group_aliases() {
        let entries = help_entries();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&":add, :a"));
        assert!(keys.contains(&":delete, :rm"));
        assert!(keys.contains(&":extra, :x"));
        assert!(keys.contains(&":debts"));

        let add = entries.iter().find(|(k, _)| k.starts_with(":add")).unwrap();
        assert!(add.1.contains(":add Chase Visa"));

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_unknown_command_suggests() {
        let (mut app, mut db) = setup();
        handle_command("strategi", &mut app, &mut db).unwrap();
        assert!(app.status_message.contains("Did you mean :strateg"));
    }

    #[test]
    fn test_add_balance_and_delete() {
        let (mut app, mut db) = setup();
        handle_command("add Chase Visa 5000 150 22.9", &mut app, &mut db).unwrap();
        assert_eq!(app.debts.len(), 1);
        assert_eq!(app.debts[0].name, "Chase Visa");
        assert_eq!(app.debts[0].interest_rate, dec!(22.9));

        handle_command("balance 4200.50", &mut app, &mut db).unwrap();
        assert_eq!(app.debts[0].balance, dec!(4200.50));

        handle_command("delete", &mut app, &mut db).unwrap();
        assert_eq!(app.input_mode, InputMode::Confirm);
        assert!(matches!(
            app.pending_action,
            Some(PendingAction::DeleteDebt { ref id, .. }) if id == "chase-visa"
        ));
    }

    #[test]
    fn test_add_with_missing_fields_sets_status() {
        let (mut app, mut db) = setup();
        handle_command("add Visa 5000", &mut app, &mut db).unwrap();
        assert!(app.debts.is_empty());
        assert!(app.status_message.starts_with("Usage"));
    }

    #[test]
    fn test_extra_and_strategy_persist() {
        let (mut app, mut db) = setup();
        handle_command("extra 250", &mut app, &mut db).unwrap();
        assert_eq!(app.extra_payment, dec!(250));
        assert_eq!(db.get_extra_payment().unwrap(), dec!(250));

        handle_command("strategy snowball", &mut app, &mut db).unwrap();
        assert_eq!(app.strategy, Strategy::Snowball);
        handle_command("strategy", &mut app, &mut db).unwrap();
        assert_eq!(app.strategy, Strategy::Balanced);
        assert_eq!(db.get_strategy().unwrap(), Strategy::Balanced);
    }

    #[test]
    fn test_negative_extra_rejected() {
        let (mut app, mut db) = setup();
        handle_command("extra -5", &mut app, &mut db).unwrap();
        assert_eq!(app.extra_payment, dec!(0));
        assert!(app.status_message.starts_with("Error"));
    }

    #[test]
    fn test_screen_switches() {
        let (mut app, mut db) = setup();
        handle_command("debts", &mut app, &mut db).unwrap();
        assert_eq!(app.screen, Screen::Debts);
        handle_command("s", &mut app, &mut db).unwrap();
        assert_eq!(app.screen, Screen::Strategies);
        handle_command("d", &mut app, &mut db).unwrap();
        assert_eq!(app.screen, Screen::Dashboard);
        handle_command("q", &mut app, &mut db).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_import_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("debts.csv");
        std::fs::write(
            &input,
            "name,balance,minimum,apr\nVisa,5000,150,22.9\nCar,12000,300,6.5\n",
        )
        .unwrap();
        let (mut app, mut db) = setup();

        handle_command(&format!("import {}", input.display()), &mut app, &mut db).unwrap();
        assert_eq!(app.debts.len(), 2);

        let output = dir.path().join("plan.csv");
        handle_command(&format!("export {}", output.display()), &mut app, &mut db).unwrap();
        assert!(app.status_message.starts_with("Exported 2 debts"));
        assert!(output.exists());
    }
}
