use anyhow::Result;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::db::{Database, DebtRepository};
use crate::models::*;
use crate::payoff::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Debts,
    Strategies,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Debts, Self::Strategies]
    }

    fn position(self) -> usize {
        Self::all().iter().position(|s| *s == self).unwrap_or(0)
    }

    pub(crate) fn next(self) -> Self {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Debts => write!(f, "Debts"),
            Self::Strategies => write!(f, "Strategies"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteDebt { id: String, name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) visible_rows: usize,

    // Settings
    pub(crate) strategy: Strategy,
    pub(crate) extra_payment: Decimal,
    pub(crate) export_path: PathBuf,

    // Debts, in strategy order via `plan.ordered`
    pub(crate) debts: Vec<Debt>,
    pub(crate) debt_index: usize,
    pub(crate) debt_scroll: usize,

    // Derived
    pub(crate) plan: Plan,
    pub(crate) alternatives: Vec<Plan>,

    // Confirm
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,
}

impl App {
    pub(crate) fn new(export_path: PathBuf) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::from("Press : for commands, ? for help"),
            show_help: false,
            visible_rows: 20,
            strategy: Strategy::default(),
            extra_payment: Decimal::ZERO,
            export_path,
            debts: Vec::new(),
            debt_index: 0,
            debt_scroll: 0,
            plan: Plan::default(),
            alternatives: Vec::new(),
            pending_action: None,
            confirm_message: String::new(),
        }
    }

    /// Reload debts and settings, then recompute every plan.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.debts = db.list_debts()?;
        self.strategy = db.get_strategy()?;
        self.extra_payment = db.get_extra_payment()?;
        self.recompute();
        Ok(())
    }

    pub(crate) fn recompute(&mut self) {
        self.plan = Plan::build(&self.debts, self.extra_payment, self.strategy);
        self.alternatives = Strategy::all()
            .iter()
            .map(|s| Plan::build(&self.debts, self.extra_payment, *s))
            .collect();

        if let Err(e) = &self.plan.result {
            tracing::debug!(error = %e, "plan not computable");
        }

        let len = self.plan.ordered.len();
        if self.debt_index >= len {
            self.debt_index = len.saturating_sub(1);
        }
        if self.debt_scroll > self.debt_index {
            self.debt_scroll = self.debt_index;
        }
    }

    /// Debt under the cursor on the Debts screen.
    pub(crate) fn selected_debt(&self) -> Option<&Debt> {
        self.plan.ordered.get(self.debt_index)
    }

    /// Rows of the debts table that fit on screen (minus header and border).
    pub(crate) fn debt_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
