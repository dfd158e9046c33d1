use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use std::io;

use crate::config::Config;
use crate::db::{Database, DebtRepository};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::keys::{self, Action, LineEdit};
use crate::ui::render::render;
use crate::ui::util::{format_amount, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Step used by the `+`/`-` keys to nudge the extra payment.
const EXTRA_STEP: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Raw mode and the alternate screen, undone on drop so a failed draw or
/// read still leaves the shell usable.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn start() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode()
            .and_then(|()| execute!(self.terminal.backend_mut(), LeaveAlternateScreen))
            .and_then(|()| self.terminal.show_cursor())
        {
            tracing::warn!(error = %e, "could not restore terminal");
        }
    }
}

pub(crate) fn as_tui(db: &mut Database, config: &Config) -> Result<()> {
    let mut app = App::new(super::default_export_path(config));
    app.refresh(db)?;
    tracing::info!(debts = app.debts.len(), "tui started");

    let result = TerminalSession::start().and_then(|mut session| {
        event_loop(&mut session.terminal, &mut app, db)
    });
    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
    }
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        // Header, status and command lines take three rows.
        let size = terminal.size()?;
        app.visible_rows = usize::from(size.height.saturating_sub(3)).max(1);
        terminal.draw(|f| render(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if app.show_help {
            app.show_help = false;
            continue;
        }
        match app.input_mode {
            InputMode::Normal => handle_normal_input(key, app, db)?,
            InputMode::Command => handle_command_input(key, app, db)?,
            InputMode::Confirm => handle_confirm_input(key, app, db)?,
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    if let Some(action) = keys::normal_action(key, app.screen) {
        perform(action, app, db)?;
    }
    Ok(())
}

fn perform(action: Action, app: &mut App, db: &mut Database) -> Result<()> {
    let rows = app.plan.ordered.len();
    let page = app.debt_page();
    match action {
        Action::OpenCommandLine => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        Action::Quit => app.running = false,
        Action::Down => scroll_down(&mut app.debt_index, &mut app.debt_scroll, rows, page),
        Action::Up => scroll_up(&mut app.debt_index, &mut app.debt_scroll),
        Action::HalfPageDown => {
            for _ in 0..app.visible_rows / 2 {
                scroll_down(&mut app.debt_index, &mut app.debt_scroll, rows, page);
            }
        }
        Action::HalfPageUp => {
            for _ in 0..app.visible_rows / 2 {
                scroll_up(&mut app.debt_index, &mut app.debt_scroll);
            }
        }
        Action::Top => scroll_to_top(&mut app.debt_index, &mut app.debt_scroll),
        Action::Bottom => {
            scroll_to_bottom(&mut app.debt_index, &mut app.debt_scroll, rows, page)
        }
        Action::Show(screen) => show(app, screen),
        Action::NextScreen => show(app, app.screen.next()),
        Action::PrevScreen => show(app, app.screen.prev()),
        Action::CycleStrategy => commands::handle_command("strategy", app, db)?,
        Action::RaiseExtra => adjust_extra(app, db, EXTRA_STEP)?,
        Action::LowerExtra => adjust_extra(app, db, -EXTRA_STEP)?,
        Action::DeleteSelected => commands::handle_command("delete", app, db)?,
        Action::Help => app.show_help = true,
        Action::ClearStatus => app.set_status(""),
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match keys::edit_line(&mut app.command_input, key) {
        LineEdit::Editing => {}
        LineEdit::Cancel => app.input_mode = InputMode::Normal,
        LineEdit::Submit(line) => {
            app.input_mode = InputMode::Normal;
            commands::handle_command(&line, app, db)?;
        }
    }
    Ok(())
}

/// Only `y` confirms; any other key cancels.
fn handle_confirm_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    let pending = app.pending_action.take();

    let confirmed = matches!(key.code, KeyCode::Char('y' | 'Y'));
    match pending {
        Some(PendingAction::DeleteDebt { id, name }) if confirmed => {
            db.delete_debt(&id)?;
            tracing::info!(debt = %id, "debt deleted");
            app.refresh(db)?;
            app.set_status(format!("Deleted: {name}"));
        }
        Some(_) => app.set_status("Cancelled"),
        None => {}
    }
    Ok(())
}

fn show(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(screen.to_string());
}

fn adjust_extra(app: &mut App, db: &mut Database, delta: Decimal) -> Result<()> {
    let amount = (app.extra_payment + delta).max(Decimal::ZERO);
    db.set_extra_payment(amount)?;
    app.refresh(db)?;
    app.set_status(format!("Extra monthly payment: {}", format_amount(amount)));
    Ok(())
}
