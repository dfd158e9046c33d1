use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::Screen;

/// What a key press in normal mode asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    OpenCommandLine,
    Quit,
    Down,
    Up,
    HalfPageDown,
    HalfPageUp,
    Top,
    Bottom,
    Show(Screen),
    NextScreen,
    PrevScreen,
    CycleStrategy,
    RaiseExtra,
    LowerExtra,
    DeleteSelected,
    Help,
    ClearStatus,
}

/// Key bindings shown in the help overlay, in display order.
pub(crate) const BINDINGS: &[(&str, &str)] = &[
    ("j / k", "Move down / up"),
    ("Ctrl-d / Ctrl-u", "Half page down / up"),
    ("g / G", "First / last debt"),
    ("1 2 3", "Dashboard, Debts, Strategies"),
    ("Tab / Shift-Tab", "Next / previous screen"),
    ("s", "Cycle payoff strategy"),
    ("+ / -", "Raise / lower extra payment by $50"),
    ("D", "Delete selected debt (Debts screen)"),
    (":", "Command line"),
    ("?", "This help"),
    ("Ctrl-q", "Quit"),
];

/// Map a normal-mode key press to an action. `None` means the key is unbound
/// on this screen.
pub(crate) fn normal_action(key: KeyEvent, screen: Screen) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('q' | 'c') if ctrl => Action::Quit,
        KeyCode::Char('d') if ctrl => Action::HalfPageDown,
        KeyCode::Char('u') if ctrl => Action::HalfPageUp,
        _ if ctrl => return None,
        KeyCode::Char(':') => Action::OpenCommandLine,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            Action::Show(*Screen::all().get(idx)?)
        }
        KeyCode::Tab => Action::NextScreen,
        KeyCode::BackTab => Action::PrevScreen,
        KeyCode::Char('s') => Action::CycleStrategy,
        KeyCode::Char('+' | '=') => Action::RaiseExtra,
        KeyCode::Char('-') => Action::LowerExtra,
        KeyCode::Char('D') if screen == Screen::Debts => Action::DeleteSelected,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Esc => Action::ClearStatus,
        _ => return None,
    };
    Some(action)
}

/// Outcome of editing the `:` command line with one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineEdit {
    Editing,
    Submit(String),
    Cancel,
}

/// Apply `key` to the command line buffer. Emptying the buffer cancels.
pub(crate) fn edit_line(buffer: &mut String, key: KeyEvent) -> LineEdit {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => LineEdit::Submit(std::mem::take(buffer)),
        KeyCode::Esc => {
            buffer.clear();
            LineEdit::Cancel
        }
        KeyCode::Char('u') if ctrl => {
            buffer.clear();
            LineEdit::Cancel
        }
        KeyCode::Char('w') if ctrl => {
            match buffer.trim_end().rfind(' ') {
                Some(pos) => buffer.truncate(pos + 1),
                None => buffer.clear(),
            }
            if buffer.is_empty() {
                LineEdit::Cancel
            } else {
                LineEdit::Editing
            }
        }
        KeyCode::Backspace => {
            buffer.pop();
            if buffer.is_empty() {
                LineEdit::Cancel
            } else {
                LineEdit::Editing
            }
        }
        KeyCode::Char(c) if !ctrl => {
            buffer.push(c);
            LineEdit::Editing
        }
        _ => LineEdit::Editing,
    }
}
