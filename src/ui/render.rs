use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::screens;
use super::theme;
use super::util::format_amount;
use super::{commands, keys};

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [header, body, status, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(f, header, app);
    match app.screen {
        Screen::Dashboard => screens::dashboard::render(f, body, app),
        Screen::Debts => screens::debts::render(f, body, app),
        Screen::Strategies => screens::strategies::render(f, body, app),
    }
    render_status(f, status, app);
    render_bottom_line(f, bottom, app);

    if app.show_help {
        render_help(f, f.area());
    }
}

/// App name, numbered screens and the active settings on one line.
fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " payoff ",
        Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, screen) in Screen::all().iter().enumerate() {
        let style = if *screen == app.screen {
            theme::header_style().fg(theme::ACCENT)
        } else {
            theme::dim_style()
        };
        spans.push(Span::styled(format!("  {} {screen}", i + 1), style));
    }

    let settings = format!(
        "{} | extra {}/mo ",
        app.strategy,
        format_amount(app.extra_payment)
    );
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let pad = (area.width as usize).saturating_sub(used + settings.chars().count());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(settings, theme::dim_style()));

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
}

/// Where the plan stands right now, for the status line.
pub(crate) fn plan_summary(app: &App) -> (String, Style) {
    match (&app.plan.result, app.plan.focus()) {
        (Err(e), _) => (format!("Plan unavailable: {e}"), theme::owed_style()),
        (Ok(_), None) => ("Nothing owed".to_string(), theme::progress_style()),
        (Ok(result), Some(debt)) => (
            format!(
                "Extra goes to {} | debt-free in {}",
                debt.name,
                result.duration_label()
            ),
            theme::focus_style(),
        ),
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let badge = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let (summary, style) = plan_summary(app);

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.input_mode),
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(badge)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(summary, style.bg(theme::SURFACE)),
    ]);
    f.render_widget(Paragraph::new(line).style(theme::status_bar_style()), area);
}

/// Command line, confirmation prompt or the latest status message.
fn render_bottom_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => {
            let cursor = area.x + 1 + app.command_input.chars().count() as u16;
            f.set_cursor_position((cursor.min(area.right().saturating_sub(1)), area.y));
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(app.command_input.as_str(), theme::command_bar_style()),
            ])
        }
        InputMode::Confirm => Line::from(vec![
            Span::styled(app.confirm_message.as_str(), Style::default().fg(theme::YELLOW)),
            Span::styled(" [y/N]", Style::default().fg(theme::RED)),
        ]),
        InputMode::Normal if app.status_message.is_empty() => {
            Line::from(Span::styled(" ? for help", theme::dim_style()))
        }
        InputMode::Normal => Line::from(Span::styled(
            format!(" {}", app.status_message),
            theme::command_bar_style(),
        )),
    };
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );
}

/// Rows of the help table: a heading, the key bindings, then the commands.
pub(crate) fn help_rows() -> Vec<(String, String)> {
    let mut rows = vec![("Keys".to_string(), String::new())];
    rows.extend(
        keys::BINDINGS
            .iter()
            .map(|(key, what)| (key.to_string(), what.to_string())),
    );
    rows.push((String::new(), String::new()));
    rows.push(("Commands".to_string(), String::new()));
    rows.extend(
        commands::help_entries()
            .into_iter()
            .map(|(names, what)| (names, what.to_string())),
    );
    rows
}

fn render_help(f: &mut Frame, area: Rect) {
    let rows: Vec<Row> = help_rows()
        .into_iter()
        .map(|(key, what)| {
            if what.is_empty() {
                Row::new(vec![Cell::from(key).style(
                    Style::default()
                        .fg(theme::YELLOW)
                        .add_modifier(Modifier::BOLD),
                )])
            } else {
                Row::new(vec![
                    Cell::from(key).style(Style::default().fg(theme::ACCENT)),
                    Cell::from(what).style(theme::normal_style()),
                ])
            }
        })
        .collect();

    let height = (rows.len() as u16 + 2).min(area.height);
    let width = 84.min(area.width);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(20)])
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(" Help (any key closes) ")
                .style(Style::default().bg(theme::HEADER_BG)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(table, popup);
}
