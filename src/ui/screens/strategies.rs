use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::payoff::Plan;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_outcome(f, chunks[0], app);

    let count = app.alternatives.len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(chunks[1]);

    for (plan, col) in app.alternatives.iter().zip(columns.iter()) {
        render_column(f, *col, plan, plan.strategy == app.strategy);
    }
}

/// Months and interest are shared by every ordering; only the focus differs.
fn render_outcome(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.plan.result {
        Ok(r) => Line::from(vec![
            Span::styled(" Every strategy: ", theme::dim_style()),
            Span::styled(
                format!("debt-free in {}", r.duration_label()),
                theme::progress_style(),
            ),
            Span::styled(
                format!(", {} interest", format_amount(r.total_interest)),
                theme::normal_style(),
            ),
            Span::styled(
                format!(
                    " at {}/mo. Strategy decides where the extra goes.",
                    format_amount(r.monthly_payment)
                ),
                theme::dim_style(),
            ),
        ]),
        Err(e) => Line::from(Span::styled(format!(" {e}"), theme::owed_style())),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_column(f: &mut Frame, area: Rect, plan: &Plan, active: bool) {
    let title_style = if active {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme::TEXT_DIM)
            .add_modifier(Modifier::BOLD)
    };
    let border = if active { theme::ACCENT } else { theme::OVERLAY };
    let marker = if active { " *" } else { "" };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", plan.strategy.description()),
            theme::dim_style(),
        )),
        Line::from(""),
    ];

    let name_width = (area.width as usize).saturating_sub(20).max(8);
    let focus_id = plan.focus().map(|d| d.id.as_str());
    for (i, debt) in plan.ordered.iter().enumerate() {
        let style = if debt.is_paid_off() {
            theme::dim_style()
        } else if Some(debt.id.as_str()) == focus_id {
            theme::focus_style()
        } else {
            theme::normal_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:>2}. ", i + 1), theme::dim_style()),
            Span::styled(
                format!("{:<name_width$}", truncate(&debt.name, name_width)),
                style,
            ),
            Span::styled(format!("{:>12}", format_amount(debt.balance)), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {}{marker} ", plan.strategy),
            title_style,
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
