use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_rate, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.plan.ordered.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Debts (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No debts recorded", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add Visa 5000 150 22.9 or :import ~/debts.csv",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = [
        "#", "Name", "Type", "Balance", "Minimum", "APR", "Interest/mo",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let focus_id = app.plan.focus().map(|d| d.id.as_str());

    let rows: Vec<Row> = app
        .plan
        .ordered
        .iter()
        .enumerate()
        .skip(app.debt_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, debt)| {
            let rank = if Some(debt.id.as_str()) == focus_id {
                format!("> {}", i + 1)
            } else {
                format!("  {}", i + 1)
            };

            let style = if i == app.debt_index {
                theme::selected_style()
            } else if debt.is_paid_off() {
                theme::dim_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(rank),
                Cell::from(truncate(&debt.name, 30)),
                Cell::from(debt.kind.as_str()),
                Cell::from(format_amount(debt.balance)),
                Cell::from(format_amount(debt.minimum_payment)),
                Cell::from(format_rate(debt.interest_rate)),
                Cell::from(format_amount(debt.monthly_interest().round_dp(2))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(18),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Debts ({}) | total {} | minimums {} ",
                    app.plan.ordered.len(),
                    format_amount(app.plan.total_balance()),
                    format_amount(app.plan.total_minimums()),
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
