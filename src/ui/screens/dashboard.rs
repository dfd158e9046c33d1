use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::models::SimulationResult;
use crate::payoff::{PayoffError, MAX_PROJECTION_MONTHS};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_compact, format_rate, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(6),    // Attack order
            Constraint::Length(6), // Payoff curve
        ])
        .split(area);

    match &app.plan.result {
        Ok(result) => {
            render_summary_cards(f, chunks[0], app, result);
            render_attack_order(f, chunks[1], app);
            render_payoff_curve(f, chunks[2], app, result);
        }
        Err(e) => {
            render_problem(f, chunks[0], e);
            render_attack_order(f, chunks[1], app);
        }
    }
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, result: &SimulationResult) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Total Debt",
        format_amount(result.total_balance),
        theme::RED,
        Some(format!(
            "{} debts @ {}",
            app.debts.iter().filter(|d| !d.is_paid_off()).count(),
            format_rate(result.weighted_rate)
        )),
    );
    render_card(
        f,
        cards[1],
        "Monthly Payment",
        format_amount(result.monthly_payment),
        theme::ACCENT,
        Some(format!("incl. {} extra", format_amount(app.extra_payment))),
    );

    let today = chrono::Local::now().date_naive();
    let free_sub = if result.months == 0 {
        None
    } else {
        Some(result.payoff_month(today))
    };
    render_card(
        f,
        cards[2],
        "Debt-Free In",
        result.duration_label(),
        theme::GREEN,
        free_sub,
    );

    let saved = app.plan.savings.as_ref().and_then(|s| {
        if s.months_saved == 0 && s.interest_saved.is_zero() {
            None
        } else {
            Some(format!(
                "saves {} & {}m",
                format_amount(s.interest_saved),
                s.months_saved
            ))
        }
    });
    render_card(
        f,
        cards[3],
        "Total Interest",
        format_amount(result.total_interest),
        theme::YELLOW,
        saved,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_problem(f: &mut Frame, area: Rect, err: &PayoffError) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::RED))
        .title(Span::styled(
            " Plan unavailable ",
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        ));
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(err.to_string(), theme::owed_style())),
        Line::from(Span::styled(err.hint(), theme::dim_style())),
    ])
    .centered()
    .block(block);
    f.render_widget(msg, area);
}

fn render_attack_order(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Attack Order: {} ", app.strategy),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.plan.ordered.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No debts yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <name> <balance> <minimum> <rate> or :import a CSV",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let focus_id = app.plan.focus().map(|d| d.id.as_str());
    let lines: Vec<Line> = app
        .plan
        .ordered
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .enumerate()
        .map(|(i, debt)| {
            let is_focus = Some(debt.id.as_str()) == focus_id;
            let style = if debt.is_paid_off() {
                theme::dim_style()
            } else if is_focus {
                theme::focus_style()
            } else {
                theme::normal_style()
            };
            let marker = if is_focus { " <- extra goes here" } else { "" };
            Line::from(vec![
                Span::styled(format!(" {:>2}. ", i + 1), theme::dim_style()),
                Span::styled(format!("{:<24}", truncate(&debt.name, 24)), style),
                Span::styled(format!("{:>14}", format_amount(debt.balance)), style),
                Span::styled(
                    format!("  {:>7}", format_rate(debt.interest_rate)),
                    theme::dim_style(),
                ),
                Span::styled(marker, theme::progress_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_payoff_curve(f: &mut Frame, area: Rect, app: &App, result: &SimulationResult) {
    let data: Vec<u64> = app
        .plan
        .projection
        .iter()
        .map(|b| b.to_u64().unwrap_or(0))
        .collect();

    let title = match app.plan.projection.first() {
        Some(first) => format!(
            " Payoff Curve: {} to $0 over {} ",
            format_compact(*first),
            result.duration_label()
        ),
        None if result.months > MAX_PROJECTION_MONTHS => format!(
            " Payoff Curve: not drawn, {} is over {} years ",
            result.duration_label(),
            MAX_PROJECTION_MONTHS / 12
        ),
        None => " Payoff Curve ".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
