pub mod components;
pub mod keymap;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use ledger::Category;

use crate::surface::{InputField, Row, ScreenState, signed_amount};
use components::card::Card;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &ScreenState) {
    let theme = Theme::default();

    // Main layout: month header, totals, entry columns, input bar, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Month header
            Constraint::Length(3), // Totals
            Constraint::Min(5),    // Entry columns
            Constraint::Length(3), // Input bar
            Constraint::Length(1), // Bottom bar
        ])
        .split(frame.area());

    render_month(frame, layout[0], state, &theme);
    render_totals(frame, layout[1], state, &theme);
    render_columns(frame, layout[2], state, &theme);
    render_input_bar(frame, layout[3], state, &theme);
    render_bottom_bar(frame, layout[4], &theme);
}

fn render_month(frame: &mut Frame<'_>, area: Rect, state: &ScreenState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Available budget in ", Style::default().fg(theme.dim)),
        Span::styled(state.month_label.clone(), Style::default().fg(theme.text)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, state: &ScreenState, theme: &Theme) {
    let totals = &state.totals;

    // The budget line borrows the income sign while it is non-negative.
    let budget_category = if totals.budget.is_negative() {
        Category::Expense
    } else {
        Category::Income
    };
    let budget_color = match budget_category {
        Category::Income => theme.positive,
        Category::Expense => theme.negative,
    };

    let ratio = match totals.expense_ratio {
        Some(value) if value > 0 => format!("{value}%"),
        _ => "---".to_string(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Budget  ", Style::default().fg(theme.dim)),
            Span::styled(
                signed_amount(totals.budget, budget_category),
                Style::default().fg(budget_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Income  ", Style::default().fg(theme.dim)),
            Span::styled(
                signed_amount(totals.total_income, Category::Income),
                Style::default().fg(theme.positive),
            ),
        ]),
        Line::from(vec![
            Span::styled("Expense ", Style::default().fg(theme.dim)),
            Span::styled(
                signed_amount(totals.total_expense, Category::Expense),
                Style::default().fg(theme.negative),
            ),
            Span::raw("  "),
            Span::styled(ratio, Style::default().fg(theme.dim)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_columns(frame: &mut Frame<'_>, area: Rect, state: &ScreenState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_entry_column(
        frame,
        cols[0],
        Category::Income,
        &state.income_rows,
        0,
        state,
        theme,
    );
    render_entry_column(
        frame,
        cols[1],
        Category::Expense,
        &state.expense_rows,
        state.income_rows.len(),
        state,
        theme,
    );
}

fn render_entry_column(
    frame: &mut Frame<'_>,
    area: Rect,
    category: Category,
    rows: &[Row],
    offset: usize,
    state: &ScreenState,
    theme: &Theme,
) {
    let title = match category {
        Category::Income => "Income",
        Category::Expense => "Expense",
    };
    let card = Card::new(title, theme).focused(state.input.category == category);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No entries", Style::default().fg(theme.dim))),
            inner,
        );
        return;
    }

    let amount_color = match category {
        Category::Income => theme.positive,
        Category::Expense => theme.negative,
    };

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .take(inner.height as usize)
        .map(|(indx, row)| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<20}", row.description),
                    Style::default().fg(theme.text),
                ),
                Span::raw(" "),
                Span::styled(
                    signed_amount(row.amount, category),
                    Style::default().fg(amount_color),
                ),
            ];
            if let Some(label) = &row.percentage_label {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(label.clone(), Style::default().fg(theme.dim)));
            }

            let mut item = ListItem::new(Line::from(spans));
            if state.selected == Some(offset + indx) {
                item = item.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            item
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_input_bar(frame: &mut Frame<'_>, area: Rect, state: &ScreenState, theme: &Theme) {
    let input = &state.input;

    let card = Card::new("add entry", theme).alert(input.expense_style);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),  // Category tag
            Constraint::Min(12),    // Description
            Constraint::Length(14), // Value
        ])
        .split(inner);

    let tag_color = match input.category {
        Category::Income => theme.positive,
        Category::Expense => theme.negative,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("[{}]", input.category.tag()),
            Style::default().fg(tag_color),
        )),
        fields[0],
    );

    render_field(
        frame,
        fields[1],
        &input.description,
        "description",
        input.focus == InputField::Description,
        theme,
    );
    render_field(
        frame,
        fields[2],
        &input.value,
        "value",
        input.focus == InputField::Value,
        theme,
    );
}

/// Renders a simple input field: value and cursor, or a dim placeholder.
fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: &Theme,
) {
    let (text, style) = if value.is_empty() && !focused {
        (placeholder.to_string(), Style::default().fg(theme.dim))
    } else {
        let cursor = if focused { "│" } else { "" };
        let style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        (format!("{value}{cursor}"), style)
    };

    frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let accent = Style::default().fg(theme.accent);
    let parts = vec![
        Span::styled("Enter", accent),
        Span::raw(" add  "),
        Span::styled("Tab", accent),
        Span::raw(" field  "),
        Span::styled("←/→", accent),
        Span::raw(" type  "),
        Span::styled("↑/↓", accent),
        Span::raw(" row  "),
        Span::styled("Del", accent),
        Span::raw(" delete  "),
        Span::styled("Esc", accent),
        Span::raw(" quit"),
    ];

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
