use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::{
    data::AIRDROP_STATS,
    models::{AllocationCategory, RowField, ShareMode},
    session::Slider,
    tui::app::{App, Focus, InputMode, Screen},
    utils::{format_currency, format_large_number, format_number, format_share},
};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Form => draw_form_screen(frame, app),
        Screen::Comparison => draw_comparison_screen(frame, app),
    }
}

fn draw_form_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(14),
            Constraint::Length(4),
        ])
        .split(frame.size());

    let mut heading = format!(
        "🪂 {} - {} mode",
        app.session.settings().app.name,
        app.session.mode().as_str()
    );
    let protocol = app.session.protocol();
    if !protocol.is_empty() {
        heading.push_str(&format!(" | {}", protocol.summary()));
    }
    let title = Paragraph::new(heading)
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(5)])
        .split(body[0]);

    match app.session.mode() {
        ShareMode::Basic => draw_basic_inputs(frame, app, left[0]),
        ShareMode::Advanced => draw_activity_table(frame, app, left[0]),
    }
    draw_valuation_inputs(frame, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10),
            Constraint::Min(3),
            Constraint::Length(7),
        ])
        .split(body[1]);

    draw_estimate(frame, app, right[0]);
    draw_breakdown(frame, app, right[1]);
    draw_allocation(frame, app, right[2]);

    draw_help(frame, app, chunks[2]);
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).title(title).border_style(style)
}

fn slider_line(label: &str, value: String, selected: bool) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let style = if selected {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{}{}: ", marker, label), style),
        Span::styled(value, style.fg(Color::Cyan)),
    ])
}

fn slider_display(app: &App, slider: Slider) -> String {
    let value = app.session.slider_value(slider);
    match slider {
        Slider::TotalActivities => format_large_number(value),
        Slider::UserActivityPercentage => format!("{:.4}%", value),
        Slider::ActivityWeight => format!("{:.1}x", value),
        Slider::AirdropPercentage => format!("{:.1}%", value),
        Slider::Fdv => format_currency(value, 0),
    }
}

fn draw_basic_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Activity;
    let lines: Vec<Line> = Slider::BASIC
        .iter()
        .enumerate()
        .map(|(i, slider)| {
            slider_line(
                slider.label(),
                slider_display(app, *slider),
                focused && i == app.selected_index,
            )
        })
        .collect();

    let inputs = Paragraph::new(lines).block(panel_block("Activity (←/→ to adjust)", focused));
    frame.render_widget(inputs, area);
}

fn draw_activity_table(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Activity;
    let rows_data = app.session.rows();

    if rows_data.is_empty() {
        let empty = Paragraph::new("Add activities to start calculation.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(panel_block("Define Activities & Weights", focused));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(RowField::ALL.iter().map(|f| Cell::from(f.label())))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = rows_data
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let selected_row = focused && i == app.selected_index;
            let cells = RowField::ALL.iter().enumerate().map(|(col, field)| {
                let selected_cell = selected_row && col == app.selected_column;
                let text = if selected_cell && app.input_mode == InputMode::Editing {
                    format!("{}_", app.current_input)
                } else {
                    row.field_text(*field)
                };
                let style = if selected_cell {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                Cell::from(text).style(style)
            });
            let style = if selected_row {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let duplicates = app.session.duplicate_types();
    let title = if duplicates.is_empty() {
        "Define Activities & Weights".to_string()
    } else {
        let names: Vec<&str> = duplicates.iter().map(|t| t.as_str()).collect();
        format!("Define Activities & Weights (duplicate: {})", names.join(", "))
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(panel_block(&title, focused));
    frame.render_widget(table, area);
}

fn draw_valuation_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Valuation;
    let mut lines: Vec<Line> = Slider::VALUATION
        .iter()
        .enumerate()
        .map(|(i, slider)| {
            slider_line(
                slider.label(),
                slider_display(app, *slider),
                focused && i == app.valuation_index,
            )
        })
        .collect();

    let participants = if app.is_editing_participants() {
        format!("{}_", app.current_input)
    } else {
        format_number(app.session.valuation().total_participants as f64)
    };
    lines.push(slider_line(
        "Estimated Participants",
        participants,
        focused && app.valuation_index == Slider::VALUATION.len(),
    ));

    let panel = Paragraph::new(lines).block(panel_block("Valuation", focused));
    frame.render_widget(panel, area);
}

fn draw_estimate(frame: &mut Frame, app: &App, area: Rect) {
    let projection = &app.projection;
    let valuation = &projection.valuation;
    let projected_rank = app
        .comparison
        .iter()
        .position(|e| e.is_current)
        .map(|idx| format!("#{} of {}", idx + 1, app.comparison.len()))
        .unwrap_or_else(|| "unranked".to_string());

    let text = vec![
        Line::from(vec![
            Span::raw("Estimated Value: "),
            Span::styled(
                format_currency(valuation.estimated_user_airdrop, 2),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "  Min: {}   Max: {}",
            format_currency(valuation.min_estimate, 2),
            format_currency(valuation.max_estimate, 2)
        )),
        Line::from(Span::styled(
            "  Range: +/- 50% of estimate",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::raw("Your Share: "),
            Span::styled(format_share(projection.share.user_share), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(format!(
            "Total Airdrop Value: {}",
            format_currency(valuation.total_airdrop_value, 0)
        )),
        Line::from(format!(
            "Protocol Activities ({}): {}",
            if projection.share.mode == ShareMode::Advanced { "Raw Sum" } else { "Basic" },
            format_large_number(projection.share.raw_total_protocol_activities)
        )),
        Line::from(format!("Historical Rank: {}", projected_rank)),
    ];

    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Projection"))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn draw_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let share = &app.projection.share;
    let lines: Vec<Line> = if share.mode == ShareMode::Basic {
        vec![Line::from(Span::styled(
            "Switch to Advanced mode for a per-activity breakdown",
            Style::default().fg(Color::DarkGray),
        ))]
    } else if share.breakdown.is_empty() {
        vec![Line::from("No contributing activities")]
    } else {
        share
            .breakdown
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::raw(format!("  {}: ", entry.activity_type)),
                    Span::styled(
                        format!("{:.6}%", entry.percentage_of_pool),
                        Style::default().fg(Color::Cyan),
                    ),
                ])
            })
            .collect()
    };

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Share of Weighted Pool"));
    frame.render_widget(panel, area);
}

fn category_color(category: AllocationCategory) -> Color {
    match category {
        AllocationCategory::Airdrop => Color::Blue,
        AllocationCategory::Team => Color::Red,
        AllocationCategory::Investors => Color::Rgb(249, 115, 22),
        AllocationCategory::Treasury => Color::Yellow,
        AllocationCategory::EcosystemDev => Color::Green,
    }
}

fn draw_allocation(frame: &mut Frame, app: &App, area: Rect) {
    let bar_width = area.width.saturating_sub(24) as f64;
    let lines: Vec<Line> = app
        .projection
        .allocation
        .visible()
        .iter()
        .map(|slice| {
            let bar_len = (slice.percentage / 100.0 * bar_width).round() as usize;
            Line::from(vec![
                Span::raw(format!("{:<14}{:>5.1}% ", slice.category.as_str(), slice.percentage)),
                Span::styled("█".repeat(bar_len), Style::default().fg(category_color(slice.category))),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Token Allocation"));
    frame.render_widget(panel, area);
}

fn key(label: &str, color: Color) -> Span<'_> {
    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = if app.input_mode == InputMode::Editing {
        vec![Line::from(vec![
            Span::raw("Type a value, "),
            key("Enter", Color::Green),
            Span::raw(" to save, "),
            key("Esc", Color::Red),
            Span::raw(" to cancel"),
        ])]
    } else {
        vec![Line::from(vec![
            key("Tab", Color::Green),
            Span::raw(" panel | "),
            key("m", Color::Green),
            Span::raw(" mode | "),
            key("a", Color::Green),
            Span::raw(" add | "),
            key("Del", Color::Green),
            Span::raw(" remove | "),
            key("Enter", Color::Green),
            Span::raw(" edit | "),
            key("c", Color::Green),
            Span::raw(" compare | "),
            key("r", Color::Green),
            Span::raw(" reset | "),
            key("q", Color::Red),
            Span::raw(" quit"),
        ])]
    };

    if let Some(error) = &app.error_message {
        lines.push(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ]));
    }

    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn draw_comparison_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let title = Paragraph::new("📊 Historical Airdrops vs. Current Projection")
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let rows: Vec<Row> = app
        .comparison
        .iter()
        .skip(app.comparison_offset)
        .map(|entry| {
            let style = if entry.is_current {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(entry.rank_label()),
                Cell::from(entry.name.clone()),
                Cell::from(format_currency(entry.value_usd, 0)),
                Cell::from(entry.date_label()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(28),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Rank", "Airdrop", "Value", "Date"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Ranking (↑/↓ to scroll)"));
    frame.render_widget(table, chunks[1]);

    let stats = Paragraph::new(vec![
        Line::from(AIRDROP_STATS.peak_timing),
        Line::from(AIRDROP_STATS.allocation_range),
        Line::from(AIRDROP_STATS.total_value_distributed),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL).title("Did you know"))
    .wrap(Wrap { trim: true });
    frame.render_widget(stats, chunks[2]);

    let help = Paragraph::new("Press 'b' to go back | 'q' to quit")
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}
