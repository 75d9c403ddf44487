use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};
use ticketpace_core::TicketType;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode, View};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    good: Color,
    bad: Color,
    chat: Color,
    forum: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    good: Color::Green,
    bad: Color::Red,
    chat: Color::Magenta,
    forum: Color::Blue,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    match app.view {
        View::Dashboard => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(main_chunks[1]);
            draw_stats(f, app, content_chunks[0]);
            draw_today(f, app, content_chunks[1]);
        }
        View::Log => draw_log(f, app, main_chunks[1]),
    }

    draw_input(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => "a: add | s: settings | d: delete | h/l: month | g: this month | w: workweek | v: view | q: quit",
        InputMode::Adding => "Enter: save | Tab: forum/chat | Esc: cancel | options: type:chat date:yest",
        InputMode::Settings => "Enter: save | Esc: cancel | goal:10 extra:4 | day numbers toggle a day off",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(THEME.muted))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(1), Constraint::Length(36)])
        .split(inner);

    let title = Paragraph::new(Span::styled(
        "TICKET PACE",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, chunks[0]);

    let span: Vec<String> = app.workweek.span().iter().map(|d| d.to_string()).collect();
    let workweek = Paragraph::new(Span::styled(
        format!("Workweek: {}", span.join(" ")),
        Style::default().fg(THEME.muted),
    ))
    .alignment(Alignment::Center);
    f.render_widget(workweek, chunks[1]);

    let nav = Paragraph::new(Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(
            app.month.to_string(),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(THEME.text)),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(nav, chunks[2]);
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", label), Style::default().fg(THEME.muted)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(area);

    let stats = &app.stats;
    let pace = if stats.on_track { THEME.good } else { THEME.bad };

    let lines = vec![
        stat_line("Tickets today", stats.tickets_today.to_string(), THEME.primary),
        stat_line("Daily average", format!("{:.1}", stats.daily_average), pace),
        stat_line("Daily goal", stats.daily_goal.to_string(), THEME.text),
        stat_line("Remaining", stats.remaining.to_string(), Color::Yellow),
        stat_line("Days off", stats.days_off_count.to_string(), THEME.muted),
        stat_line(
            "Hours of extra tasks",
            format!("{}h ({:.1}d)", stats.extra_task_hours, stats.extra_task_day_equivalents),
            THEME.good,
        ),
        Line::from(""),
        stat_line(
            "Workdays",
            format!("{} ({} so far)", stats.total_workdays, stats.worked_days_so_far),
            THEME.text,
        ),
        stat_line(
            "This month",
            format!("{} / {}", stats.tickets_this_month, stats.monthly_goal),
            THEME.text,
        ),
    ];

    let summary = Paragraph::new(lines).block(
        Block::default()
            .title(" Month Stats ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted)),
    );
    f.render_widget(summary, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Monthly Goal ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted)),
        )
        .gauge_style(Style::default().fg(pace))
        .ratio(f64::from(stats.progress_percentage) / 100.0)
        .label(format!("{}%", stats.progress_percentage));
    f.render_widget(gauge, chunks[1]);
}

fn kind_span(kind: TicketType) -> Span<'static> {
    let color = match kind {
        TicketType::Forum => THEME.forum,
        TicketType::Chat => THEME.chat,
    };
    Span::styled(kind.to_string(), Style::default().fg(color))
}

fn draw_today(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .today_tickets
        .iter()
        .enumerate()
        .map(|(i, ticket)| {
            Row::new(vec![
                Span::raw((i + 1).to_string()),
                kind_span(ticket.kind),
                Span::raw(ticket.date.format("%H:%M").to_string()),
                Span::styled(ticket.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let count = app.today_tickets.len();
    let title = format!(" Today's Tickets ({}) ", count);

    let table = Table::new(
        rows,
        [
            Constraint::Length(3), // #
            Constraint::Length(6), // Type
            Constraint::Length(6), // Time
            Constraint::Min(10),   // Title
        ],
    )
    .header(Row::new(vec!["#", "Type", "Time", "Title"]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(THEME.muted).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if app.log.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tickets yet. Tickets will appear here as you add them.",
            Style::default().fg(THEME.muted),
        )));
    }

    for week in &app.log {
        lines.push(Line::from(Span::styled(
            week.label.clone(),
            Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
        )));
        for day in &week.days {
            lines.push(Line::from(Span::styled(
                format!("  {}", day.label),
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
            )));
            for ticket in &day.tickets {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {:>3}  ", ticket.number), Style::default().fg(THEME.muted)),
                    kind_span(ticket.kind),
                    Span::raw(format!("  {}  ", ticket.time)),
                    Span::raw(ticket.title.clone()),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    let log = Paragraph::new(lines)
        .scroll((app.log_scroll, 0))
        .block(
            Block::default()
                .title(format!(" All tickets of {} ", app.month))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(log, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, style) = match app.input_mode {
        InputMode::Adding => (
            format!(" Quick Add: {} ", app.kind),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Settings => (
            format!(" Settings: days off in {} ", app.month),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Normal => (" Quick Add ".to_string(), Style::default().fg(THEME.muted)),
    };

    let text = match (&app.input_mode, &app.message) {
        (InputMode::Normal, Some(message)) => message.clone(),
        _ => app.input.clone(),
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(input, area);

    if !matches!(app.input_mode, InputMode::Normal) {
        let before = &app.input[..app.byte_index(app.cursor_position)];
        let x = area.x + 1 + before.width() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}
