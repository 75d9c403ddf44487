use tabled::settings::object::{Cell, Columns, Rows};
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use ticketpace_core::{GoalProfile, MonthStats, MonthWindow, Workweek};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Stat")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(label: &'static str, value: impl ToString) -> StatRow {
    StatRow { label, value: value.to_string() }
}

pub fn show_month_stats(month: MonthWindow, stats: &MonthStats) {
    println!("\x1b[1m{} overview\x1b[0m", month);

    let rows = vec![
        row("Tickets today", stats.tickets_today),
        row("Daily average", format!("{:.1}", stats.daily_average)),
        row("Daily goal", stats.daily_goal),
        row("Remaining", stats.remaining),
        row("Days off", stats.days_off_count),
        row(
            "Hours of extra tasks",
            format!("{}h ({:.1}d)", stats.extra_task_hours, stats.extra_task_day_equivalents),
        ),
        row("Workdays", format!("{} ({} so far)", stats.total_workdays, stats.worked_days_so_far)),
        row("Tickets this month", format!("{} / {}", stats.tickets_this_month, stats.monthly_goal)),
        row("Progress", format!("{}%", stats.progress_percentage)),
    ];

    let pace = if stats.on_track { Color::FG_GREEN } else { Color::FG_RED };
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN))
        .with(Modify::new(Cell::new(2, 1)).with(pace));
    println!("{}", table);

    println!("{}", progress_bar(stats.progress_percentage, 40));
    println!("{}", if stats.on_track { "On track" } else { "Behind the daily goal" });
}

pub fn show_settings(profile: &GoalProfile, month: MonthWindow, workweek: Workweek) {
    let days_off: Vec<String> = profile
        .days_off_for(month)
        .iter()
        .map(|d| d.to_string())
        .collect();
    let span: Vec<String> = workweek.span().iter().map(|d| d.to_string()).collect();

    let rows = vec![
        row("Daily goal", profile.daily_goal),
        row("Extra task hours", profile.extra_task_hours),
        row("Workweek", span.join(" ")),
        row(
            "Days off",
            if days_off.is_empty() { "-".to_string() } else { format!("{} ({})", days_off.join(", "), month) },
        ),
    ];

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN))
        .with(Modify::new(Columns::first()).with(Color::FG_BLUE));
    println!("{}", table);
}

fn progress_bar(percentage: u32, width: usize) -> String {
    let filled = (percentage.min(100) as usize * width) / 100;
    format!("[{}{}] {}%", "#".repeat(filled), "-".repeat(width - filled), percentage)
}
