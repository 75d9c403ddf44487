use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use ticketpace_core::{MonthWindow, Ticket, WeeklyTickets};

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn show_today(tickets: &[Ticket]) {
    if tickets.is_empty() {
        println!("No tickets today. Use `ticketpace add <URL>` to add one.");
        return;
    }

    let rows: Vec<LogRow> = tickets
        .iter()
        .enumerate()
        .map(|(i, t)| LogRow {
            day: String::new(),
            number: i + 1,
            time: t.date.format("%H:%M").to_string(),
            kind: t.kind.to_string(),
            title: t.title.clone(),
            id: t.short_id(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
    println!(
        "{} ticket{} today",
        tickets.len(),
        if tickets.len() == 1 { "" } else { "s" }
    );
}

pub fn show_month_log(month: MonthWindow, log: &[WeeklyTickets]) {
    println!("\x1b[1mAll tickets of {}\x1b[0m", month);
    if log.is_empty() {
        println!("No tickets yet. Tickets will appear here as you add them.");
        return;
    }

    for week in log {
        println!(
            "\n\x1b[1;36m{}\x1b[0m ({} tickets)",
            week.label,
            week.ticket_count()
        );

        let mut rows = Vec::new();
        for day in &week.days {
            for (i, ticket) in day.tickets.iter().enumerate() {
                // Day column: Only show on first row of the day group
                let day_col = if i == 0 { day.label.clone() } else { String::new() };
                rows.push(LogRow {
                    day: day_col,
                    number: ticket.number,
                    time: ticket.time.clone(),
                    kind: ticket.kind.to_string(),
                    title: ticket.title.clone(),
                    id: ticket.id.to_string()[..8].to_string(),
                });
            }
        }

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        println!("{}", table);
    }
}
