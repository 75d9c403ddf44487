mod history;
mod stats;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};
use ticketpace_core::{
    parse_human_date, parse_weekday_str, FileGoalProfileRepository, FileTicketRepository,
    MonthStatsUseCase, MonthWindow, ProfileService, TicketLogUseCase, TicketService, TicketType,
    Workweek,
};

#[derive(Parser)]
#[command(name = "ticketpace")]
#[command(about = "Log support tickets and track them against a monthly goal", long_about = None)]
struct Cli {
    /// Directory holding tickets.json and profile.json (default: ~/.ticketpace)
    #[arg(long, global = true, env = "TICKETPACE_DIR")]
    data_dir: Option<PathBuf>,

    /// First day of the five day workweek (mon, tue, ..., sun)
    #[arg(long, global = true, default_value = "mon")]
    work_start: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record a ticket from its URL
    Add {
        url: String,
        /// forum or chat
        #[arg(short = 't', long = "type", default_value = "forum")]
        kind: String,
        /// When it was resolved: today, yesterday, -2d, fri, 2024-03-04, "2024-03-04 14:00"
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List today's tickets
    Today,
    /// Delete a ticket by id or id prefix
    Delete { id: String },
    /// Show every ticket of a month grouped by week and day
    Log {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show progress against the monthly goal
    Stats {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show or change the goal settings
    Settings {
        #[arg(long)]
        daily_goal: Option<u32>,
        #[arg(long)]
        extra_hours: Option<f64>,
    },
    /// Toggle days off for a month
    Off {
        #[arg(required = true)]
        days: Vec<u32>,
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Open the Terminal User Interface
    Tui {
        /// Keep tickets and settings in memory only
        #[arg(long)]
        ephemeral: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TICKETPACE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_month(month: Option<String>) -> Result<MonthWindow> {
    match month {
        Some(m) => m.parse(),
        None => Ok(MonthWindow::containing(Local::now().date_naive())),
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let workweek = Workweek::new(parse_weekday_str(&cli.work_start)?);
    debug!(start = %workweek.start, "workweek");
    let now = Local::now().naive_local();
    let today = now.date();

    let command = match cli.command {
        Some(command) => command,
        None => return tui::run(cli.data_dir, workweek, false),
    };
    if let Commands::Tui { ephemeral } = command {
        return tui::run(cli.data_dir, workweek, ephemeral);
    }

    let ticket_repo = FileTicketRepository::new(cli.data_dir.clone())?;
    let profile_repo = FileGoalProfileRepository::new(cli.data_dir)?;

    match command {
        Commands::Add { url, kind, date } => {
            let kind: TicketType = kind.parse()?;
            let date = match date {
                Some(d) => parse_human_date(&d, now)?,
                None => now,
            };
            let service = TicketService::new(ticket_repo);
            if let Some(ticket) = service.add_ticket(&url, kind, date)? {
                println!("Ticket added: {} (ID: {})", ticket.title, ticket.short_id());
                println!("  Type: {}", ticket.kind);
                println!("  Date: {}", ticket.date.format("%Y-%m-%d %H:%M"));
            }
        }
        Commands::Today => {
            let service = TicketService::new(ticket_repo);
            history::show_today(&service.tickets_on(today)?);
        }
        Commands::Delete { id } => {
            let service = TicketService::new(ticket_repo);
            if let Some(id) = service.resolve_id(&id)? {
                service.delete_ticket(&id)?;
                println!("Ticket deleted.");
            }
        }
        Commands::Log { month } => {
            let month = resolve_month(month)?;
            let log = TicketLogUseCase::new(&ticket_repo).month_log(month, workweek)?;
            history::show_month_log(month, &log);
        }
        Commands::Stats { month } => {
            let month = resolve_month(month)?;
            let stats = MonthStatsUseCase::new(&ticket_repo, &profile_repo).month_stats(month, workweek, today)?;
            stats::show_month_stats(month, &stats);
        }
        Commands::Settings { daily_goal, extra_hours } => {
            let service = ProfileService::new(profile_repo);
            let mut profile = service.get_profile()?;
            if daily_goal.is_some() || extra_hours.is_some() {
                profile = service.set_goals(
                    daily_goal.unwrap_or(profile.daily_goal),
                    extra_hours.unwrap_or(profile.extra_task_hours),
                )?;
                println!("Settings saved.");
            }
            stats::show_settings(&profile, resolve_month(None)?, workweek);
        }
        Commands::Off { days, month } => {
            let month = resolve_month(month)?;
            let service = ProfileService::new(profile_repo);
            for day in days {
                let date = month
                    .date(day)
                    .ok_or_else(|| anyhow!("{} has no day {}", month, day))?;
                if !workweek.is_working_date(date) {
                    println!("{} is not a working day, skipped.", date.format("%a %b %-d"));
                    continue;
                }
                let now_off = service.toggle_day_off(month, day)?;
                println!(
                    "{}: {}",
                    date.format("%a %b %-d"),
                    if now_off { "day off" } else { "working" }
                );
            }
        }
        Commands::Tui { .. } => {}
    }
    Ok(())
}
