use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use ratatui::widgets::TableState;
use ticketpace_core::{
    build_month_log, compute_month_stats, expand_key, parse_args, parse_human_date,
    FileGoalProfileRepository, FileTicketRepository, GoalProfileRepository,
    InMemoryGoalProfileRepository, InMemoryTicketRepository, MonthStats, MonthWindow,
    ProfileService, Ticket, TicketRepository, TicketService, TicketType, WeeklyTickets, Workweek,
};

const ADD_KEYS: [&str; 2] = ["type", "date"];
const SETTINGS_KEYS: [&str; 2] = ["goal", "extra"];

pub enum InputMode {
    Normal,
    Adding,
    Settings,
}

#[derive(Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Log,
}

pub struct App {
    pub tickets: TicketService<Box<dyn TicketRepository>>,
    pub profiles: ProfileService<Box<dyn GoalProfileRepository>>,
    pub month: MonthWindow,
    pub workweek: Workweek,
    pub today: NaiveDate,
    pub today_tickets: Vec<Ticket>,
    pub stats: MonthStats,
    pub log: Vec<WeeklyTickets>,
    pub log_scroll: u16,
    pub state: TableState,
    pub view: View,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub kind: TicketType,
    pub message: Option<String>,
}

impl App {
    pub fn new(data_dir: Option<PathBuf>, workweek: Workweek, ephemeral: bool) -> Result<App> {
        let (ticket_repo, profile_repo): (Box<dyn TicketRepository>, Box<dyn GoalProfileRepository>) =
            if ephemeral {
                (
                    Box::new(InMemoryTicketRepository::new()),
                    Box::new(InMemoryGoalProfileRepository::default()),
                )
            } else {
                (
                    Box::new(FileTicketRepository::new(data_dir.clone())?),
                    Box::new(FileGoalProfileRepository::new(data_dir)?),
                )
            };

        let today = Local::now().date_naive();
        let mut app = App {
            tickets: TicketService::new(ticket_repo),
            profiles: ProfileService::new(profile_repo),
            month: MonthWindow::containing(today),
            workweek,
            today,
            today_tickets: Vec::new(),
            stats: MonthStats::default(),
            log: Vec::new(),
            log_scroll: 0,
            state: TableState::default(),
            view: View::Dashboard,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            kind: TicketType::default(),
            message: None,
        };
        app.reload()?;
        if !app.today_tickets.is_empty() {
            app.state.select(Some(0));
        }
        Ok(app)
    }

    /// Recomputes everything shown from the stores.
    pub fn reload(&mut self) -> Result<()> {
        self.today = Local::now().date_naive();
        let all = self.tickets.list_tickets()?;
        let profile = self.profiles.get_profile()?;

        self.today_tickets = self.tickets.tickets_on(self.today)?;
        self.stats = compute_month_stats(&all, self.month, &profile, self.workweek, self.today);
        self.log = build_month_log(&all, self.month, self.workweek);
        Ok(())
    }

    fn refresh(&mut self) {
        if let Err(e) = self.reload() {
            self.message = Some(format!("Error: {}", e));
        }
    }

    pub fn next(&mut self) {
        if self.view == View::Log {
            self.log_scroll = self.log_scroll.saturating_add(1);
            return;
        }
        if self.today_tickets.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.today_tickets.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.view == View::Log {
            self.log_scroll = self.log_scroll.saturating_sub(1);
            return;
        }
        if self.today_tickets.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.today_tickets.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
        self.log_scroll = 0;
        self.refresh();
    }

    pub fn previous_month(&mut self) {
        self.month = self.month.prev();
        self.log_scroll = 0;
        self.refresh();
    }

    pub fn current_month(&mut self) {
        self.month = MonthWindow::containing(Local::now().date_naive());
        self.log_scroll = 0;
        self.refresh();
    }

    pub fn cycle_workweek(&mut self) {
        self.workweek = self.workweek.next();
        self.refresh();
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Dashboard => View::Log,
            View::Log => View::Dashboard,
        };
    }

    pub fn delete_ticket(&mut self) {
        if self.view != View::Dashboard { return; }
        if let Some(i) = self.state.selected() {
            if let Some(ticket) = self.today_tickets.get(i) {
                if let Err(e) = self.tickets.delete_ticket(&ticket.id) {
                    self.message = Some(format!("Error: {}", e));
                }
            }
            self.refresh();

            // Adjust selection after reload
            if self.today_tickets.is_empty() {
                self.state.select(None);
            } else if i >= self.today_tickets.len() {
                self.state.select(Some(self.today_tickets.len() - 1));
            } else {
                self.state.select(Some(i));
            }
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
        self.message = None;
    }

    /// Prompt for `goal:N extra:H` and day numbers to toggle off in the shown month.
    pub fn enter_settings_mode(&mut self) {
        self.input_mode = InputMode::Settings;
        self.input.clear();
        self.cursor_position = 0;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn byte_index(&self, chars: usize) -> usize {
        self.input.chars().take(chars).map(|c| c.len_utf8()).sum()
    }

    pub fn submit_command(&mut self) {
        if !self.input.trim().is_empty() {
            let result = match self.input_mode {
                InputMode::Settings => self.submit_settings(),
                _ => self.submit_add(),
            };
            if let Err(e) = result {
                self.message = Some(format!("Error: {}", e));
            }
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_add(&mut self) -> Result<()> {
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let parsed = parse_args(&args);

        let now = Local::now().naive_local();
        let mut kind = self.kind;
        let mut date = now;
        for (key, value) in parsed.metadata {
            match expand_key(&key, &ADD_KEYS)?.as_str() {
                "type" => kind = value.parse()?,
                "date" => date = parse_human_date(&value, now)?,
                _ => {}
            }
        }

        if let Some(ticket) = self.tickets.add_ticket(&parsed.positional, kind, date)? {
            self.message = Some(format!("Added {} ({})", ticket.title, ticket.short_id()));
        }
        self.reload()?;
        if !self.today_tickets.is_empty() && self.state.selected().is_none() {
            self.state.select(Some(0));
        }
        Ok(())
    }

    fn submit_settings(&mut self) -> Result<()> {
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let parsed = parse_args(&args);

        let mut notes = Vec::new();
        if !parsed.metadata.is_empty() {
            let current = self.profiles.get_profile()?;
            let mut daily_goal = current.daily_goal;
            let mut extra = current.extra_task_hours;
            for (key, value) in parsed.metadata {
                match expand_key(&key, &SETTINGS_KEYS)?.as_str() {
                    "goal" => {
                        daily_goal = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid daily goal: {}", value))?
                    }
                    "extra" => {
                        extra = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid extra hours: {}", value))?
                    }
                    _ => {}
                }
            }
            let profile = self.profiles.set_goals(daily_goal, extra)?;
            notes.push(format!("goal {}/day, {}h extra", profile.daily_goal, profile.extra_task_hours));
        }

        for word in parsed.positional.split_whitespace() {
            let day: u32 = word.parse().map_err(|_| anyhow!("Not a day number: {}", word))?;
            let date = self
                .month
                .date(day)
                .ok_or_else(|| anyhow!("{} has no day {}", self.month, day))?;
            if !self.workweek.is_working_date(date) {
                notes.push(format!("{} skipped", date.format("%a %-d")));
                continue;
            }
            let now_off = self.profiles.toggle_day_off(self.month, day)?;
            notes.push(format!(
                "{} {}",
                date.format("%a %-d"),
                if now_off { "off" } else { "working" }
            ));
        }

        self.message = Some(notes.join(", "));
        self.reload()
    }
}
