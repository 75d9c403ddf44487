pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use calendar::{workday_count, worked_days_so_far, MonthWindow};
pub use model::goal::GoalProfile;
pub use model::ticket::{derive_title, Ticket, TicketType};
pub use model::workweek::Workweek;
pub use repository::{
    FileGoalProfileRepository, FileTicketRepository, GoalProfileRepository,
    InMemoryGoalProfileRepository, InMemoryTicketRepository, TicketRepository,
};
pub use input::{parse_args, expand_key, ParsedInput};
pub use time::{parse_human_date, parse_weekday_str};
pub use service::ticket_service::TicketService;
pub use service::profile_service::ProfileService;
pub use service::dto::{DailyTickets, TicketDto, WeeklyTickets};
pub use usecase::month_stats::{compute_month_stats, MonthStats, MonthStatsUseCase};
pub use usecase::ticket_log::{build_month_log, TicketLogUseCase};
