pub mod month_stats;
pub mod ticket_log;
