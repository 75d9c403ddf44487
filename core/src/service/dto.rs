use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ticket::{Ticket, TicketType};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TicketDto {
    pub number: usize, // 1-based, month-wide
    pub id: Uuid,
    pub title: String,
    pub kind: TicketType,
    pub time: String, // HH:MM
}

impl TicketDto {
    pub fn from_entity(ticket: &Ticket, number: usize) -> Self {
        Self {
            number,
            id: ticket.id,
            title: ticket.title.clone(),
            kind: ticket.kind,
            time: ticket.date.format("%H:%M").to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyTickets {
    pub date: NaiveDate,
    pub label: String, // "Monday, Mar 4"
    pub tickets: Vec<TicketDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeeklyTickets {
    pub week_start: NaiveDate,
    pub label: String, // "Week of Mar 4"
    pub days: Vec<DailyTickets>,
}

impl WeeklyTickets {
    pub fn ticket_count(&self) -> usize {
        self.days.iter().map(|d| d.tickets.len()).sum()
    }
}
