use anyhow::Result;

use crate::aggregate::{assign_sequence_numbers, filter_by_month, group_by_week_then_day, sort_chronological};
use crate::calendar::MonthWindow;
use crate::model::ticket::Ticket;
use crate::model::workweek::Workweek;
use crate::repository::TicketRepository;
use crate::service::dto::{DailyTickets, TicketDto, WeeklyTickets};

pub struct TicketLogUseCase<'a, R: TicketRepository> {
    ticket_repo: &'a R,
}

impl<'a, R: TicketRepository> TicketLogUseCase<'a, R> {
    pub fn new(ticket_repo: &'a R) -> Self {
        Self { ticket_repo }
    }

    pub fn month_log(&self, month: MonthWindow, workweek: Workweek) -> Result<Vec<WeeklyTickets>> {
        let tickets = self.ticket_repo.list()?;
        Ok(build_month_log(&tickets, month, workweek))
    }
}

/// The month's tickets by week and day, oldest first. Days outside the
/// workweek are hidden here; the grouping underneath keeps them.
pub fn build_month_log(tickets: &[Ticket], month: MonthWindow, workweek: Workweek) -> Vec<WeeklyTickets> {
    let sorted = sort_chronological(&filter_by_month(tickets, month));
    let numbers = assign_sequence_numbers(&sorted);
    let grouped = group_by_week_then_day(&sorted);

    let mut history = Vec::new();
    for week in grouped.into_values() {
        let days: Vec<DailyTickets> = week
            .days
            .into_values()
            .filter_map(|day_tickets| {
                let date = day_tickets.first()?.date.date();
                if !workweek.is_working_date(date) {
                    return None;
                }
                let tickets = day_tickets
                    .iter()
                    .map(|t| TicketDto::from_entity(t, numbers.get(&t.id).copied().unwrap_or(0)))
                    .collect();
                Some(DailyTickets {
                    date,
                    label: date.format("%A, %b %-d").to_string(),
                    tickets,
                })
            })
            .collect();

        if days.is_empty() {
            continue;
        }

        history.push(WeeklyTickets {
            week_start: week.week_start,
            label: format!("Week of {}", week.week_start.format("%b %-d")),
            days,
        });
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ticket::TicketType;
    use anyhow::Result;
    use chrono::{NaiveDate, Weekday};
    use uuid::Uuid;

    struct MockTicketRepo {
        tickets: Vec<Ticket>,
    }

    impl TicketRepository for MockTicketRepo {
        fn create(&self, _ticket: Ticket) -> Result<Ticket> { unimplemented!() }
        fn delete(&self, _id: &Uuid) -> Result<bool> { unimplemented!() }
        fn list(&self) -> Result<Vec<Ticket>> { Ok(self.tickets.clone()) }
    }

    fn ticket(title: &str, d: u32, h: u32) -> Ticket {
        let date = NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, 5, 0)
            .unwrap();
        Ticket::new(title.to_string(), TicketType::Chat, date)
    }

    fn repo() -> MockTicketRepo {
        MockTicketRepo {
            tickets: vec![
                ticket("Third", 11, 9),
                ticket("Saturday", 9, 12),
                ticket("First", 4, 10),
                ticket("Second", 4, 16),
            ],
        }
    }

    fn march() -> MonthWindow {
        MonthWindow::new(2024, 3).unwrap()
    }

    #[test]
    fn test_month_log_hides_weekend_but_keeps_numbering() {
        let repo = repo();
        let log = TicketLogUseCase::new(&repo)
            .month_log(march(), Workweek::default())
            .unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log[0].label, "Week of Mar 4");
        assert_eq!(log[0].days.len(), 1);
        assert_eq!(log[0].days[0].label, "Monday, Mar 4");

        let numbers: Vec<(String, usize)> = log
            .iter()
            .flat_map(|w| w.days.iter())
            .flat_map(|d| d.tickets.iter())
            .map(|t| (t.title.clone(), t.number))
            .collect();
        // Saturday's ticket is hidden but still holds number 3.
        assert_eq!(
            numbers,
            vec![
                ("First".to_string(), 1),
                ("Second".to_string(), 2),
                ("Third".to_string(), 4),
            ]
        );
        assert_eq!(log[1].days[0].tickets[0].time, "09:05");
    }

    #[test]
    fn test_month_log_with_saturday_workweek_shows_saturday() {
        let repo = repo();
        let log = TicketLogUseCase::new(&repo)
            .month_log(march(), Workweek::new(Weekday::Sat))
            .unwrap();
        let labels: Vec<&str> = log
            .iter()
            .flat_map(|w| w.days.iter())
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Monday, Mar 4", "Saturday, Mar 9", "Monday, Mar 11"]);
        assert_eq!(log[0].ticket_count(), 3);
    }

    #[test]
    fn test_empty_month() {
        let repo = repo();
        let april = march().next();
        assert!(TicketLogUseCase::new(&repo)
            .month_log(april, Workweek::default())
            .unwrap()
            .is_empty());
    }
}
