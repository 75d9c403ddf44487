use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::MonthWindow;
use crate::model::ticket::Ticket;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeekGroup {
    pub week_start: NaiveDate,
    pub days: BTreeMap<String, Vec<Ticket>>, // Key: "YYYY-MM-DD"
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn filter_by_month(tickets: &[Ticket], month: MonthWindow) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|t| month.contains(t.date.date()))
        .cloned()
        .collect()
}

/// Ascending by date; equal dates keep their input order.
pub fn sort_chronological(tickets: &[Ticket]) -> Vec<Ticket> {
    let mut sorted = tickets.to_vec();
    sorted.sort_by_key(|t| t.date);
    sorted
}

/// Buckets tickets by the Monday of their week, then by day. Every ticket is
/// kept, including those on non-working days.
pub fn group_by_week_then_day(tickets: &[Ticket]) -> BTreeMap<String, WeekGroup> {
    let mut grouped: BTreeMap<String, WeekGroup> = BTreeMap::new();

    for ticket in tickets {
        let day = ticket.date.date();
        let start = week_start(day);
        grouped
            .entry(date_key(start))
            .or_insert_with(|| WeekGroup {
                week_start: start,
                days: BTreeMap::new(),
            })
            .days
            .entry(date_key(day))
            .or_default()
            .push(ticket.clone());
    }

    grouped
}

/// 1-based position of each ticket in `sorted`.
pub fn assign_sequence_numbers(sorted: &[Ticket]) -> HashMap<Uuid, usize> {
    sorted
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id, i + 1))
        .collect()
}
