use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::filter_by_month;
use crate::calendar::{workday_count, worked_days_so_far, MonthWindow};
use crate::model::goal::GoalProfile;
use crate::model::ticket::Ticket;
use crate::model::workweek::Workweek;
use crate::repository::{GoalProfileRepository, TicketRepository};

const HOURS_PER_DAY: f64 = 8.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MonthStats {
    pub total_workdays: u32,
    pub worked_days_so_far: u32,
    pub tickets_this_month: u32,
    pub tickets_today: u32,
    pub daily_goal: u32,
    pub monthly_goal: u32,
    pub daily_average: f64,
    pub remaining: u32,
    pub progress_percentage: u32, // 0..=100
    pub on_track: bool,
    pub days_off_count: u32,
    pub extra_task_hours: f64,
    pub extra_task_day_equivalents: f64,
}

pub struct MonthStatsUseCase<'a, R: TicketRepository, P: GoalProfileRepository> {
    ticket_repo: &'a R,
    profile_repo: &'a P,
}

impl<'a, R: TicketRepository, P: GoalProfileRepository> MonthStatsUseCase<'a, R, P> {
    pub fn new(ticket_repo: &'a R, profile_repo: &'a P) -> Self {
        Self {
            ticket_repo,
            profile_repo,
        }
    }

    pub fn month_stats(&self, month: MonthWindow, workweek: Workweek, today: NaiveDate) -> Result<MonthStats> {
        let tickets = self.ticket_repo.list()?;
        let profile = self.profile_repo.get()?;
        Ok(compute_month_stats(&tickets, month, &profile, workweek, today))
    }
}

pub fn compute_month_stats(
    tickets: &[Ticket],
    month: MonthWindow,
    profile: &GoalProfile,
    workweek: Workweek,
    today: NaiveDate,
) -> MonthStats {
    let days_off = profile.days_off_for(month);
    let total_workdays = workday_count(month, &days_off, workweek);
    let worked = worked_days_so_far(month, &days_off, workweek, today);

    let tickets_this_month = filter_by_month(tickets, month).len() as u32;
    let tickets_today = tickets.iter().filter(|t| t.date.date() == today).count() as u32;

    let daily_average = if worked > 0 {
        round1(tickets_this_month as f64 / worked as f64)
    } else {
        0.0
    };

    let monthly_goal = profile.daily_goal.saturating_mul(total_workdays);
    let remaining = monthly_goal.saturating_sub(tickets_this_month);
    let progress_percentage = if monthly_goal > 0 {
        let pct = (tickets_this_month as f64 / monthly_goal as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u32
    } else {
        0
    };

    MonthStats {
        total_workdays,
        worked_days_so_far: worked,
        tickets_this_month,
        tickets_today,
        daily_goal: profile.daily_goal,
        monthly_goal,
        daily_average,
        remaining,
        progress_percentage,
        on_track: daily_average >= profile.daily_goal as f64,
        days_off_count: days_off.len() as u32,
        extra_task_hours: profile.extra_task_hours,
        extra_task_day_equivalents: round1(profile.extra_task_hours / HOURS_PER_DAY),
    }
}

/// Rounds to one decimal, half away from zero on `value * 10`.
/// 7 / 20 gives 0.4 even though 0.35 is stored slightly below the tie.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ticket::TicketType;
    use crate::repository::{InMemoryGoalProfileRepository, InMemoryTicketRepository};

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn ticket(d: u32) -> Ticket {
        Ticket::new("T".to_string(), TicketType::Forum, ymd(d).and_hms_opt(10, 0, 0).unwrap())
    }

    fn march() -> MonthWindow {
        MonthWindow::new(2024, 3).unwrap()
    }

    fn scenario() -> Vec<Ticket> {
        vec![ticket(4), ticket(9), ticket(11)]
    }

    #[test]
    fn test_march_2024_scenario() {
        // Viewed from another month, nothing has been worked yet.
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let stats = compute_month_stats(&scenario(), march(), &GoalProfile::default(), Workweek::default(), today);

        assert_eq!(stats.total_workdays, 21);
        assert_eq!(stats.monthly_goal, 168);
        assert_eq!(stats.tickets_this_month, 3);
        assert_eq!(stats.progress_percentage, 2);
        assert_eq!(stats.remaining, 165);
        assert_eq!(stats.worked_days_so_far, 0);
        assert_eq!(stats.daily_average, 0.0);
        assert!(!stats.on_track);
        assert_eq!(stats.tickets_today, 0);
    }

    #[test]
    fn test_current_month_average() {
        // Mon 11th: seven working days so far, 3 tickets -> 0.43 -> 0.4
        let stats = compute_month_stats(&scenario(), march(), &GoalProfile::default(), Workweek::default(), ymd(11));
        assert_eq!(stats.worked_days_so_far, 7);
        assert_eq!(stats.daily_average, 0.4);
        assert_eq!(stats.tickets_today, 1);

        let easy = GoalProfile { daily_goal: 1, ..GoalProfile::default() };
        let tickets: Vec<Ticket> = (0..7).map(|_| ticket(4)).collect();
        let stats = compute_month_stats(&tickets, march(), &easy, Workweek::default(), ymd(11));
        assert_eq!(stats.daily_average, 1.0);
        assert!(stats.on_track);
    }

    #[test]
    fn test_days_off_reduce_goal() {
        let mut profile = GoalProfile::default();
        for day in [10, 11, 24] {
            profile.toggle_day_off(march(), day);
        }
        let stats = compute_month_stats(&scenario(), march(), &profile, Workweek::default(), ymd(1));
        assert_eq!(stats.total_workdays, 20);
        assert_eq!(stats.monthly_goal, 160);
        assert_eq!(stats.days_off_count, 3);
    }

    #[test]
    fn test_progress_and_remaining_are_clamped() {
        let profile = GoalProfile { daily_goal: 1, ..GoalProfile::default() };
        let tickets: Vec<Ticket> = (0..50).map(|_| ticket(5)).collect();
        let stats = compute_month_stats(&tickets, march(), &profile, Workweek::default(), ymd(5));
        assert_eq!(stats.progress_percentage, 100);
        assert_eq!(stats.remaining, 0);
    }

    #[test]
    fn test_zero_goal_month_has_zero_progress() {
        let mut profile = GoalProfile::default();
        let feb = MonthWindow::new(2023, 2).unwrap();
        for day in 1..=28 {
            profile.toggle_day_off(feb, day);
        }
        let stats = compute_month_stats(&[], feb, &profile, Workweek::default(), feb.date(15).unwrap());
        assert_eq!(stats.monthly_goal, 0);
        assert_eq!(stats.progress_percentage, 0);
        assert_eq!(stats.daily_average, 0.0);
        assert!(stats.daily_average.is_finite());
    }

    #[test]
    fn test_extra_task_day_equivalents() {
        let profile = GoalProfile { extra_task_hours: 5.0, ..GoalProfile::default() };
        let stats = compute_month_stats(&[], march(), &profile, Workweek::default(), ymd(1));
        assert_eq!(stats.extra_task_day_equivalents, 0.6);
        assert_eq!(stats.extra_task_hours, 5.0);
        // Informational only.
        assert_eq!(stats.monthly_goal, 168);
    }

    #[test]
    fn test_huge_daily_goal_saturates() {
        let profile = GoalProfile { daily_goal: 300_000_000, ..GoalProfile::default() };
        let stats = compute_month_stats(&scenario(), march(), &profile, Workweek::default(), ymd(11));
        assert_eq!(stats.monthly_goal, u32::MAX);
        assert_eq!(stats.remaining, u32::MAX - 3);
        assert_eq!(stats.progress_percentage, 0);
        assert!(!stats.on_track);
    }

    #[test]
    fn test_round1_ties() {
        assert_eq!(round1(7.0 / 20.0), 0.4);
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(3.0 / 7.0), 0.4);
    }

    #[test]
    fn test_use_case_reads_stores() {
        let tickets = InMemoryTicketRepository::with_tickets(scenario());
        let profiles = InMemoryGoalProfileRepository::new(GoalProfile { daily_goal: 2, ..GoalProfile::default() });
        let stats = MonthStatsUseCase::new(&tickets, &profiles)
            .month_stats(march(), Workweek::default(), ymd(11))
            .unwrap();
        assert_eq!(stats.monthly_goal, 42);
        assert_eq!(stats.progress_percentage, 7);
    }
}
