use anyhow::{anyhow, Result};
use tracing::info;

use crate::calendar::MonthWindow;
use crate::model::goal::GoalProfile;
use crate::repository::GoalProfileRepository;

pub struct ProfileService<R: GoalProfileRepository> {
    repo: R,
}

impl<R: GoalProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_profile(&self) -> Result<GoalProfile> {
        self.repo.get()
    }

    /// Replaces the stored profile as a whole.
    pub fn set_profile(&self, profile: &GoalProfile) -> Result<()> {
        profile.validate()?;
        self.repo.set(profile)?;
        info!(
            daily_goal = profile.daily_goal,
            extra_task_hours = profile.extra_task_hours,
            "profile updated"
        );
        Ok(())
    }

    pub fn set_goals(&self, daily_goal: u32, extra_task_hours: f64) -> Result<GoalProfile> {
        let profile = GoalProfile {
            daily_goal,
            extra_task_hours,
            ..self.repo.get()?
        };
        self.set_profile(&profile)?;
        Ok(profile)
    }

    /// Flips a day off in `month`. Whether the day is a working day is for
    /// the caller to check. Returns true when the day is now off.
    pub fn toggle_day_off(&self, month: MonthWindow, day: u32) -> Result<bool> {
        if day == 0 || day > month.days_in_month() {
            return Err(anyhow!("{} has no day {}", month, day));
        }
        let mut profile = self.repo.get()?;
        let now_off = profile.toggle_day_off(month, day);
        self.set_profile(&profile)?;
        Ok(now_off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryGoalProfileRepository;
    use std::collections::BTreeSet;

    fn service() -> ProfileService<InMemoryGoalProfileRepository> {
        ProfileService::new(InMemoryGoalProfileRepository::default())
    }

    #[test]
    fn test_set_goals_keeps_days_off() {
        let service = service();
        let march = MonthWindow::new(2024, 3).unwrap();
        service.toggle_day_off(march, 11).unwrap();

        let profile = service.set_goals(10, 5.0).unwrap();
        assert_eq!(profile.daily_goal, 10);
        assert_eq!(service.get_profile().unwrap().days_off_for(march), BTreeSet::from([11]));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let service = service();
        assert!(service.set_goals(0, 1.0).is_err());
        assert!(service.set_goals(5, -2.0).is_err());
        assert_eq!(service.get_profile().unwrap(), GoalProfile::default());
    }

    #[test]
    fn test_toggle_day_off_range() {
        let service = service();
        let feb = MonthWindow::new(2023, 2).unwrap();
        assert!(service.toggle_day_off(feb, 29).is_err());
        assert!(service.toggle_day_off(feb, 0).is_err());
        assert!(service.toggle_day_off(feb, 28).unwrap());
        assert!(!service.toggle_day_off(feb, 28).unwrap());
    }
}
