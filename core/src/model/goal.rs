use std::collections::{BTreeMap, BTreeSet};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::calendar::MonthWindow;

pub const DEFAULT_DAILY_GOAL: u32 = 8;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GoalProfile {
    pub daily_goal: u32,
    #[serde(default)]
    pub extra_task_hours: f64,
    // Key: "YYYY-MM"
    #[serde(default)]
    pub days_off: BTreeMap<String, BTreeSet<u32>>,
}

impl Default for GoalProfile {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            extra_task_hours: 0.0,
            days_off: BTreeMap::new(),
        }
    }
}

impl GoalProfile {
    pub fn validate(&self) -> Result<()> {
        if self.daily_goal == 0 {
            return Err(anyhow!("Daily goal must be at least 1"));
        }
        if !self.extra_task_hours.is_finite() || self.extra_task_hours < 0.0 {
            return Err(anyhow!(
                "Extra task hours must be a non-negative number, got {}",
                self.extra_task_hours
            ));
        }
        Ok(())
    }

    pub fn days_off_for(&self, month: MonthWindow) -> BTreeSet<u32> {
        self.days_off.get(&month.key()).cloned().unwrap_or_default()
    }

    /// Flips `day` for `month`. Returns true when the day is now off.
    pub fn toggle_day_off(&mut self, month: MonthWindow, day: u32) -> bool {
        let key = month.key();
        let days = self.days_off.entry(key.clone()).or_default();
        let now_off = if days.remove(&day) {
            false
        } else {
            days.insert(day);
            true
        };
        if days.is_empty() {
            self.days_off.remove(&key);
        }
        now_off
    }
}
