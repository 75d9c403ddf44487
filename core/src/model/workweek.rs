use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of consecutive working weekdays.
pub const WORK_LENGTH: u32 = 5;

/// A five day working span starting on `start`. The span may wrap past
/// Saturday into the following week (Sat..Wed).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workweek {
    pub start: Weekday,
}

impl Default for Workweek {
    fn default() -> Self {
        Workweek { start: Weekday::Mon }
    }
}

impl Workweek {
    pub fn new(start: Weekday) -> Self {
        Self { start }
    }

    /// Builds a workweek from a day-of-week index, 0 = Sunday.
    pub fn from_index(index: u32) -> Result<Self> {
        if index > 6 {
            return Err(anyhow!("Day-of-week index out of range: {}", index));
        }
        let start = (0..index).fold(Weekday::Sun, |d, _| d.succ());
        Ok(Self { start })
    }

    pub fn is_working_day(&self, weekday: Weekday) -> bool {
        let dow = weekday.num_days_from_sunday();
        let start = self.start.num_days_from_sunday();
        (dow + 7 - start) % 7 < WORK_LENGTH
    }

    pub fn is_working_date(&self, date: NaiveDate) -> bool {
        self.is_working_day(date.weekday())
    }

    /// Working weekdays in order, beginning with `start`.
    pub fn span(&self) -> Vec<Weekday> {
        let mut days = Vec::with_capacity(WORK_LENGTH as usize);
        let mut day = self.start;
        for _ in 0..WORK_LENGTH {
            days.push(day);
            day = day.succ();
        }
        days
    }

    /// The same span shifted one day later.
    pub fn next(&self) -> Self {
        Self { start: self.start.succ() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monday_start() {
        let ww = Workweek::default();
        assert!(ww.is_working_day(Weekday::Mon));
        assert!(ww.is_working_day(Weekday::Fri));
        assert!(!ww.is_working_day(Weekday::Sat));
        assert!(!ww.is_working_day(Weekday::Sun));
    }

    #[test]
    fn test_wrapping_span() {
        let ww = Workweek::new(Weekday::Sat);
        assert_eq!(
            ww.span(),
            vec![Weekday::Sat, Weekday::Sun, Weekday::Mon, Weekday::Tue, Weekday::Wed]
        );
        assert!(ww.is_working_day(Weekday::Sun));
        assert!(!ww.is_working_day(Weekday::Thu));
        assert!(!ww.is_working_day(Weekday::Fri));
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Workweek::from_index(0).unwrap().start, Weekday::Sun);
        assert_eq!(Workweek::from_index(1).unwrap(), Workweek::default());
        assert_eq!(Workweek::from_index(6).unwrap().start, Weekday::Sat);
        assert!(Workweek::from_index(7).is_err());
    }

    #[test]
    fn test_every_start_has_five_days() {
        let all = [
            Weekday::Sun, Weekday::Mon, Weekday::Tue, Weekday::Wed,
            Weekday::Thu, Weekday::Fri, Weekday::Sat,
        ];
        let mut ww = Workweek::default();
        for _ in 0..7 {
            let count = all.iter().filter(|d| ww.is_working_day(**d)).count();
            assert_eq!(count, 5);
            ww = ww.next();
        }
        assert_eq!(ww, Workweek::default());
    }
}
