use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::workweek::Workweek;

/// A calendar month of a given year. Months are 1-based.
/// Serialized as its `YYYY-MM` key and parsed back through `FromStr`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct MonthWindow {
    year: i32,
    month: u32,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month: {}", month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(anyhow!("Year out of range: {}", year));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in `new`/`containing`, so day 1 always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Day-number of the last day of the month: the day before the first of
    /// the following month.
    pub fn days_in_month(&self) -> u32 {
        self.next()
            .first_day()
            .pred_opt()
            .map(|d| d.day())
            .unwrap_or(31)
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// `YYYY-MM`, used as the key for month-scoped settings.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

impl FromStr for MonthWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("Expected YYYY-MM, got '{}'", s))?;
        let year: i32 = year.parse().map_err(|_| anyhow!("Invalid year in '{}'", s))?;
        let month: u32 = month.parse().map_err(|_| anyhow!("Invalid month in '{}'", s))?;
        MonthWindow::new(year, month)
    }
}

impl TryFrom<String> for MonthWindow {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MonthWindow> for String {
    fn from(month: MonthWindow) -> String {
        month.key()
    }
}

/// Working days of `month` that are not listed in `days_off`.
pub fn workday_count(month: MonthWindow, days_off: &BTreeSet<u32>, workweek: Workweek) -> u32 {
    count_working_days(month, month.days_in_month(), days_off, workweek)
}

/// Working days from the 1st up to and including `today`. Zero for any month
/// other than the one `today` falls in.
pub fn worked_days_so_far(
    month: MonthWindow,
    days_off: &BTreeSet<u32>,
    workweek: Workweek,
    today: NaiveDate,
) -> u32 {
    if !month.contains(today) {
        return 0;
    }
    count_working_days(month, today.day(), days_off, workweek)
}

fn count_working_days(
    month: MonthWindow,
    last_day: u32,
    days_off: &BTreeSet<u32>,
    workweek: Workweek,
) -> u32 {
    (1..=last_day)
        .filter_map(|day| month.date(day))
        .filter(|date| workweek.is_working_date(*date))
        .filter(|date| !days_off.contains(&date.day()))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn march_2024() -> MonthWindow {
        MonthWindow::new(2024, 3).unwrap()
    }

    fn off(days: &[u32]) -> BTreeSet<u32> {
        days.iter().copied().collect()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(march_2024().days_in_month(), 31);
        assert_eq!(MonthWindow::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthWindow::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthWindow::new(2100, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthWindow::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthWindow::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_month_window_navigation_and_parse() {
        let dec = MonthWindow::new(2023, 12).unwrap();
        assert_eq!(dec.next(), MonthWindow::new(2024, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        assert_eq!("2024-03".parse::<MonthWindow>().unwrap(), march_2024());
        assert_eq!(march_2024().key(), "2024-03");
        assert_eq!(march_2024().to_string(), "March 2024");
        assert!("2024-13".parse::<MonthWindow>().is_err());
        assert!("March".parse::<MonthWindow>().is_err());
        assert!(MonthWindow::new(2024, 0).is_err());
    }

    #[test]
    fn test_month_window_serde_goes_through_validation() {
        assert_eq!(serde_json::to_string(&march_2024()).unwrap(), r#""2024-03""#);
        let month: MonthWindow = serde_json::from_str(r#""2024-03""#).unwrap();
        assert_eq!(month, march_2024());
        assert!(serde_json::from_str::<MonthWindow>(r#""2024-13""#).is_err());
        assert!(serde_json::from_str::<MonthWindow>(r#"{"year": 2024, "month": 13}"#).is_err());
    }

    #[test]
    fn test_workday_count_march_2024() {
        // March 2024 starts on a Friday.
        assert_eq!(workday_count(march_2024(), &off(&[]), Workweek::default()), 21);
    }

    #[test]
    fn test_workday_count_matches_weekday_formula() {
        let workweek = Workweek::default();
        for month in 1..=12 {
            let window = MonthWindow::new(2025, month).unwrap();
            let expected = (1..=window.days_in_month())
                .filter(|d| {
                    let dow = window.date(*d).unwrap().weekday().num_days_from_sunday();
                    (dow + 7 - 1) % 7 < 5
                })
                .count() as u32;
            assert_eq!(workday_count(window, &off(&[]), workweek), expected);
        }
    }

    #[test]
    fn test_days_off_only_remove_working_days() {
        // 10th and 24th are Sundays, 11th is a Monday.
        let base = workday_count(march_2024(), &off(&[]), Workweek::default());
        let with_off = workday_count(march_2024(), &off(&[10, 11, 24]), Workweek::default());
        assert_eq!(base - with_off, 1);
    }

    #[test]
    fn test_out_of_range_days_off_are_inert() {
        let feb = MonthWindow::new(2023, 2).unwrap();
        let base = workday_count(feb, &off(&[]), Workweek::default());
        assert_eq!(workday_count(feb, &off(&[0, 29, 30, 31, 99]), Workweek::default()), base);
    }

    #[test]
    fn test_wrapping_workweek() {
        // Saturday start covers Sat..Wed, so only Thu and Fri are off.
        let workweek = Workweek::new(Weekday::Sat);
        // March 2024: 5 Fridays (1,8,15,22,29) and 4 Thursdays.
        assert_eq!(workday_count(march_2024(), &off(&[]), workweek), 31 - 9);
    }

    #[test]
    fn test_worked_days_so_far_other_month_is_zero() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let workweek = Workweek::default();
        assert_eq!(worked_days_so_far(march_2024(), &off(&[]), workweek, today), 0);
        let may = MonthWindow::new(2024, 5).unwrap();
        assert_eq!(worked_days_so_far(may, &off(&[]), workweek, today), 0);
        let april_2023 = MonthWindow::new(2023, 4).unwrap();
        assert_eq!(worked_days_so_far(april_2023, &off(&[]), workweek, today), 0);
    }

    #[test]
    fn test_worked_days_so_far_current_month() {
        let workweek = Workweek::default();
        // Mon 2024-03-11: Fri 1, Mon-Fri 4..8, Mon 11.
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(worked_days_so_far(march_2024(), &off(&[]), workweek, today), 7);
        assert_eq!(worked_days_so_far(march_2024(), &off(&[11]), workweek, today), 6);
        let last = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            worked_days_so_far(march_2024(), &off(&[]), workweek, last),
            workday_count(march_2024(), &off(&[]), workweek)
        );
    }
}
