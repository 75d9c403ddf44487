use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};

/// Resolves a human date relative to `now`. Results never lie in the future
/// for the relative forms, since tickets are logged after they are resolved.
pub fn parse_human_date(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let input = input.trim();
    let today = now.date();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "now" | "today" | "tod" => return Ok(now),
        "yesterday" | "yest" => return days_before(now, 1),
        _ => {}
    }

    // 2. Relative format (-Nd, -Nw)
    if let Some(rest) = input.strip_prefix('-') {
        let (num_str, weeks) = if let Some(n) = rest.strip_suffix('d') {
            (n, false)
        } else if let Some(n) = rest.strip_suffix('w') {
            (n, true)
        } else {
            return Err(anyhow!("Unknown unit in relative time: {}", input));
        };
        // Unsigned, so "--5d" cannot point into the future
        let count: u32 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
        let delta = if weeks {
            TimeDelta::try_weeks(i64::from(count))
        } else {
            TimeDelta::try_days(i64::from(count))
        };
        return delta
            .and_then(|d| now.checked_sub_signed(d))
            .ok_or_else(|| anyhow!("Date out of range: {}", input));
    }

    // 3. Weekday: most recent one, today included
    if let Ok(weekday) = parse_weekday_str(input) {
        let back = (today.weekday().num_days_from_sunday() + 7
            - weekday.num_days_from_sunday())
            % 7;
        return days_before(now, back);
    }

    // 4. Fallback to standard formats
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d.and_time(now.time()));
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn days_before(now: NaiveDateTime, days: u32) -> Result<NaiveDateTime> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|d| now.checked_sub_signed(d))
        .ok_or_else(|| anyhow!("Date out of range: {} days before {}", days, now))
}

pub fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday: {}", s)),
    }
}
