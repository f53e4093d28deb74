//! Kickoff windows and weekend buckets.
//!
//! A weekend bucket is the Saturday of the Monday-starting week a date falls in, so Friday,
//! Saturday and Sunday of the same weekend all share one bucket.

use crate::models::CompetitionRules;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::fmt;

/// Allowed kickoff window a timestamp falls into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KickoffWindow {
    FridayEvening,
    Saturday,
    SundayUntilEight,
}

/// Why a timestamp is not an allowed kickoff.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateRejection {
    OutsideCompetitionMonths { month: u32 },
    NotAWeekendDay { weekday: Weekday },
    FridayBeforeStart,
    SundayAfterEnd,
}

impl fmt::Display for DateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRejection::OutsideCompetitionMonths { month } => {
                write!(f, "month {} is not a competition month", month)
            }
            DateRejection::NotAWeekendDay { weekday } => {
                write!(f, "{} is not a match day (Friday to Sunday only)", weekday)
            }
            DateRejection::FridayBeforeStart => write!(f, "Friday matches start at 18:00 or later"),
            DateRejection::SundayAfterEnd => write!(f, "Sunday matches start at 20:00 at the latest"),
        }
    }
}

/// Classify a kickoff against the competition rules.
pub fn classify_kickoff(
    kickoff: NaiveDateTime,
    rules: &CompetitionRules,
) -> Result<KickoffWindow, DateRejection> {
    let month = kickoff.month();
    if !rules.is_competition_month(month) {
        return Err(DateRejection::OutsideCompetitionMonths { month });
    }
    let time = kickoff.time();
    match kickoff.weekday() {
        Weekday::Fri if time >= rules.friday_start => Ok(KickoffWindow::FridayEvening),
        Weekday::Fri => Err(DateRejection::FridayBeforeStart),
        Weekday::Sat => Ok(KickoffWindow::Saturday),
        Weekday::Sun if time <= rules.sunday_end => Ok(KickoffWindow::SundayUntilEight),
        Weekday::Sun => Err(DateRejection::SundayAfterEnd),
        weekday => Err(DateRejection::NotAWeekendDay { weekday }),
    }
}

pub fn is_valid_kickoff(kickoff: NaiveDateTime, rules: &CompetitionRules) -> bool {
    classify_kickoff(kickoff, rules).is_ok()
}

/// Saturday representing the weekend a date belongs to (Fri +1, Sat 0, Sun -1; Mon-Thu forward).
pub fn weekend_bucket(date: NaiveDate) -> NaiveDate {
    let offset = 5 - date.weekday().num_days_from_monday() as i64;
    date + Duration::days(offset)
}

pub fn kickoff_bucket(kickoff: NaiveDateTime) -> NaiveDate {
    weekend_bucket(kickoff.date())
}

/// The weekend bucket directly before `bucket`.
pub fn preceding_weekend(bucket: NaiveDate) -> NaiveDate {
    bucket - Duration::days(7)
}

/// True for days 1-7 of a month.
pub fn is_first_week_of_month(date: NaiveDate) -> bool {
    date.day() <= 7
}

/// Parse a kickoff typed by the user or sent by a client. Offsets are dropped, wall-clock time kept.
pub fn parse_kickoff(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    .map(|dt| dt.with_nanosecond(0).unwrap_or(dt))
}
