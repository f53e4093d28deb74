//! CompetitionRules: which months and kickoff times are allowed.

use crate::models::schedule::ScheduleError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Calendar rules every completed fixture must satisfy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRules {
    /// The two months (1-12) the competition is played in.
    pub months: [u32; 2],
    /// Earliest Friday kickoff.
    pub friday_start: NaiveTime,
    /// Latest Sunday kickoff (inclusive).
    pub sunday_end: NaiveTime,
}

impl Default for CompetitionRules {
    fn default() -> Self {
        Self {
            months: [3, 4],
            friday_start: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            sunday_end: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
        }
    }
}

impl CompetitionRules {
    /// Rules for the two given months with the default Friday/Sunday kickoff limits.
    pub fn new(first_month: u32, second_month: u32) -> Result<Self, ScheduleError> {
        for month in [first_month, second_month] {
            if !(1..=12).contains(&month) {
                return Err(ScheduleError::InvalidMonth(month));
            }
        }
        Ok(Self {
            months: [first_month, second_month],
            ..Self::default()
        })
    }

    pub fn is_competition_month(&self, month: u32) -> bool {
        self.months.contains(&month)
    }
}
