//! FixtureSlot, SlotRef and MatchupKey.

use crate::models::team::{Stadium, StadiumId, TeamId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a slot in the schedule (both indices 0-based).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRef {
    pub round_index: usize,
    pub slot_index: usize,
}

impl SlotRef {
    pub fn new(round_index: usize, slot_index: usize) -> Self {
        Self {
            round_index,
            slot_index,
        }
    }

    /// 1-based round number, as shown to users.
    pub fn round_number(&self) -> usize {
        self.round_index + 1
    }

    /// 1-based match number within the round.
    pub fn match_number(&self) -> usize {
        self.slot_index + 1
    }
}

/// Formats as `"round-slot"` using the 0-based indices (the key shape used in reports).
impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.round_index, self.slot_index)
    }
}

/// Unordered pair of teams: `MatchupKey::new(a, b) == MatchupKey::new(b, a)`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MatchupKey(TeamId, TeamId);

impl MatchupKey {
    pub fn new(a: TeamId, b: TeamId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn teams(&self) -> (TeamId, TeamId) {
        (self.0, self.1)
    }
}

/// One match placeholder within a round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSlot {
    /// 1-based round number this slot belongs to.
    pub round: u32,
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
    pub stadium: Option<StadiumId>,
    #[serde(default)]
    pub location: String,
    pub kickoff: Option<NaiveDateTime>,
    /// Set once the user has intentionally edited this slot.
    #[serde(default)]
    pub touched: bool,
}

impl FixtureSlot {
    /// An untouched placeholder for the given 1-based round.
    pub fn placeholder(round: u32) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    /// Both team references, if set.
    pub fn teams(&self) -> Option<(TeamId, TeamId)> {
        Some((self.home?, self.away?))
    }

    /// Matchup key of the slot when both teams are set.
    pub fn matchup(&self) -> Option<MatchupKey> {
        self.teams().map(|(h, a)| MatchupKey::new(h, a))
    }

    /// True iff both teams and the kickoff are present.
    pub fn is_complete(&self) -> bool {
        self.teams().is_some() && self.kickoff.is_some()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == Some(team) || self.away == Some(team)
    }

    pub fn set_stadium(&mut self, stadium: &Stadium) {
        self.stadium = Some(stadium.id);
        self.location = stadium.location.clone();
    }

    /// Clear everything but the round number; the slot becomes an untouched placeholder again.
    pub fn reset(&mut self) {
        *self = Self::placeholder(self.round);
    }
}
