//! Matchup and per-round team trackers, rebuilt from scratch on every edit.

use crate::models::{MatchupKey, Schedule, Team, TeamId};
use std::collections::HashMap;

/// Unordered team pair -> already scheduled somewhere in the schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MatchupTracker {
    played: HashMap<MatchupKey, bool>,
}

impl MatchupTracker {
    /// Every roster pair starts unplayed; each slot with both teams set marks its pair, touched or not.
    pub fn build(schedule: &Schedule, roster: &[Team]) -> Self {
        let mut played = HashMap::new();
        for (i, a) in roster.iter().enumerate() {
            for b in &roster[i + 1..] {
                played.insert(MatchupKey::new(a.id, b.id), false);
            }
        }
        for key in schedule.slots().iter().filter_map(|s| s.matchup()) {
            played.insert(key, true);
        }
        Self { played }
    }

    pub fn is_played(&self, key: MatchupKey) -> bool {
        self.played.get(&key).copied().unwrap_or(false)
    }

    pub fn played_count(&self) -> usize {
        self.played.values().filter(|p| **p).count()
    }
}

/// Per round: team -> scheduled in that round.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundTeamTracker {
    rounds: Vec<HashMap<TeamId, bool>>,
}

impl RoundTeamTracker {
    pub fn build(schedule: &Schedule, roster: &[Team]) -> Self {
        let rounds = schedule
            .rounds()
            .map(|slots| {
                let mut scheduled: HashMap<TeamId, bool> =
                    roster.iter().map(|t| (t.id, false)).collect();
                for (home, away) in slots.iter().filter_map(|s| s.teams()) {
                    scheduled.insert(home, true);
                    scheduled.insert(away, true);
                }
                scheduled
            })
            .collect();
        Self { rounds }
    }

    pub fn is_scheduled(&self, round_index: usize, team: TeamId) -> bool {
        self.rounds
            .get(round_index)
            .and_then(|r| r.get(&team).copied())
            .unwrap_or(false)
    }

    /// Roster teams not yet playing in the round, in roster order.
    pub fn free_teams<'a>(&self, round_index: usize, roster: &'a [Team]) -> Vec<&'a Team> {
        roster
            .iter()
            .filter(|t| !self.is_scheduled(round_index, t.id))
            .collect()
    }
}

/// Both trackers, derived together from one schedule state.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Trackers {
    pub matchups: MatchupTracker,
    pub rounds: RoundTeamTracker,
}

impl Trackers {
    pub fn build(schedule: &Schedule, roster: &[Team]) -> Self {
        Self {
            matchups: MatchupTracker::build(schedule, roster),
            rounds: RoundTeamTracker::build(schedule, roster),
        }
    }
}
