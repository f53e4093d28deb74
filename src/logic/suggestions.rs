//! Matchup suggestions for a slot: pairs of teams that are free in the round and have not met.

use crate::logic::conflicts::MatchupClaims;
use crate::logic::trackers::Trackers;
use crate::models::{MatchupKey, Schedule, SlotRef, Team, TeamId};
use serde::Serialize;

/// A pairing that can be placed in the slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchupCandidate {
    pub home: TeamId,
    pub away: TeamId,
    pub label: String,
}

/// Why a pair of free teams cannot be suggested.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum BlockReason {
    /// The pair already meets elsewhere; `at` is the first slot holding it.
    AlreadyPlayed { at: Option<SlotRef> },
    /// Blocked for a reason the engine does not name yet.
    Unclassified,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BlockedMatchup {
    pub home: TeamId,
    pub away: TeamId,
    pub label: String,
    #[serde(flatten)]
    pub reason: BlockReason,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MatchupSuggestions {
    pub candidates: Vec<MatchupCandidate>,
    /// Only filled when there are no candidates.
    pub blocked: Vec<BlockedMatchup>,
}

impl MatchupSuggestions {
    pub fn labels(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.label.as_str()).collect()
    }
}

/// Suggest matchups for `at`, enumerating free teams of its round in roster order.
pub fn suggest_matchups(
    schedule: &Schedule,
    roster: &[Team],
    trackers: &Trackers,
    at: SlotRef,
) -> MatchupSuggestions {
    let free = trackers.rounds.free_teams(at.round_index, roster);
    let mut pairs = Vec::new();
    for (i, home) in free.iter().enumerate() {
        for away in &free[i + 1..] {
            pairs.push((*home, *away));
        }
    }

    let candidates: Vec<MatchupCandidate> = pairs
        .iter()
        .filter(|(h, a)| !trackers.matchups.is_played(MatchupKey::new(h.id, a.id)))
        .map(|(h, a)| MatchupCandidate {
            home: h.id,
            away: a.id,
            label: label(h, a),
        })
        .collect();
    if !candidates.is_empty() {
        return MatchupSuggestions {
            candidates,
            blocked: Vec::new(),
        };
    }

    let mut claims = MatchupClaims::default();
    for (slot_ref, slot) in schedule.iter_refs() {
        if let Some(key) = slot.matchup() {
            claims.claim(key, slot_ref);
        }
    }
    let blocked = pairs
        .iter()
        .map(|(h, a)| {
            let key = MatchupKey::new(h.id, a.id);
            let reason = if trackers.matchups.is_played(key) {
                BlockReason::AlreadyPlayed {
                    at: claims.owner(key),
                }
            } else {
                BlockReason::Unclassified
            };
            BlockedMatchup {
                home: h.id,
                away: a.id,
                label: label(h, a),
                reason,
            }
        })
        .collect();
    log::debug!(
        "No matchup candidates for round {}, match {}",
        at.round_number(),
        at.match_number()
    );
    MatchupSuggestions {
        candidates: Vec::new(),
        blocked,
    }
}

fn label(home: &Team, away: &Team) -> String {
    format!("{} vs {}", home.name, away.name)
}
