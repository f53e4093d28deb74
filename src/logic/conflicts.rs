//! Duplicate matchup bookkeeping and the reset suggestions derived from it.

use crate::models::{team_name, ConflictSuggestion, MatchupKey, SlotRef, Team};
use std::collections::HashMap;

/// Outcome of claiming a matchup for a slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Claim {
    /// First slot to hold the pair; it now owns it.
    First,
    /// The pair is already owned by an earlier slot.
    Duplicate { owner: SlotRef },
}

/// Which slot first claimed each matchup during one checker pass.
#[derive(Debug, Default)]
pub struct MatchupClaims {
    owners: HashMap<MatchupKey, SlotRef>,
}

impl MatchupClaims {
    /// Slots must be claimed in round then slot order so the earliest slot owns the pair.
    pub fn claim(&mut self, key: MatchupKey, at: SlotRef) -> Claim {
        match self.owners.get(&key) {
            Some(&owner) => Claim::Duplicate { owner },
            None => {
                self.owners.insert(key, at);
                Claim::First
            }
        }
    }

    pub fn owner(&self, key: MatchupKey) -> Option<SlotRef> {
        self.owners.get(&key).copied()
    }
}

/// Suggest resetting either the duplicate or the owning slot to free both teams.
pub fn conflict_suggestion(
    roster: &[Team],
    key: MatchupKey,
    duplicate: SlotRef,
    owner: SlotRef,
) -> ConflictSuggestion {
    let (a, b) = key.teams();
    let message = format!(
        "{} vs {} is already scheduled in round {}, match {}. Reset this match or that one to free both teams.",
        team_name(roster, a),
        team_name(roster, b),
        owner.round_number(),
        owner.match_number()
    );
    ConflictSuggestion {
        reset_target: duplicate,
        owner,
        message,
    }
}
