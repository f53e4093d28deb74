//! Schedule (rounds of fixture slots) and ScheduleError.

use crate::models::fixture::{FixtureSlot, SlotRef};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Errors from misusing the schedule API. Rule breaches are reported as violations, not errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// No slot exists at this position.
    SlotOutOfRange(SlotRef),
    /// The team is not part of the session roster.
    UnknownTeam(TeamId),
    /// A round-robin needs at least 2 teams.
    NotEnoughTeams,
    /// The roster lists the same team id twice.
    DuplicateTeam(TeamId),
    /// Competition months must be within 1-12.
    InvalidMonth(u32),
    /// Stored schedule dimensions do not match its slots.
    MalformedSchedule {
        team_count: usize,
        round_count: usize,
        slots_per_round: usize,
        slot_count: usize,
    },
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::SlotOutOfRange(at) => write!(
                f,
                "No match {} in round {}",
                at.match_number(),
                at.round_number()
            ),
            ScheduleError::UnknownTeam(id) => write!(f, "Team {} is not in the roster", id),
            ScheduleError::NotEnoughTeams => write!(f, "Need at least 2 teams to build a schedule"),
            ScheduleError::DuplicateTeam(id) => write!(f, "Team {} is listed twice", id),
            ScheduleError::InvalidMonth(m) => write!(f, "Month {} is not between 1 and 12", m),
            ScheduleError::MalformedSchedule {
                team_count,
                round_count,
                slots_per_round,
                slot_count,
            } => write!(
                f,
                "Schedule for {} teams with {} rounds of {} matches cannot hold {} slots",
                team_count, round_count, slots_per_round, slot_count
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// All rounds of the competition, stored as one flat vector with a stride of `slots_per_round`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredSchedule")]
pub struct Schedule {
    team_count: usize,
    round_count: usize,
    slots_per_round: usize,
    slots: Vec<FixtureSlot>,
}

/// Wire form of a `Schedule`, checked before it becomes one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSchedule {
    team_count: usize,
    round_count: usize,
    slots_per_round: usize,
    slots: Vec<FixtureSlot>,
}

impl TryFrom<StoredSchedule> for Schedule {
    type Error = ScheduleError;

    fn try_from(stored: StoredSchedule) -> Result<Self, Self::Error> {
        let shape = Self::with_team_count(stored.team_count);
        if stored.round_count != shape.round_count
            || stored.slots_per_round != shape.slots_per_round
            || stored.slots.len() != shape.slots.len()
        {
            return Err(ScheduleError::MalformedSchedule {
                team_count: stored.team_count,
                round_count: stored.round_count,
                slots_per_round: stored.slots_per_round,
                slot_count: stored.slots.len(),
            });
        }
        Ok(Self {
            slots: stored.slots,
            ..shape
        })
    }
}

impl Schedule {
    /// Empty schedule sized from the roster: `n - 1` rounds of `n / 2` slots.
    pub fn for_roster(roster: &[Team]) -> Self {
        Self::with_team_count(roster.len())
    }

    pub fn with_team_count(team_count: usize) -> Self {
        let round_count = team_count.saturating_sub(1);
        let slots_per_round = team_count / 2;
        let slots = (0..round_count)
            .flat_map(|r| (0..slots_per_round).map(move |_| FixtureSlot::placeholder(r as u32 + 1)))
            .collect();
        Self {
            team_count,
            round_count,
            slots_per_round,
            slots,
        }
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn slots_per_round(&self) -> usize {
        self.slots_per_round
    }

    /// Number of distinct teams a fully scheduled round covers.
    pub fn teams_per_round(&self) -> usize {
        self.slots_per_round * 2
    }

    fn offset(&self, at: SlotRef) -> Option<usize> {
        (at.round_index < self.round_count && at.slot_index < self.slots_per_round)
            .then(|| at.round_index * self.slots_per_round + at.slot_index)
    }

    pub fn slot(&self, at: SlotRef) -> Option<&FixtureSlot> {
        self.offset(at).map(|i| &self.slots[i])
    }

    pub fn slot_mut(&mut self, at: SlotRef) -> Result<&mut FixtureSlot, ScheduleError> {
        let i = self.offset(at).ok_or(ScheduleError::SlotOutOfRange(at))?;
        Ok(&mut self.slots[i])
    }

    /// Slots of one round, in slot order.
    pub fn round(&self, round_index: usize) -> &[FixtureSlot] {
        if round_index >= self.round_count || self.slots_per_round == 0 {
            return &[];
        }
        let start = round_index * self.slots_per_round;
        &self.slots[start..start + self.slots_per_round]
    }

    /// Rounds in order. Yields nothing for a schedule without slots.
    pub fn rounds(&self) -> impl Iterator<Item = &[FixtureSlot]> + '_ {
        (0..self.round_count).map(move |r| self.round(r))
    }

    /// Every slot with its position, in round then slot order.
    pub fn iter_refs(&self) -> impl Iterator<Item = (SlotRef, &FixtureSlot)> + '_ {
        let stride = self.slots_per_round.max(1);
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, s)| (SlotRef::new(i / stride, i % stride), s))
    }

    pub fn slots(&self) -> &[FixtureSlot] {
        &self.slots
    }

    pub fn any_touched(&self) -> bool {
        self.slots.iter().any(|s| s.touched)
    }

    pub fn any_complete(&self) -> bool {
        self.slots.iter().any(FixtureSlot::is_complete)
    }

    /// True when every slot has been edited (false for a schedule without slots).
    pub fn all_touched(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|s| s.touched)
    }
}
