//! Diagnostic report produced by the constraint checker.

use crate::models::fixture::SlotRef;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Named constraint results reported in `ScheduleReport::constraints`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintName {
    /// Every team pair meets at most once.
    UniqueMatchups,
    /// No team plays twice in one round.
    NoDoubleBooking,
    /// Every round covers the whole roster.
    RoundsComplete,
    /// No team is drawn against itself.
    NoSelfPlay,
    /// Every kickoff is present and inside an allowed window.
    ValidDates,
    SameWeekendPerRound,
    NoWeekendCollisions,
    RoundsInOrder,
    FirstRoundInFirstWeek,
    NoPreSeasonRound,
}

impl ConstraintName {
    pub const ALL: [ConstraintName; 10] = [
        ConstraintName::UniqueMatchups,
        ConstraintName::NoDoubleBooking,
        ConstraintName::RoundsComplete,
        ConstraintName::NoSelfPlay,
        ConstraintName::ValidDates,
        ConstraintName::SameWeekendPerRound,
        ConstraintName::NoWeekendCollisions,
        ConstraintName::RoundsInOrder,
        ConstraintName::FirstRoundInFirstWeek,
        ConstraintName::NoPreSeasonRound,
    ];
}

/// Broad class of a violation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    Structural,
    Uniqueness,
    Temporal,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    DoubleBooking,
    RoundIncomplete,
    SelfPlay,
    DuplicateMatchup,
    InvalidDate,
    MissingDate,
    SplitWeekend,
    WeekendCollision,
    RoundsOutOfOrder,
    FirstRoundTooLate,
    PreSeasonRound,
}

impl ViolationKind {
    pub fn category(self) -> ViolationCategory {
        use ViolationKind::*;
        match self {
            DoubleBooking | RoundIncomplete => ViolationCategory::Structural,
            SelfPlay | DuplicateMatchup => ViolationCategory::Uniqueness,
            InvalidDate | MissingDate | SplitWeekend | WeekendCollision | RoundsOutOfOrder
            | FirstRoundTooLate | PreSeasonRound => ViolationCategory::Temporal,
        }
    }
}

/// One rule breach. Slot-level problems carry both indices, round-level ones only the round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_index: Option<usize>,
}

impl ConstraintViolation {
    pub fn at_slot(kind: ViolationKind, at: SlotRef, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            round_index: Some(at.round_index),
            slot_index: Some(at.slot_index),
        }
    }

    pub fn at_round(kind: ViolationKind, round_index: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            round_index: Some(round_index),
            slot_index: None,
        }
    }

    pub fn global(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            round_index: None,
            slot_index: None,
        }
    }

    pub fn slot(&self) -> Option<SlotRef> {
        Some(SlotRef::new(self.round_index?, self.slot_index?))
    }
}

/// Two rounds (1-based numbers) that landed on the same weekend.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekendCollision {
    pub round1: usize,
    pub round2: usize,
}

/// Recommendation to reset one side of a duplicated matchup.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictSuggestion {
    /// The slot holding the duplicate.
    pub reset_target: SlotRef,
    /// The earlier slot that first claimed the matchup.
    pub owner: SlotRef,
    pub message: String,
}

/// Full output of one checker pass.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub violations: Vec<ConstraintViolation>,
    pub constraints: BTreeMap<ConstraintName, bool>,
    pub weekend_collisions: Vec<WeekendCollision>,
    #[serde(serialize_with = "serialize_slot_keyed")]
    pub conflict_suggestions: BTreeMap<SlotRef, Vec<ConflictSuggestion>>,
    /// Gate for moving on to the summary/save step; not a correctness rule.
    pub all_slots_touched: bool,
}

impl ScheduleReport {
    /// Logical AND over the named constraints. False for an empty (early-exit) report.
    pub fn all_constraints_satisfied(&self) -> bool {
        !self.constraints.is_empty() && self.constraints.values().all(|ok| *ok)
    }

    pub fn constraint(&self, name: ConstraintName) -> Option<bool> {
        self.constraints.get(&name).copied()
    }

    /// Violations raised at the given slot.
    pub fn violations_at(&self, at: SlotRef) -> impl Iterator<Item = &ConstraintViolation> + '_ {
        self.violations.iter().filter(move |v| v.slot() == Some(at))
    }

    pub fn violations_of(&self, kind: ViolationKind) -> impl Iterator<Item = &ConstraintViolation> + '_ {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Conflict suggestions for a slot holding a duplicate matchup.
    pub fn conflict_suggestions_for(&self, at: SlotRef) -> &[ConflictSuggestion] {
        self.conflict_suggestions
            .get(&at)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Round indices (0-based) involved in any weekend collision.
    pub fn conflicting_rounds(&self) -> BTreeSet<usize> {
        self.weekend_collisions
            .iter()
            .flat_map(|c| [c.round1 - 1, c.round2 - 1])
            .collect()
    }
}

fn serialize_slot_keyed<S: Serializer>(
    map: &BTreeMap<SlotRef, Vec<ConflictSuggestion>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().map(|(k, v)| (k.to_string(), v)))
}
