//! Round-robin fixture planner: library with the schedule model and validation logic.

pub mod logic;
pub mod models;

pub use logic::{
    check_schedule, fixture_records, recompute, suggest_matchups, write_fixture_csv, BlockReason,
    BlockedMatchup, FixtureRecord, MatchupCandidate, MatchupSuggestions, MatchupTracker,
    RoundTeamTracker, SchedulingSession, Trackers,
};
pub use models::{
    CompetitionRules, ConflictSuggestion, ConstraintName, ConstraintViolation, FixtureSlot,
    MatchupKey, Schedule, ScheduleError, ScheduleReport, SlotRef, Stadium, StadiumId, Team, TeamId,
    ViolationCategory, ViolationKind, WeekendCollision,
};
