//! Data structures for the fixture planner: teams, slots, schedule, rules, reports.

mod fixture;
mod report;
mod rules;
mod schedule;
mod team;

pub use fixture::{FixtureSlot, MatchupKey, SlotRef};
pub use report::{
    ConflictSuggestion, ConstraintName, ConstraintViolation, ScheduleReport, ViolationCategory,
    ViolationKind, WeekendCollision,
};
pub use rules::CompetitionRules;
pub use schedule::{Schedule, ScheduleError};
pub use team::{team_name, Stadium, StadiumId, Team, TeamId};
