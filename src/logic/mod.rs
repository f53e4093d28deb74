//! Scheduling logic: calendar rules, trackers, constraint checks, suggestions, sessions.

pub mod calendar;
mod conflicts;
mod constraints;
mod export;
mod session;
mod suggestions;
mod trackers;

pub use calendar::{
    classify_kickoff, is_first_week_of_month, is_valid_kickoff, kickoff_bucket, parse_kickoff,
    preceding_weekend, weekend_bucket, DateRejection, KickoffWindow,
};
pub use conflicts::{conflict_suggestion, Claim, MatchupClaims};
pub use constraints::check_schedule;
pub use export::{fixture_records, write_fixture_csv, FixtureRecord};
pub use session::{recompute, SchedulingSession};
pub use suggestions::{
    suggest_matchups, BlockReason, BlockedMatchup, MatchupCandidate, MatchupSuggestions,
};
pub use trackers::{MatchupTracker, RoundTeamTracker, Trackers};
