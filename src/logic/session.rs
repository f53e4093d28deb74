//! Scheduling session: roster + schedule + derived state, recomputed after every edit.

use crate::logic::calendar::parse_kickoff;
use crate::logic::constraints::check_schedule;
use crate::logic::export::{fixture_records, FixtureRecord};
use crate::logic::suggestions::{suggest_matchups, MatchupSuggestions};
use crate::logic::trackers::Trackers;
use crate::models::{
    CompetitionRules, ConflictSuggestion, FixtureSlot, Schedule, ScheduleError, ScheduleReport,
    SlotRef, Stadium, Team, TeamId,
};
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Rebuild both trackers and run a full checker pass. Pure: same inputs, same outputs.
pub fn recompute(
    schedule: &Schedule,
    roster: &[Team],
    rules: &CompetitionRules,
) -> (Trackers, ScheduleReport) {
    let trackers = Trackers::build(schedule, roster);
    let report = check_schedule(schedule, roster, rules);
    (trackers, report)
}

/// Single-owner editing state for one schedule.
#[derive(Clone, Debug)]
pub struct SchedulingSession {
    roster: Vec<Team>,
    rules: CompetitionRules,
    season: i32,
    schedule: Schedule,
    trackers: Trackers,
    report: ScheduleReport,
}

impl SchedulingSession {
    /// Start a session with an empty schedule sized from the roster.
    pub fn new(
        roster: Vec<Team>,
        rules: CompetitionRules,
        season: i32,
    ) -> Result<Self, ScheduleError> {
        validate_roster(&roster)?;
        let schedule = Schedule::for_roster(&roster);
        let (trackers, report) = recompute(&schedule, &roster, &rules);
        log::info!(
            "New scheduling session: {} teams, {} rounds of {} matches",
            roster.len(),
            schedule.round_count(),
            schedule.slots_per_round()
        );
        Ok(Self {
            roster,
            rules,
            season,
            schedule,
            trackers,
            report,
        })
    }

    pub fn roster(&self) -> &[Team] {
        &self.roster
    }

    pub fn rules(&self) -> &CompetitionRules {
        &self.rules
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn trackers(&self) -> &Trackers {
        &self.trackers
    }

    pub fn report(&self) -> &ScheduleReport {
        &self.report
    }

    /// All slots touched and every named constraint satisfied.
    pub fn can_proceed(&self) -> bool {
        self.report.all_slots_touched && self.report.all_constraints_satisfied()
    }

    pub fn slot(&self, at: SlotRef) -> Result<&FixtureSlot, ScheduleError> {
        self.schedule.slot(at).ok_or(ScheduleError::SlotOutOfRange(at))
    }

    pub fn set_teams(
        &mut self,
        at: SlotRef,
        home: Option<TeamId>,
        away: Option<TeamId>,
    ) -> Result<(), ScheduleError> {
        for team in [home, away].into_iter().flatten() {
            self.ensure_known(team)?;
        }
        self.edit(at, |slot| {
            slot.home = home;
            slot.away = away;
        })
    }

    pub fn set_home(&mut self, at: SlotRef, team: Option<TeamId>) -> Result<(), ScheduleError> {
        if let Some(team) = team {
            self.ensure_known(team)?;
        }
        self.edit(at, |slot| slot.home = team)
    }

    pub fn set_away(&mut self, at: SlotRef, team: Option<TeamId>) -> Result<(), ScheduleError> {
        if let Some(team) = team {
            self.ensure_known(team)?;
        }
        self.edit(at, |slot| slot.away = team)
    }

    pub fn set_kickoff(
        &mut self,
        at: SlotRef,
        kickoff: Option<NaiveDateTime>,
    ) -> Result<(), ScheduleError> {
        self.edit(at, |slot| slot.kickoff = kickoff)
    }

    /// Set the kickoff from user text. Unparseable text clears the kickoff, which the checker
    /// then reports as a missing date.
    pub fn set_kickoff_text(&mut self, at: SlotRef, text: &str) -> Result<(), ScheduleError> {
        let kickoff = parse_kickoff(text);
        if kickoff.is_none() {
            log::warn!("Could not parse kickoff {:?} for slot {}", text, at);
        }
        self.set_kickoff(at, kickoff)
    }

    pub fn assign_stadium(&mut self, at: SlotRef, stadium: &Stadium) -> Result<(), ScheduleError> {
        self.edit(at, |slot| slot.set_stadium(stadium))
    }

    /// Put the slot back to an untouched placeholder.
    pub fn reset_slot(&mut self, at: SlotRef) -> Result<(), ScheduleError> {
        self.schedule.slot_mut(at)?.reset();
        self.refresh();
        Ok(())
    }

    /// Discard the schedule and start over for a new roster.
    pub fn replace_roster(&mut self, roster: Vec<Team>) -> Result<(), ScheduleError> {
        validate_roster(&roster)?;
        log::info!("Roster changed to {} teams; schedule discarded", roster.len());
        self.schedule = Schedule::for_roster(&roster);
        self.roster = roster;
        self.refresh();
        Ok(())
    }

    pub fn suggestions_for(&self, at: SlotRef) -> Result<MatchupSuggestions, ScheduleError> {
        self.slot(at)?;
        Ok(suggest_matchups(
            &self.schedule,
            &self.roster,
            &self.trackers,
            at,
        ))
    }

    pub fn conflict_suggestions_for(&self, at: SlotRef) -> &[ConflictSuggestion] {
        self.report.conflict_suggestions_for(at)
    }

    pub fn fixture_records(&self) -> Vec<FixtureRecord> {
        fixture_records(&self.schedule, self.season)
    }

    fn ensure_known(&self, team: TeamId) -> Result<(), ScheduleError> {
        if self.roster.iter().any(|t| t.id == team) {
            Ok(())
        } else {
            Err(ScheduleError::UnknownTeam(team))
        }
    }

    /// Apply a user edit to one slot, mark it touched, then recompute derived state.
    fn edit(
        &mut self,
        at: SlotRef,
        apply: impl FnOnce(&mut FixtureSlot),
    ) -> Result<(), ScheduleError> {
        let slot = self.schedule.slot_mut(at)?;
        apply(slot);
        slot.touched = true;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        let (trackers, report) = recompute(&self.schedule, &self.roster, &self.rules);
        self.trackers = trackers;
        self.report = report;
    }
}

fn validate_roster(roster: &[Team]) -> Result<(), ScheduleError> {
    if roster.len() < 2 {
        return Err(ScheduleError::NotEnoughTeams);
    }
    let mut seen = HashSet::new();
    for team in roster {
        if !seen.insert(team.id) {
            return Err(ScheduleError::DuplicateTeam(team.id));
        }
    }
    Ok(())
}
