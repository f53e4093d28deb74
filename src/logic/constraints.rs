//! Constraint checker: one full pass over the schedule producing a `ScheduleReport`.
//!
//! Only completed slots (both teams and a kickoff) take part in the rule checks, except the
//! missing-date check which looks at touched slots that have teams but no kickoff. Nothing here
//! fails: every problem becomes a `ConstraintViolation` and the pass always returns a full report.

use crate::logic::calendar::{
    classify_kickoff, is_first_week_of_month, kickoff_bucket, preceding_weekend,
};
use crate::logic::conflicts::{conflict_suggestion, Claim, MatchupClaims};
use crate::models::{
    team_name, CompetitionRules, ConflictSuggestion, ConstraintName, ConstraintViolation, MatchupKey, Schedule,
    ScheduleReport, SlotRef, Team, TeamId, ViolationKind, WeekendCollision,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

/// Date a round is played on, taken from its first completed slot.
#[derive(Clone, Copy, Debug)]
struct RoundDate {
    kickoff: NaiveDateTime,
    bucket: NaiveDate,
}

/// Check every rule against the current schedule.
///
/// Returns an empty report (apart from the touched gate) while nothing has been touched or no
/// slot is complete yet, so an untouched schedule does not flood the user with errors.
pub fn check_schedule(
    schedule: &Schedule,
    roster: &[Team],
    rules: &CompetitionRules,
) -> ScheduleReport {
    let all_slots_touched = schedule.all_touched();
    if !schedule.any_touched() || !schedule.any_complete() {
        log::debug!("Schedule has no touched, completed fixture yet; skipping checks");
        return ScheduleReport {
            all_slots_touched,
            ..ScheduleReport::default()
        };
    }

    let mut pass = CheckPass::new(schedule, roster, rules);
    pass.check_round_bookings();
    pass.check_matchups();
    pass.check_kickoffs();
    let dates = pass.check_same_weekend();
    pass.check_weekend_collisions(&dates);
    pass.check_round_order(&dates);
    pass.check_first_round(&dates);
    pass.check_pre_season(&dates);

    let report = pass.finish(all_slots_touched);
    log::debug!(
        "Checked schedule: {} violation(s), {} weekend collision(s)",
        report.violations.len(),
        report.weekend_collisions.len()
    );
    report
}

struct CheckPass<'a> {
    schedule: &'a Schedule,
    roster: &'a [Team],
    rules: &'a CompetitionRules,
    violations: Vec<ConstraintViolation>,
    constraints: BTreeMap<ConstraintName, bool>,
    weekend_collisions: Vec<WeekendCollision>,
    suggestions: BTreeMap<SlotRef, Vec<ConflictSuggestion>>,
}

impl<'a> CheckPass<'a> {
    fn new(schedule: &'a Schedule, roster: &'a [Team], rules: &'a CompetitionRules) -> Self {
        Self {
            schedule,
            roster,
            rules,
            violations: Vec::new(),
            constraints: ConstraintName::ALL.iter().map(|c| (*c, true)).collect(),
            weekend_collisions: Vec::new(),
            suggestions: BTreeMap::new(),
        }
    }

    fn fail(&mut self, name: ConstraintName, violation: ConstraintViolation) {
        self.constraints.insert(name, false);
        self.violations.push(violation);
    }

    fn name(&self, team: TeamId) -> String {
        team_name(self.roster, team)
    }

    /// Completed slots in round then slot order.
    fn completed(&self) -> impl Iterator<Item = (SlotRef, TeamId, TeamId, NaiveDateTime)> + 'a {
        self.schedule.iter_refs().filter_map(|(at, slot)| {
            let (home, away) = slot.teams()?;
            Some((at, home, away, slot.kickoff?))
        })
    }

    fn check_round_bookings(&mut self) {
        let schedule = self.schedule;
        let expected = schedule.teams_per_round();
        for round_index in 0..schedule.round_count() {
            let slots = schedule.round(round_index);
            let mut seen: HashSet<TeamId> = HashSet::new();
            for (slot_index, slot) in slots.iter().enumerate() {
                if !slot.is_complete() {
                    continue;
                }
                let Some((home, away)) = slot.teams() else {
                    continue;
                };
                let teams = if home == away {
                    vec![home]
                } else {
                    vec![home, away]
                };
                for team in teams {
                    if !seen.insert(team) {
                        let at = SlotRef::new(round_index, slot_index);
                        let message = format!(
                            "{} already plays in round {} before match {}",
                            self.name(team),
                            at.round_number(),
                            at.match_number()
                        );
                        self.fail(
                            ConstraintName::NoDoubleBooking,
                            ConstraintViolation::at_slot(ViolationKind::DoubleBooking, at, message),
                        );
                    }
                }
            }
            if seen.len() != expected {
                self.constraints.insert(ConstraintName::RoundsComplete, false);
                if slots.iter().all(|s| s.is_complete()) {
                    let message = format!(
                        "Round {} is not fully scheduled: {} of {} teams play",
                        round_index + 1,
                        seen.len(),
                        expected
                    );
                    self.fail(
                        ConstraintName::RoundsComplete,
                        ConstraintViolation::at_round(
                            ViolationKind::RoundIncomplete,
                            round_index,
                            message,
                        ),
                    );
                }
            }
        }
    }

    fn check_matchups(&mut self) {
        let mut claims = MatchupClaims::default();
        let completed: Vec<_> = self.completed().collect();
        for (at, home, away, _) in completed {
            if home == away {
                let message = format!(
                    "{} cannot play itself (round {}, match {})",
                    self.name(home),
                    at.round_number(),
                    at.match_number()
                );
                self.fail(
                    ConstraintName::NoSelfPlay,
                    ConstraintViolation::at_slot(ViolationKind::SelfPlay, at, message),
                );
                continue;
            }
            let key = MatchupKey::new(home, away);
            if let Claim::Duplicate { owner } = claims.claim(key, at) {
                let message = format!(
                    "{} vs {} is already scheduled in round {}, match {}",
                    self.name(home),
                    self.name(away),
                    owner.round_number(),
                    owner.match_number()
                );
                self.fail(
                    ConstraintName::UniqueMatchups,
                    ConstraintViolation::at_slot(ViolationKind::DuplicateMatchup, at, message),
                );
                self.suggestions
                    .entry(at)
                    .or_default()
                    .push(conflict_suggestion(self.roster, key, at, owner));
            }
        }
    }

    fn check_kickoffs(&mut self) {
        let schedule = self.schedule;
        for (at, slot) in schedule.iter_refs() {
            if slot.teams().is_none() {
                continue;
            }
            match slot.kickoff {
                None if slot.touched => {
                    let message = format!(
                        "Round {}, match {} has no date",
                        at.round_number(),
                        at.match_number()
                    );
                    self.fail(
                        ConstraintName::ValidDates,
                        ConstraintViolation::at_slot(ViolationKind::MissingDate, at, message),
                    );
                }
                None => {}
                Some(kickoff) => {
                    if let Err(reason) = classify_kickoff(kickoff, self.rules) {
                        let message = format!(
                            "Invalid date for round {}, match {}: {}",
                            at.round_number(),
                            at.match_number(),
                            reason
                        );
                        self.fail(
                            ConstraintName::ValidDates,
                            ConstraintViolation::at_slot(ViolationKind::InvalidDate, at, message),
                        );
                    }
                }
            }
        }
    }

    /// Every completed slot of a round must share the weekend of the round's first completed slot.
    fn check_same_weekend(&mut self) -> Vec<Option<RoundDate>> {
        let mut dates: Vec<Option<RoundDate>> = vec![None; self.schedule.round_count()];
        let completed: Vec<_> = self.completed().collect();
        for (at, _, _, kickoff) in completed {
            let bucket = kickoff_bucket(kickoff);
            let round_date = dates[at.round_index];
            match round_date {
                None => dates[at.round_index] = Some(RoundDate { kickoff, bucket }),
                Some(first) if first.bucket != bucket => {
                    let message = format!(
                        "Round {}, match {} is on the weekend of {} but the round is on the weekend of {}",
                        at.round_number(),
                        at.match_number(),
                        bucket,
                        first.bucket
                    );
                    self.fail(
                        ConstraintName::SameWeekendPerRound,
                        ConstraintViolation::at_slot(ViolationKind::SplitWeekend, at, message),
                    );
                }
                Some(_) => {}
            }
        }
        dates
    }

    fn check_weekend_collisions(&mut self, dates: &[Option<RoundDate>]) {
        let mut by_weekend: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (round_index, date) in dates.iter().enumerate() {
            if let Some(date) = date {
                by_weekend.entry(date.bucket).or_default().push(round_index);
            }
        }
        for (bucket, rounds) in by_weekend.into_iter().filter(|(_, r)| r.len() > 1) {
            for (i, &first) in rounds.iter().enumerate() {
                for &second in &rounds[i + 1..] {
                    let collision = WeekendCollision {
                        round1: first + 1,
                        round2: second + 1,
                    };
                    let message = format!(
                        "Rounds {} and {} are both on the weekend of {}",
                        collision.round1, collision.round2, bucket
                    );
                    self.weekend_collisions.push(collision);
                    self.fail(
                        ConstraintName::NoWeekendCollisions,
                        ConstraintViolation::global(ViolationKind::WeekendCollision, message),
                    );
                }
            }
        }
    }

    /// Each dated round must fall on a later weekend than the previous dated round.
    fn check_round_order(&mut self, dates: &[Option<RoundDate>]) {
        let mut previous: Option<(usize, NaiveDate)> = None;
        for (round_index, date) in dates.iter().enumerate() {
            let Some(date) = date else {
                continue;
            };
            if let Some((prev_index, prev_bucket)) = previous {
                if date.bucket <= prev_bucket {
                    let message = format!(
                        "Rounds out of order: round {} (weekend of {}) must come after round {} (weekend of {})",
                        round_index + 1,
                        date.bucket,
                        prev_index + 1,
                        prev_bucket
                    );
                    self.fail(
                        ConstraintName::RoundsInOrder,
                        ConstraintViolation::at_round(
                            ViolationKind::RoundsOutOfOrder,
                            round_index,
                            message,
                        ),
                    );
                }
            }
            previous = Some((round_index, date.bucket));
        }
    }

    fn check_first_round(&mut self, dates: &[Option<RoundDate>]) {
        let Some(Some(first)) = dates.first() else {
            return;
        };
        let day = first.kickoff.date();
        if !is_first_week_of_month(day) {
            let message = format!(
                "Round 1 is on {} but must be played in the first 7 days of the month",
                day
            );
            self.fail(
                ConstraintName::FirstRoundInFirstWeek,
                ConstraintViolation::at_round(ViolationKind::FirstRoundTooLate, 0, message),
            );
        }
    }

    fn check_pre_season(&mut self, dates: &[Option<RoundDate>]) {
        let Some(Some(first)) = dates.first() else {
            return;
        };
        let pre_season = preceding_weekend(first.bucket);
        for (round_index, date) in dates.iter().enumerate().skip(1) {
            if matches!(date, Some(d) if d.bucket == pre_season) {
                let message = format!(
                    "Round {} is on the weekend of {}, the weekend before round 1",
                    round_index + 1,
                    pre_season
                );
                self.fail(
                    ConstraintName::NoPreSeasonRound,
                    ConstraintViolation::at_round(
                        ViolationKind::PreSeasonRound,
                        round_index,
                        message,
                    ),
                );
            }
        }
    }

    fn finish(self, all_slots_touched: bool) -> ScheduleReport {
        ScheduleReport {
            violations: self.violations,
            constraints: self.constraints,
            weekend_collisions: self.weekend_collisions,
            conflict_suggestions: self.suggestions,
            all_slots_touched,
        }
    }
}
