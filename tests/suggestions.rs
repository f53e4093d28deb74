//! Integration tests for trackers and the matchup suggestion engine.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use round_robin_planner::{
    suggest_matchups, BlockReason, MatchupKey, Schedule, SlotRef, Team, TeamId, Trackers,
};

fn roster(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

fn pair(schedule: &mut Schedule, round: usize, slot: usize, home: TeamId, away: TeamId) {
    let s = schedule.slot_mut(SlotRef::new(round, slot)).unwrap();
    s.home = Some(home);
    s.away = Some(away);
}

#[test]
fn fresh_schedule_suggests_every_pair_in_roster_order() {
    let teams = roster(4);
    let s = Schedule::for_roster(&teams);
    let trackers = Trackers::build(&s, &teams);
    let suggestions = suggest_matchups(&s, &teams, &trackers, SlotRef::new(0, 0));
    assert_eq!(
        suggestions.labels(),
        vec!["T0 vs T1", "T0 vs T2", "T0 vs T3", "T1 vs T2", "T1 vs T3", "T2 vs T3"]
    );
    assert!(suggestions.blocked.is_empty());
}

#[test]
fn teams_playing_in_the_round_are_not_suggested() {
    let teams = roster(4);
    let mut s = Schedule::for_roster(&teams);
    pair(&mut s, 0, 0, teams[0].id, teams[1].id);
    let trackers = Trackers::build(&s, &teams);
    let suggestions = suggest_matchups(&s, &teams, &trackers, SlotRef::new(0, 1));
    assert_eq!(suggestions.labels(), vec!["T2 vs T3"]);
}

#[test]
fn already_played_pair_is_explained_when_nothing_is_left() {
    let teams = roster(4);
    let mut s = Schedule::for_roster(&teams);
    pair(&mut s, 0, 0, teams[0].id, teams[1].id);
    pair(&mut s, 1, 0, teams[2].id, teams[3].id);
    let trackers = Trackers::build(&s, &teams);

    let suggestions = suggest_matchups(&s, &teams, &trackers, SlotRef::new(1, 1));
    assert!(suggestions.candidates.is_empty());
    assert_eq!(suggestions.blocked.len(), 1);
    let blocked = &suggestions.blocked[0];
    assert_eq!(blocked.label, "T0 vs T1");
    assert_eq!(
        blocked.reason,
        BlockReason::AlreadyPlayed {
            at: Some(SlotRef::new(0, 0))
        }
    );
}

#[test]
fn full_round_has_no_candidates_and_nothing_blocked() {
    let teams = roster(4);
    let mut s = Schedule::for_roster(&teams);
    pair(&mut s, 0, 0, teams[0].id, teams[1].id);
    pair(&mut s, 0, 1, teams[2].id, teams[3].id);
    let trackers = Trackers::build(&s, &teams);
    let suggestions = suggest_matchups(&s, &teams, &trackers, SlotRef::new(0, 1));
    assert!(suggestions.candidates.is_empty());
    assert!(suggestions.blocked.is_empty());
}

#[test]
fn trackers_ignore_touched_flag_and_half_filled_slots() {
    let teams = roster(6);
    let mut s = Schedule::for_roster(&teams);
    pair(&mut s, 2, 1, teams[4].id, teams[1].id);
    s.slot_mut(SlotRef::new(3, 0)).unwrap().home = Some(teams[0].id);

    let trackers = Trackers::build(&s, &teams);
    assert!(trackers
        .matchups
        .is_played(MatchupKey::new(teams[1].id, teams[4].id)));
    assert_eq!(trackers.matchups.played_count(), 1);
    assert!(trackers.rounds.is_scheduled(2, teams[4].id));
    assert!(trackers.rounds.is_scheduled(2, teams[1].id));
    assert!(!trackers.rounds.is_scheduled(3, teams[0].id));
    assert!(!trackers.rounds.is_scheduled(1, teams[4].id));
}

#[test]
fn trackers_are_order_independent() {
    let teams = roster(6);
    let mut forward = Schedule::for_roster(&teams);
    pair(&mut forward, 0, 0, teams[0].id, teams[1].id);
    pair(&mut forward, 1, 2, teams[2].id, teams[3].id);
    let mut backward = Schedule::for_roster(&teams);
    pair(&mut backward, 1, 2, teams[3].id, teams[2].id);
    pair(&mut backward, 0, 0, teams[1].id, teams[0].id);

    let a = Trackers::build(&forward, &teams);
    let b = Trackers::build(&backward, &teams);
    assert_eq!(a.matchups, b.matchups);
    assert_eq!(a.rounds, b.rounds);
}

#[test]
fn candidates_exist_iff_some_free_pair_is_unplayed() {
    let teams = roster(6);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..300 {
        let mut s = Schedule::for_roster(&teams);
        for round in 0..s.round_count() {
            for slot in 0..s.slots_per_round() {
                if rng.gen_bool(0.5) {
                    let picked: Vec<&Team> = teams.choose_multiple(&mut rng, 2).collect();
                    pair(&mut s, round, slot, picked[0].id, picked[1].id);
                }
            }
        }
        let trackers = Trackers::build(&s, &teams);
        let target = SlotRef::new(rng.gen_range(0..s.round_count()), 0);

        let round = s.round(target.round_index);
        let free: Vec<&Team> = teams
            .iter()
            .filter(|t| !round.iter().any(|slot| slot.teams().is_some() && slot.involves(t.id)))
            .collect();
        let played = |a: TeamId, b: TeamId| {
            s.slots()
                .iter()
                .any(|slot| slot.matchup() == Some(MatchupKey::new(a, b)))
        };
        let exists = free
            .iter()
            .enumerate()
            .any(|(i, a)| free[i + 1..].iter().any(|b| !played(a.id, b.id)));

        let suggestions = suggest_matchups(&s, &teams, &trackers, target);
        assert_eq!(!suggestions.candidates.is_empty(), exists);
        if suggestions.candidates.is_empty() {
            assert!(suggestions
                .blocked
                .iter()
                .all(|b| matches!(b.reason, BlockReason::AlreadyPlayed { at: Some(_) })));
        }
    }
}
