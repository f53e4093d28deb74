//! Kickoff window and weekend bucket checks over generated timestamps.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use round_robin_planner::logic::{is_valid_kickoff, weekend_bucket};
use round_robin_planner::CompetitionRules;

fn at(m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Independent statement of the kickoff rule.
fn expected_valid(ts: NaiveDateTime) -> bool {
    if ![3, 4].contains(&ts.month()) {
        return false;
    }
    let (h, m) = (ts.hour(), ts.minute());
    match ts.weekday() {
        Weekday::Fri => h >= 18,
        Weekday::Sat => true,
        Weekday::Sun => h < 20 || (h == 20 && m == 0),
        _ => false,
    }
}

fn random_timestamp(rng: &mut StdRng) -> NaiveDateTime {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let day = start + Duration::days(rng.gen_range(0..365));
    day.and_hms_opt(rng.gen_range(0..24), rng.gen_range(0..60), 0)
        .unwrap()
}

#[test]
fn generated_timestamps_match_the_rule() {
    let rules = CompetitionRules::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..5_000 {
        let ts = random_timestamp(&mut rng);
        assert_eq!(is_valid_kickoff(ts, &rules), expected_valid(ts), "{ts}");
    }
}

#[test]
fn boundary_minutes() {
    let rules = CompetitionRules::default();
    // Friday 2026-03-13, Sunday 2026-03-15
    assert!(!is_valid_kickoff(at(3, 13, 17, 59), &rules));
    assert!(is_valid_kickoff(at(3, 13, 18, 0), &rules));
    assert!(is_valid_kickoff(at(3, 13, 23, 59), &rules));
    assert!(is_valid_kickoff(at(3, 15, 0, 0), &rules));
    assert!(is_valid_kickoff(at(3, 15, 20, 0), &rules));
    assert!(!is_valid_kickoff(at(3, 15, 20, 1), &rules));
    // Saturday in May is outside the competition months.
    assert!(!is_valid_kickoff(at(5, 2, 15, 0), &rules));
}

#[test]
fn configured_months_replace_the_defaults() {
    let rules = CompetitionRules::new(9, 10).unwrap();
    // 2026-09-05 is a Saturday
    assert!(is_valid_kickoff(
        NaiveDate::from_ymd_opt(2026, 9, 5)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap(),
        &rules
    ));
    assert!(!is_valid_kickoff(at(3, 7, 15, 0), &rules));
    assert!(CompetitionRules::new(0, 4).is_err());
    assert!(CompetitionRules::new(3, 13).is_err());
}

#[test]
fn weekend_bucket_is_the_saturday_of_the_week() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1_000 {
        let date = random_timestamp(&mut rng).date();
        let bucket = weekend_bucket(date);
        assert_eq!(bucket.weekday(), Weekday::Sat);
        assert_eq!(bucket.iso_week(), date.iso_week());
        if matches!(date.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun) {
            assert!((bucket - date).num_days().abs() <= 1);
        }
    }
}
