//! Fixture records handed to the external save/validate endpoint, as JSON rows or CSV.

use crate::models::{Schedule, StadiumId, TeamId};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Write;

/// One fixture in the shape the persistence endpoint expects.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureRecord {
    pub round: u32,
    /// ISO-8601 local kickoff.
    pub date: Option<NaiveDateTime>,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub stadium_id: Option<StadiumId>,
    pub location: String,
    pub season: i32,
}

/// One record per slot, in round then slot order.
pub fn fixture_records(schedule: &Schedule, season: i32) -> Vec<FixtureRecord> {
    schedule
        .slots()
        .iter()
        .map(|slot| FixtureRecord {
            round: slot.round,
            date: slot.kickoff,
            home_team_id: slot.home,
            away_team_id: slot.away,
            stadium_id: slot.stadium,
            location: slot.location.clone(),
            season,
        })
        .collect()
}

/// Write the records as CSV with a header row. Missing values become empty fields.
pub fn write_fixture_csv<W: Write>(records: &[FixtureRecord], writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
