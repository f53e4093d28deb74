//! Team and Stadium records supplied by the roster provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in fixtures and matchup keys).
pub type TeamId = Uuid;

/// Unique identifier for a stadium.
pub type StadiumId = Uuid;

/// A team in the competition. Immutable for the duration of a scheduling session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Create a team with a freshly minted id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create a team with the id handed out by the roster provider.
    pub fn with_id(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A venue a fixture can be played at.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub id: StadiumId,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

impl Stadium {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Display name of a team in `roster`, falling back to the raw id for unknown teams.
pub fn team_name(roster: &[Team], id: TeamId) -> String {
    roster
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| id.to_string())
}
