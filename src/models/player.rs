//! Participant data structures and roster loading.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in results and lookups).
pub type PlayerId = Uuid;

/// A participant in a bracket run. Immutable once the bracket is seeded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
    /// Affiliation group (club/state). Drives the group-pairing tie-break.
    pub association: String,
    /// Weigh-in value in kg, when the discipline uses one.
    pub weight: Option<f64>,
}

impl Participant {
    /// Create a new participant with a fresh id.
    pub fn new(name: impl Into<String>, association: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            association: association.into(),
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// One row of a CSV roster: `name,association,weight` (weight optional).
#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    association: String,
    weight: Option<f64>,
}

/// Parse a CSV roster (header `name,association,weight`) into participants.
/// Rows with an empty name are skipped; a malformed row aborts the whole import.
pub fn parse_roster(data: &str) -> Result<Vec<Participant>, csv::Error> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut participants = Vec::new();
    for row in reader.deserialize() {
        let row: RosterRow = row?;
        let name = row.name.trim();
        if name.is_empty() {
            continue;
        }
        let mut p = Participant::new(name, row.association.trim());
        p.weight = row.weight;
        participants.push(p);
    }
    Ok(participants)
}
