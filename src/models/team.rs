//! Team and TeamRef (the snapshot embedded in a matchup).

use serde::{Deserialize, Serialize};

/// Opaque team identifier, owned by the external store.
pub type TeamId = String;

/// A team as fetched from the team source.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Member identifiers, in the order the store returned them.
    #[serde(default)]
    pub members: Vec<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }

    /// Copy of id + display name for embedding in a matchup.
    pub fn snapshot(&self) -> TeamRef {
        TeamRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Team reference copied into a matchup. Decoupled from the live team record,
/// so later renames or deletions leave historical brackets intact.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}
