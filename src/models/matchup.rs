//! Matchup and the selectors used to address one inside a bracket.

use crate::models::team::{TeamId, TeamRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a matchup.
pub type MatchupId = Uuid;

/// One pairing of two teams within a bracket round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: MatchupId,
    pub round: u32,
    pub team_1: TeamRef,
    pub team_2: TeamRef,
    /// Id of the winning team. None if not yet played.
    pub winner: Option<TeamId>,
    /// Free-form scheduling text, e.g. "3:30 PM".
    pub matchup_time: Option<String>,
}

impl Matchup {
    pub fn new(team_1: TeamRef, team_2: TeamRef, round: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            team_1,
            team_2,
            winner: None,
            matchup_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team_1.id == team_id || self.team_2.id == team_id
    }

    /// Display name of the winner, looked up from the team snapshots.
    pub fn winner_name(&self) -> Option<&str> {
        let winner = self.winner.as_deref()?;
        if winner == self.team_1.id {
            Some(&self.team_1.name)
        } else if winner == self.team_2.id {
            Some(&self.team_2.name)
        } else {
            None
        }
    }

    pub fn matches(&self, selector: &MatchupSelector) -> bool {
        match selector {
            MatchupSelector::Id(id) => self.id == *id,
            MatchupSelector::Teams {
                team_1_id,
                team_2_id,
                round,
            } => self.team_1.id == *team_1_id && self.team_2.id == *team_2_id && self.round == *round,
        }
    }
}

/// How a caller points at a matchup.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupSelector {
    Id(MatchupId),
    /// Legacy composite key. Not guaranteed unique; ambiguous hits are rejected.
    Teams {
        team_1_id: TeamId,
        team_2_id: TeamId,
        round: u32,
    },
}

impl MatchupSelector {
    pub fn by_teams(team_1_id: impl Into<TeamId>, team_2_id: impl Into<TeamId>, round: u32) -> Self {
        Self::Teams {
            team_1_id: team_1_id.into(),
            team_2_id: team_2_id.into(),
            round,
        }
    }
}

impl From<&Matchup> for MatchupSelector {
    fn from(m: &Matchup) -> Self {
        Self::Id(m.id)
    }
}
