//! Bracket (one tournament's round of matchups) and BracketError.

use crate::models::matchup::{Matchup, MatchupSelector};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors raised by the pairing engine and bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Pairing needs an even number of teams.
    UnpairableTeamCount(usize),
    /// The same team id was supplied more than once.
    DuplicateTeam(TeamId),
    /// Round numbers start at 1.
    InvalidRound(u32),
    /// Matchups do not exactly partition the teams.
    InvalidBracket(String),
    /// Selector resolved to zero or several matchups.
    MatchupNotFound { candidates: usize },
    /// Winner is not one of the matchup's two teams.
    InvalidWinner(TeamId),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::UnpairableTeamCount(n) => {
                write!(f, "Cannot pair an odd number of teams ({})", n)
            }
            BracketError::DuplicateTeam(id) => write!(f, "Team {} appears more than once", id),
            BracketError::InvalidRound(r) => write!(f, "Invalid round number {}", r),
            BracketError::InvalidBracket(reason) => write!(f, "Invalid bracket: {}", reason),
            BracketError::MatchupNotFound { candidates: 0 } => write!(f, "Matchup not found"),
            BracketError::MatchupNotFound { candidates } => {
                write!(f, "Matchup is ambiguous ({} candidates)", candidates)
            }
            BracketError::InvalidWinner(id) => {
                write!(f, "Team {} is not playing in this matchup", id)
            }
        }
    }
}

impl std::error::Error for BracketError {}

/// Opaque bracket identifier, assigned by the store on first save.
pub type BracketId = String;

/// One tournament: a single generated round of matchups plus metadata.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// None until the bracket has been saved.
    pub id: Option<BracketId>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Opaque identity of whoever created the bracket.
    pub created_by: Option<String>,
    /// Team count at creation time.
    pub total_teams: usize,
    pub current_round: u32,
    pub completed: bool,
    /// Creation order, which is also "Match N" numbering.
    pub matchups: Vec<Matchup>,
}

impl Bracket {
    /// Build a bracket from a pairing result. `matchups` must use every team exactly once
    /// and share one round number, which becomes `current_round`.
    pub fn create(
        name: &str,
        teams: &[Team],
        matchups: Vec<Matchup>,
    ) -> Result<Self, BracketError> {
        if teams.is_empty() {
            return Err(BracketError::InvalidBracket("no teams".into()));
        }
        let mut team_ids: HashSet<&str> = HashSet::with_capacity(teams.len());
        for t in teams {
            if !team_ids.insert(&t.id) {
                return Err(BracketError::InvalidBracket(format!("team {} listed twice", t.id)));
            }
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(teams.len());
        for m in &matchups {
            for id in [&m.team_1.id, &m.team_2.id] {
                if !team_ids.contains(id.as_str()) {
                    return Err(BracketError::InvalidBracket(format!("unknown team {}", id)));
                }
                if !seen.insert(id) {
                    return Err(BracketError::InvalidBracket(format!("team {} paired twice", id)));
                }
            }
        }
        if seen.len() != team_ids.len() {
            return Err(BracketError::InvalidBracket(format!(
                "{} of {} teams unpaired",
                team_ids.len() - seen.len(),
                team_ids.len()
            )));
        }

        let current_round = matchups[0].round;
        if current_round == 0 {
            return Err(BracketError::InvalidRound(0));
        }
        if matchups.iter().any(|m| m.round != current_round) {
            return Err(BracketError::InvalidBracket("matchups span several rounds".into()));
        }

        let created_at = Utc::now();
        let name = match name.trim() {
            "" => format!("Tournament {}", created_at.format("%Y-%m-%d")),
            trimmed => trimmed.to_string(),
        };
        Ok(Self {
            id: None,
            name,
            created_at,
            created_by: None,
            total_teams: teams.len(),
            current_round,
            completed: false,
            matchups,
        })
    }

    /// Stamp the creating caller's identity.
    pub fn with_creator(mut self, user: impl Into<String>) -> Self {
        self.created_by = Some(user.into());
        self
    }

    /// Index of the single matchup the selector points at.
    pub fn find_matchup(&self, selector: &MatchupSelector) -> Result<usize, BracketError> {
        let mut hits = self
            .matchups
            .iter()
            .enumerate()
            .filter(|(_, m)| m.matches(selector))
            .map(|(i, _)| i);
        match (hits.next(), hits.count()) {
            (Some(idx), 0) => Ok(idx),
            (None, _) => Err(BracketError::MatchupNotFound { candidates: 0 }),
            (Some(_), rest) => Err(BracketError::MatchupNotFound {
                candidates: rest + 1,
            }),
        }
    }

    /// True iff every matchup has a winner.
    pub fn is_complete(&self) -> bool {
        self.matchups.iter().all(Matchup::is_completed)
    }

    pub fn completed_matchups(&self) -> usize {
        self.matchups.iter().filter(|m| m.is_completed()).count()
    }

    pub fn summary(&self) -> Option<BracketSummary> {
        Some(BracketSummary {
            id: self.id.clone()?,
            name: self.name.clone(),
            total_teams: self.total_teams,
            current_round: self.current_round,
            match_count: self.matchups.len(),
            completed: self.completed,
            created_at: self.created_at,
        })
    }
}

/// Lightweight listing view of a saved bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSummary {
    pub id: BracketId,
    pub name: String,
    pub total_teams: usize,
    pub current_round: u32,
    pub match_count: usize,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
