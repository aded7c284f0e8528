//! Stored document layout (camelCase JSON) and its mapping to the models. Loading tolerates
//! legacy documents with missing fields.

use crate::models::{Bracket, Matchup, MatchupId, Team, TeamRef};
use crate::store::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchupDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<MatchupId>,
    team1_id: String,
    team1_name: Option<String>,
    team2_id: String,
    team2_name: Option<String>,
    round: Option<u32>,
    winner: Option<String>,
    /// Written for readers of the raw documents; always re-derived from `winner` on load.
    completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matchup_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BracketDocument {
    name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<String>,
    total_teams: Option<usize>,
    current_round: Option<u32>,
    completed: Option<bool>,
    matchups: Option<Vec<MatchupDocument>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TeamDocument {
    name: Option<String>,
    members: Option<Vec<String>>,
}

pub(crate) fn bracket_to_document(bracket: &Bracket) -> serde_json::Result<Document> {
    let matchups = bracket
        .matchups
        .iter()
        .map(|m| MatchupDocument {
            id: Some(m.id),
            team1_id: m.team_1.id.clone(),
            team1_name: Some(m.team_1.name.clone()),
            team2_id: m.team_2.id.clone(),
            team2_name: Some(m.team_2.name.clone()),
            round: Some(m.round),
            winner: m.winner.clone(),
            completed: Some(m.is_completed()),
            matchup_time: m.matchup_time.clone(),
        })
        .collect();
    serde_json::to_value(BracketDocument {
        name: Some(bracket.name.clone()),
        created_at: Some(bracket.created_at),
        created_by: bracket.created_by.clone(),
        total_teams: Some(bracket.total_teams),
        current_round: Some(bracket.current_round),
        completed: Some(bracket.completed),
        matchups: Some(matchups),
    })
}

/// Rebuild a bracket from its stored document. `Err` carries a human-readable reason.
pub(crate) fn bracket_from_document(id: &str, document: Document) -> Result<Bracket, String> {
    let doc: BracketDocument = serde_json::from_value(document).map_err(|e| e.to_string())?;
    let current_round = doc.current_round.filter(|r| *r > 0).unwrap_or(1);

    let mut matchups = Vec::new();
    for (i, m) in doc.matchups.unwrap_or_default().into_iter().enumerate() {
        if let Some(winner) = &m.winner {
            if *winner != m.team1_id && *winner != m.team2_id {
                return Err(format!("matchup {} has winner {} who is not playing", i + 1, winner));
            }
        }
        if m.completed.unwrap_or(false) != m.winner.is_some() {
            log::warn!(
                "Bracket {} matchup {}: stored completed flag disagrees with winner, using winner",
                id,
                i + 1
            );
        }
        matchups.push(Matchup {
            id: m.id.unwrap_or_else(Uuid::new_v4),
            round: m.round.filter(|r| *r > 0).unwrap_or(current_round),
            team_1: TeamRef {
                name: m.team1_name.unwrap_or_else(|| m.team1_id.clone()),
                id: m.team1_id,
            },
            team_2: TeamRef {
                name: m.team2_name.unwrap_or_else(|| m.team2_id.clone()),
                id: m.team2_id,
            },
            winner: m.winner,
            matchup_time: m.matchup_time,
        });
    }

    Ok(Bracket {
        id: Some(id.to_string()),
        name: doc
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Tournament {}", id)),
        // Undated documents get the epoch, so they list last and keep their place.
        created_at: doc.created_at.unwrap_or_default(),
        created_by: doc.created_by,
        total_teams: doc.total_teams.unwrap_or(0),
        current_round,
        completed: doc.completed.unwrap_or(false),
        matchups,
    })
}

pub(crate) fn team_to_document(team: &Team) -> serde_json::Result<Document> {
    serde_json::to_value(TeamDocument {
        name: Some(team.name.clone()),
        members: Some(team.members.clone()),
    })
}

/// Team from its stored document; a missing name falls back to the id.
pub(crate) fn team_from_document(id: &str, document: Document) -> Result<Team, String> {
    let doc: TeamDocument = serde_json::from_value(document).map_err(|e| e.to_string())?;
    Ok(Team {
        id: id.to_string(),
        name: doc
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| id.to_string()),
        members: doc.members.unwrap_or_default(),
    })
}
