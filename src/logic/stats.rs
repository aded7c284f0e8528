//! Dashboard statistics over all saved brackets.

use crate::models::{Bracket, BracketSummary};
use serde::Serialize;
use std::collections::HashMap;

/// How many recent brackets and top teams the dashboard shows.
pub const STATS_TOP_N: usize = 5;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TeamWins {
    pub name: String,
    pub wins: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct BracketStats {
    pub tournaments: usize,
    pub completed_tournaments: usize,
    pub total_matches: usize,
    /// Rounded percentage of completed tournaments (0 when there are none).
    pub completion_rate: u32,
    /// Newest first.
    pub recent: Vec<BracketSummary>,
    /// Most wins first, ties by name.
    pub top_teams: Vec<TeamWins>,
}

pub fn compute_stats(brackets: &[Bracket]) -> BracketStats {
    let tournaments = brackets.len();
    let completed_tournaments = brackets.iter().filter(|b| b.completed).count();
    let total_matches = brackets.iter().map(|b| b.matchups.len()).sum();
    let completion_rate = if tournaments == 0 {
        0
    } else {
        (completed_tournaments as f64 * 100.0 / tournaments as f64).round() as u32
    };

    let mut recent: Vec<BracketSummary> = brackets.iter().filter_map(Bracket::summary).collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(STATS_TOP_N);

    // Keyed by the winner name snapshot.
    let mut wins: HashMap<&str, u32> = HashMap::new();
    for m in brackets.iter().flat_map(|b| &b.matchups) {
        if let Some(name) = m.winner_name() {
            *wins.entry(name).or_default() += 1;
        }
    }
    let mut top_teams: Vec<TeamWins> = wins
        .into_iter()
        .map(|(name, wins)| TeamWins {
            name: name.to_string(),
            wins,
        })
        .collect();
    top_teams.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
    top_teams.truncate(STATS_TOP_N);

    BracketStats {
        tournaments,
        completed_tournaments,
        total_matches,
        completion_rate,
        recent,
        top_teams,
    }
}
