//! Recording results and match times. Every operation returns a new bracket value and leaves
//! the input untouched; persisting it is the caller's job.

use crate::models::{Bracket, BracketError, MatchupSelector};

/// Set the winner of one matchup. The bracket's `completed` flag is refreshed afterwards.
pub fn record_winner(
    bracket: &Bracket,
    selector: &MatchupSelector,
    winner_id: &str,
) -> Result<Bracket, BracketError> {
    let idx = bracket.find_matchup(selector)?;
    if !bracket.matchups[idx].involves(winner_id) {
        return Err(BracketError::InvalidWinner(winner_id.to_string()));
    }
    let mut updated = bracket.clone();
    updated.matchups[idx].winner = Some(winner_id.to_string());
    updated.completed = updated.is_complete();
    Ok(updated)
}

/// Set the free-form match time of one matchup. No format validation.
pub fn record_match_time(
    bracket: &Bracket,
    selector: &MatchupSelector,
    time_text: &str,
) -> Result<Bracket, BracketError> {
    let idx = bracket.find_matchup(selector)?;
    let mut updated = bracket.clone();
    updated.matchups[idx].matchup_time = Some(time_text.to_string());
    Ok(updated)
}

pub fn is_bracket_complete(bracket: &Bracket) -> bool {
    bracket.is_complete()
}
