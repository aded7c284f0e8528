//! Data structures for the tournament: teams, matchups, brackets.

mod bracket;
mod matchup;
mod team;

pub use bracket::{Bracket, BracketError, BracketId, BracketSummary};
pub use matchup::{Matchup, MatchupId, MatchupSelector};
pub use team::{Team, TeamId, TeamRef};
