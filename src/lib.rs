//! Sports tournament organizer: library with models, pairing logic and the storage adapter.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    compute_stats, is_bracket_complete, pair_teams, record_match_time, record_winner,
    spin_the_wheel, BracketStats, PairingRun, Spin, TeamWins,
};
pub use models::{
    Bracket, BracketError, BracketId, BracketSummary, Matchup, MatchupId, MatchupSelector, Team,
    TeamId, TeamRef,
};
pub use store::{
    import_teams_csv, BracketRepository, DocumentStore, ListOrder, MemoryStore, RepositoryError,
    StoreError, StoreTeamSource, TeamSource,
};
