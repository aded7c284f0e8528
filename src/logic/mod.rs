//! Tournament business logic: wheel pairing, result recording, statistics.

mod pairing;
mod results;
mod stats;

pub use pairing::{pair_teams, spin_the_wheel, PairingRun, Spin};
pub use results::{is_bracket_complete, record_match_time, record_winner};
pub use stats::{compute_stats, BracketStats, TeamWins, STATS_TOP_N};
