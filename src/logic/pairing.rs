//! Roller wheel: random pairing of teams into one round of matchups.
//!
//! A [`PairingRun`] holds the wheel's working state. Each [`PairingRun::spin`] either draws one
//! team uniformly from the remaining ones or, when exactly two are left, pairs them directly.
//! Every two consecutive draws form a matchup, so the output order is the order in which pairs
//! were completed.

use crate::models::{BracketError, Matchup, Team, TeamId};
use rand::Rng;
use std::collections::HashSet;

/// Outcome of one spin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Spin {
    /// Team drawn; it waits for an opponent.
    Drew { team: TeamId },
    /// Opponent drawn; a matchup was formed at this index.
    Paired { matchup: usize },
    /// The last two teams were paired without a draw.
    PairedLastTwo { matchup: usize },
}

/// Ephemeral state of one wheel run. Never persisted.
#[derive(Clone, Debug)]
pub struct PairingRun {
    round: u32,
    teams: Vec<Team>,
    remaining: Vec<Team>,
    selected: Vec<Team>,
    matchups: Vec<Matchup>,
}

impl PairingRun {
    /// Start a run. Team ids must be unique and the count even (zero is allowed).
    pub fn new(teams: &[Team], round: u32) -> Result<Self, BracketError> {
        if round == 0 {
            return Err(BracketError::InvalidRound(round));
        }
        let mut ids = HashSet::with_capacity(teams.len());
        for t in teams {
            if !ids.insert(t.id.as_str()) {
                return Err(BracketError::DuplicateTeam(t.id.clone()));
            }
        }
        if teams.len() % 2 != 0 {
            return Err(BracketError::UnpairableTeamCount(teams.len()));
        }
        Ok(Self {
            round,
            teams: teams.to_vec(),
            remaining: teams.to_vec(),
            selected: Vec::with_capacity(teams.len()),
            matchups: Vec::with_capacity(teams.len() / 2),
        })
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn remaining(&self) -> &[Team] {
        &self.remaining
    }

    /// Teams in the order they came off the wheel.
    pub fn selected(&self) -> &[Team] {
        &self.selected
    }

    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }

    /// The drawn team still waiting for an opponent, if any.
    pub fn waiting(&self) -> Option<&Team> {
        if self.selected.len() % 2 == 1 {
            self.selected.last()
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Advance the wheel by one step. Returns None once every team is paired.
    pub fn spin<R: Rng>(&mut self, rng: &mut R) -> Option<Spin> {
        match self.remaining.len() {
            0 => None,
            // Selected count is even here, so nobody is waiting.
            2 => {
                let m = Matchup::new(
                    self.remaining[0].snapshot(),
                    self.remaining[1].snapshot(),
                    self.round,
                );
                self.selected.append(&mut self.remaining);
                self.matchups.push(m);
                Some(Spin::PairedLastTwo {
                    matchup: self.matchups.len() - 1,
                })
            }
            n => {
                let team = self.remaining.remove(rng.gen_range(0..n));
                self.selected.push(team);
                let len = self.selected.len();
                if len % 2 == 1 {
                    return Some(Spin::Drew {
                        team: self.selected[len - 1].id.clone(),
                    });
                }
                self.matchups.push(Matchup::new(
                    self.selected[len - 2].snapshot(),
                    self.selected[len - 1].snapshot(),
                    self.round,
                ));
                Some(Spin::Paired {
                    matchup: self.matchups.len() - 1,
                })
            }
        }
    }

    /// Spin until every team is paired and hand over the matchups.
    pub fn finish<R: Rng>(mut self, rng: &mut R) -> Vec<Matchup> {
        while self.spin(rng).is_some() {}
        self.matchups
    }
}

/// Pair all teams for `round` using the given random source.
pub fn pair_teams<R: Rng>(
    teams: &[Team],
    round: u32,
    rng: &mut R,
) -> Result<Vec<Matchup>, BracketError> {
    let run = PairingRun::new(teams, round)?;
    let matchups = run.finish(rng);
    log::debug!("Paired {} teams into {} matchups (round {})", teams.len(), matchups.len(), round);
    Ok(matchups)
}

/// Pair all teams for `round` with the thread-local RNG.
pub fn spin_the_wheel(teams: &[Team], round: u32) -> Result<Vec<Matchup>, BracketError> {
    pair_teams(teams, round, &mut rand::thread_rng())
}
