//! Team source: read-only access to the `teams` collection, plus CSV import for seeding it.

use crate::models::Team;
use crate::store::document::{team_from_document, team_to_document};
use crate::store::{DocumentStore, RepositoryError, TEAMS_COLLECTION};
use serde::Deserialize;
use std::future::Future;
use std::io::Read;

/// Where pairing runs get their teams from.
pub trait TeamSource {
    fn fetch_teams(&self) -> impl Future<Output = Result<Vec<Team>, RepositoryError>> + Send;
}

/// Team source backed by a document store.
#[derive(Clone, Debug)]
pub struct StoreTeamSource<S> {
    store: S,
}

impl<S: DocumentStore> StoreTeamSource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Write teams under their own ids, replacing any existing documents.
    pub async fn seed(&self, teams: &[Team]) -> Result<(), RepositoryError> {
        for team in teams {
            let doc = team_to_document(team).map_err(|e| RepositoryError::Malformed {
                id: team.id.clone(),
                reason: e.to_string(),
            })?;
            self.store.set(TEAMS_COLLECTION, &team.id, doc).await?;
        }
        log::info!("Seeded {} teams", teams.len());
        Ok(())
    }
}

impl<S: DocumentStore> TeamSource for StoreTeamSource<S> {
    /// Teams ordered by name, then id, so listings are stable.
    async fn fetch_teams(&self) -> Result<Vec<Team>, RepositoryError> {
        let docs = self.store.list(TEAMS_COLLECTION).await?;
        let mut teams = docs
            .into_iter()
            .map(|(id, doc)| {
                team_from_document(&id, doc)
                    .map_err(|reason| RepositoryError::Malformed { id, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;
        teams.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        log::debug!("Fetched {} teams", teams.len());
        Ok(teams)
    }
}

#[derive(Deserialize)]
struct TeamRow {
    id: String,
    #[serde(default)]
    name: String,
    /// Member ids separated by `;`.
    #[serde(default)]
    members: String,
}

/// Parse teams from CSV with an `id,name,members` header. Blank names fall back to the id.
pub fn import_teams_csv<R: Read>(reader: R) -> Result<Vec<Team>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut teams = Vec::new();
    for row in rdr.deserialize() {
        let row: TeamRow = row?;
        let name = if row.name.is_empty() { row.id.clone() } else { row.name };
        let members = row
            .members
            .split(';')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
            .collect();
        teams.push(Team::new(row.id, name).with_members(members));
    }
    Ok(teams)
}
