//! In-memory `TournamentStore` over a locked map of snapshots.

use crate::models::{Tournament, TournamentError, TournamentId};
use crate::store::TournamentStore;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local store. Snapshots live for the life of the process; each
/// mutation replaces the whole entry under one write lock.
#[derive(Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Snapshot writes are whole-value replacements, so a poisoned lock
    // cannot expose a half-updated entry; recover the guard.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TournamentId, Tournament>> {
        self.tournaments.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TournamentId, Tournament>> {
        self.tournaments.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TournamentStore for MemoryStore {
    fn insert_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError> {
        self.write().insert(tournament.id.clone(), tournament.clone());
        Ok(())
    }

    fn update_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError> {
        let mut g = self.write();
        if !g.contains_key(&tournament.id) {
            return Err(TournamentError::TournamentNotFound);
        }
        g.insert(tournament.id.clone(), tournament.clone());
        Ok(())
    }

    fn tournament_by_id(&self, id: &str) -> Option<Tournament> {
        self.read().get(id).cloned()
    }

    fn active_by_code(&self, access_code: &str) -> Option<Tournament> {
        self.read()
            .values()
            .filter(|t| !t.is_finalized && t.access_code == access_code)
            .max_by_key(|t| t.created_at)
            .cloned()
    }

    fn active_tournament(&self) -> Option<Tournament> {
        self.read()
            .values()
            .filter(|t| !t.is_finalized)
            .max_by_key(|t| t.created_at)
            .cloned()
    }

    fn finalized_tournaments(&self) -> Vec<Tournament> {
        let mut finalized: Vec<Tournament> = self
            .read()
            .values()
            .filter(|t| t.is_finalized)
            .cloned()
            .collect();
        finalized.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        finalized
    }

    fn delete_tournament(&self, id: &str) -> Result<(), TournamentError> {
        match self.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(TournamentError::TournamentNotFound),
        }
    }
}
