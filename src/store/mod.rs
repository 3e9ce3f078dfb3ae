//! Persistence seam. The durable store is an external collaborator; the
//! rest of the system talks to it through `TournamentStore` and only the
//! in-memory implementation ships here.

mod memory;

use crate::models::{Tournament, TournamentError};

/// Snapshot-granularity storage operations.
///
/// Each write persists a whole tournament in one atomic operation; totals
/// and round state are derived in memory before the write, so there is no
/// multi-row read-modify-write to interleave.
pub trait TournamentStore: Send + Sync {
    /// Persist a freshly created tournament (players and matches included).
    fn insert_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError>;

    /// Replace the stored snapshot wholesale. Errors if the id is unknown.
    fn update_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError>;

    fn tournament_by_id(&self, id: &str) -> Option<Tournament>;

    /// Newest unfinalized tournament with this access code.
    fn active_by_code(&self, access_code: &str) -> Option<Tournament>;

    /// The unfinalized tournament, if one exists (newest first on ties).
    fn active_tournament(&self) -> Option<Tournament>;

    /// All finalized tournaments, newest first.
    fn finalized_tournaments(&self) -> Vec<Tournament>;

    /// Hard removal, cascading to the tournament's players and matches.
    fn delete_tournament(&self, id: &str) -> Result<(), TournamentError>;
}

pub use memory::MemoryStore;
