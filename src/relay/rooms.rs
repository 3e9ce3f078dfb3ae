//! Room/snapshot registry: a dumb fan-out pipe keyed by tournament id.

use crate::models::{Tournament, TournamentId};
use crate::relay::protocol::{ClientEvent, ScoreToast, ScoreUpdate, ServerEvent};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Relay-side connection identifier.
pub type ConnId = Uuid;

/// Process-scoped relay state: constructed once at service startup, handed
/// by reference into every connection handler, gone at shutdown. Holds no
/// durable state; snapshots are retained in memory for the life of the
/// process and independently reconciled against storage by each client.
///
/// The relay does not validate snapshots beyond non-empty `id`/`accessCode`
/// and resolves nothing: whichever client publishes last wins.
#[derive(Default)]
pub struct Relay {
    connections: HashMap<ConnId, UnboundedSender<ServerEvent>>,
    rooms: HashMap<TournamentId, HashSet<ConnId>>,
    /// Last published snapshot per access code.
    snapshots: HashMap<String, Tournament>,
    code_by_id: HashMap<TournamentId, String>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection; `tx` is its outbound event queue.
    /// A fresh connection belongs to no room.
    pub fn connect(&mut self, tx: UnboundedSender<ServerEvent>) -> ConnId {
        let conn = Uuid::new_v4();
        self.connections.insert(conn, tx);
        log::debug!("relay: connection {} opened", conn);
        conn
    }

    /// Drop a connection from the registry and all room memberships.
    /// Stored snapshots are deliberately retained.
    pub fn disconnect(&mut self, conn: ConnId) {
        self.connections.remove(&conn);
        for members in self.rooms.values_mut() {
            members.remove(&conn);
        }
        log::debug!("relay: connection {} closed", conn);
    }

    /// Process one inbound event from `conn`.
    pub fn handle(&mut self, conn: ConnId, event: ClientEvent) {
        match event {
            ClientEvent::CreateTournament(tournament) => self.on_create(conn, tournament),
            ClientEvent::JoinTournament(access_code) => self.on_join(conn, &access_code),
            ClientEvent::TournamentUpdate { tournament, update } => {
                self.on_update(conn, tournament, update)
            }
        }
    }

    /// Last snapshot published for this access code, if any.
    pub fn snapshot_by_code(&self, access_code: &str) -> Option<&Tournament> {
        self.snapshots.get(access_code)
    }

    fn on_create(&mut self, conn: ConnId, tournament: Tournament) {
        if tournament.id.is_empty() || tournament.access_code.is_empty() {
            return;
        }
        let room = tournament.id.clone();
        self.code_by_id
            .insert(room.clone(), tournament.access_code.clone());
        self.rooms.entry(room.clone()).or_default().insert(conn);
        self.snapshots
            .insert(tournament.access_code.clone(), tournament.clone());
        // Rebroadcast to the whole room so the creator's other tabs sync too.
        self.broadcast(&room, &ServerEvent::TournamentSync(tournament));
    }

    fn on_join(&mut self, conn: ConnId, access_code: &str) {
        let Some(tournament) = self.snapshots.get(access_code) else {
            // No error event on the wire; the client retries or times out.
            log::debug!("relay: join with unknown access code dropped");
            return;
        };
        let room = tournament.id.clone();
        let snapshot = tournament.clone();
        self.rooms.entry(room).or_default().insert(conn);
        self.send_to(conn, &ServerEvent::TournamentSync(snapshot));
    }

    fn on_update(&mut self, conn: ConnId, tournament: Tournament, update: Option<ScoreUpdate>) {
        if tournament.id.is_empty() || tournament.access_code.is_empty() {
            return;
        }
        let room = tournament.id.clone();
        self.snapshots
            .insert(tournament.access_code.clone(), tournament.clone());
        self.code_by_id
            .insert(room.clone(), tournament.access_code.clone());
        // Full snapshot to every room member, the sender included; clients
        // must tolerate their own echo.
        self.broadcast(&room, &ServerEvent::TournamentSync(tournament));

        if let Some(u) = update {
            let toast = ScoreToast {
                match_id: u.match_id,
                round: u.round,
                score_a: u.score_a,
                score_b: u.score_b,
                ts: Utc::now().timestamp_millis(),
            };
            self.broadcast_except(&room, conn, &ServerEvent::ToastScore(toast));
        }
    }

    fn broadcast(&self, room: &str, event: &ServerEvent) {
        let Some(members) = self.rooms.get(room) else {
            return;
        };
        for &member in members {
            self.send_to(member, event);
        }
    }

    fn broadcast_except(&self, room: &str, except: ConnId, event: &ServerEvent) {
        let Some(members) = self.rooms.get(room) else {
            return;
        };
        for &member in members {
            if member != except {
                self.send_to(member, event);
            }
        }
    }

    fn send_to(&self, conn: ConnId, event: &ServerEvent) {
        if let Some(tx) = self.connections.get(&conn) {
            // A closed receiver just means the connection task is winding
            // down; disconnect() will prune it.
            let _ = tx.send(event.clone());
        }
    }
}
