//! Real-time sync relay: wire protocol and the room/snapshot registry.

mod protocol;
mod rooms;

pub use protocol::{ClientEvent, ScoreToast, ScoreUpdate, ServerEvent};
pub use rooms::{ConnId, Relay};
