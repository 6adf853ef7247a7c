//! Core protocol types for Ringside.
//!
//! Everything here either arrives from a participant ([`Command`],
//! [`JoinOptions`]), goes out to one ([`RoleCommand`]), or is handed to
//! the state-replication collaborator for display ([`RoomSnapshot`]).

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifier of a participant's live connection.
///
/// Supplied by the transport collaborator. It is unique within a room for
/// as long as the connection lives, and doubles as the participant's id.
///
/// `#[serde(transparent)]` keeps it a plain number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// A unique identifier for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Participant status & rotation policy
// ---------------------------------------------------------------------------

/// What a participant says it is currently doing.
///
/// Only ever set from a participant's own `status` report; the room never
/// derives it. The upper-case aliases are accepted for older clients.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    #[default]
    #[serde(alias = "IDLE")]
    Idle,
    #[serde(alias = "PLAYING")]
    Playing,
    #[serde(alias = "SPECTATING")]
    Spectating,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Playing => write!(f, "playing"),
            Self::Spectating => write!(f, "spectating"),
        }
    }
}

/// How the roster is reordered after a match ends.
///
/// Chosen once at room creation. The upper-case names (`WINNER`,
/// `LOOSER`, `RANDOM`) are accepted as aliases.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum RotationPolicy {
    /// The loser goes to the back of the queue; the winner hosts again.
    #[default]
    #[serde(alias = "WINNER")]
    WinnerStays,

    /// The winner goes to the back of the queue; the loser stays on.
    #[serde(alias = "LOOSER", alias = "LOSER")]
    LoserStays,

    /// A coin flip decides which of the two players goes to the back.
    #[serde(alias = "RANDOM")]
    Random,
}

impl fmt::Display for RotationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WinnerStays => write!(f, "winner-stays"),
            Self::LoserStays => write!(f, "loser-stays"),
            Self::Random => write!(f, "random"),
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// Metadata a participant supplies when joining a room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinOptions {
    /// Address other participants use to reach this one directly when it
    /// hosts. Opaque to the room; missing means empty.
    #[serde(default)]
    pub address: String,
}

/// A command sent by a participant to its room.
///
/// Internally tagged on `kind`:
///
/// ```text
/// { "kind": "ready", "ready": true }
/// { "kind": "status", "status": "playing" }
/// { "kind": "matchEnd", "winner": 1 }
/// ```
///
/// Any other `kind` decodes to [`Command::Unknown`] instead of failing, so
/// newer clients can't knock older rooms over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Command {
    /// Set or clear the sender's ready flag.
    Ready { ready: bool },

    /// Report what the sender is doing.
    Status { status: PlayerStatus },

    /// Report the result of the match that was just played.
    ///
    /// `winner` is 1-indexed: 1 is the host, 2 the challenger. It is
    /// signed so that every integer reaches the room's own validation
    /// instead of failing at decode time.
    MatchEnd { winner: i64 },

    /// A command kind this room doesn't understand.
    #[serde(other)]
    Unknown,
}

impl Command {
    /// Short name of the command, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "ready",
            Self::Status { .. } => "status",
            Self::MatchEnd { .. } => "matchEnd",
            Self::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// The role a participant should take for the next match.
///
/// Internally tagged on `role`:
///
/// ```text
/// { "role": "host" }
/// { "role": "join", "address": "10.0.0.1:7000" }
/// { "role": "spectate", "address": "10.0.0.1:7000" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleCommand {
    /// Host the match. Everyone else connects to you.
    Host,
    /// Connect to the host at `address` and play.
    Join { address: String },
    /// Connect to the host at `address` and watch.
    Spectate { address: String },
}

// ---------------------------------------------------------------------------
// Replicated state
// ---------------------------------------------------------------------------

/// One entry in a room's roster, as observers see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ConnectionId,
    pub address: String,
    pub wins: u32,
    pub matches: u32,
    pub ready: bool,
    pub status: PlayerStatus,
}

impl Participant {
    /// A freshly joined participant: no matches, not ready, idle.
    pub fn new(id: ConnectionId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            wins: 0,
            matches: 0,
            ready: false,
            status: PlayerStatus::Idle,
        }
    }
}

/// Everything about a room that observers are allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// The roster, front of the queue first.
    pub participants: Vec<Participant>,
    pub rotation: RotationPolicy,
    /// Whoever joined the room first. Display only.
    pub creator: Option<ConnectionId>,
}

// =========================================================================
// Tests
// =========================================================================
