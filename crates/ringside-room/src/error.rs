//! Error types for the room layer.

use ringside_protocol::{ConnectionId, RoleCommand, RoomId};

/// Errors that can occur during room operations.
///
/// None of these are fatal to the room: the operation that produced one
/// is rejected and every other participant carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room has no free participant slots.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The connection is already in this room.
    #[error("connection {0} already in room {1}")]
    AlreadyInRoom(ConnectionId, RoomId),

    /// The connection is not in this room.
    #[error("connection {0} not in room {1}")]
    NotInRoom(ConnectionId, RoomId),

    /// A command arrived from a connection that isn't on the roster.
    #[error("unknown sender {0}")]
    UnknownSender(ConnectionId),

    /// A match-end report named a winner other than 1 or 2.
    #[error("invalid match result: winner must be 1 or 2, got {0}")]
    InvalidResult(i64),

    /// A match-end report arrived while fewer than two participants
    /// were on the roster.
    #[error("a match needs two players, roster has {0}")]
    NotEnoughPlayers(usize),

    /// The room's command channel is full or closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}

/// A role command that could not be handed to a participant's connection.
///
/// Reported per participant. A failure never rolls back roster state and
/// never stops delivery to anyone else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not deliver {command:?} to {connection}")]
pub struct DeliveryFailure {
    pub connection: ConnectionId,
    pub command: RoleCommand,
}
