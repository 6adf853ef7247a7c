//! Unified error type for Ringside.

use ringside_protocol::ProtocolError;
use ringside_room::RoomError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` conversions let `?` lift protocol and room errors into
/// this type.
#[derive(Debug, thiserror::Error)]
pub enum RingsideError {
    /// A frame could not be decoded or a reply could not be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The room rejected the operation.
    #[error(transparent)]
    Room(#[from] RoomError),
}
