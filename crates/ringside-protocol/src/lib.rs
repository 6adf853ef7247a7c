//! Wire-visible types for Ringside.
//!
//! This crate defines what a room hears from its participants and what it
//! says back:
//!
//! - **Types** ([`Command`], [`RoleCommand`], [`Participant`],
//!   [`RoomSnapshot`], etc.) — the shapes exchanged with the transport and
//!   state-replication collaborators.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those shapes are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! The protocol layer knows nothing about queues or rotation. It only
//! describes messages.
//!
//! ```text
//! Transport (bytes) → Protocol (Command) → Room (roster, roles, rotation)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Command, ConnectionId, JoinOptions, Participant, PlayerStatus,
    RoleCommand, RoomId, RoomSnapshot, RotationPolicy,
};
