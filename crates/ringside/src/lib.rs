//! # Ringside
//!
//! Matchmaking rooms for two-player games hosted by one of the players,
//! with everyone else queuing up and watching.
//!
//! A room keeps its participants in a queue. The front two play, the
//! first of them hosting. Once both flag ready, everyone is told whether
//! to host, join, or spectate. When the match ends, the room records it
//! and rotates the queue: winner stays, loser stays, or a coin flip.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ringside::prelude::*;
//!
//! # async fn demo() -> Result<(), RingsideError> {
//! let gateway = Gateway::new(JsonCodec);
//! let room = gateway.create_room(br#"{"rotation":"loser-stays"}"#).await?;
//!
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! gateway
//!     .join(ConnectionId(1), room, br#"{"address":"10.0.0.1:7000"}"#, tx)
//!     .await?;
//! gateway
//!     .receive(ConnectionId(1), br#"{"kind":"ready","ready":true}"#)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod gateway;

pub use error::RingsideError;
pub use gateway::Gateway;

pub mod prelude {
    pub use crate::{Gateway, RingsideError};
    pub use ringside_protocol::{
        Codec, Command, ConnectionId, JoinOptions, JsonCodec, Participant,
        PlayerStatus, RoleCommand, RoomId, RoomSnapshot, RotationPolicy,
    };
    pub use ringside_room::{
        Dispatch, ParticipantSender, RoomConfig, RoomController, RoomError,
        RoomManager,
    };
}
