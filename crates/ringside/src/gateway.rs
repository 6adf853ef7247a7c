//! The gateway: where raw frames from the transport meet the rooms.
//!
//! The transport and session layers are someone else's job. They hand the
//! gateway a connection id plus bytes (room options, join metadata, or a
//! command frame) and get back either a routing result or an error to
//! report to that one connection. Role commands reach connections through
//! the [`ParticipantSender`] each connection registers on join; the
//! transport turns them into bytes with [`Gateway::encode`].

use ringside_protocol::{
    Codec, Command, ConnectionId, JoinOptions, RoleCommand, RoomId,
    RoomSnapshot,
};
use ringside_room::{Dispatch, ParticipantSender, RoomConfig, RoomManager};
use tokio::sync::Mutex;

use crate::RingsideError;

/// Decodes inbound frames and routes them to the right room.
pub struct Gateway<C: Codec> {
    rooms: Mutex<RoomManager>,
    codec: C,
}

impl<C: Codec> Gateway<C> {
    /// Creates a gateway with no rooms.
    pub fn new(codec: C) -> Self {
        Self {
            rooms: Mutex::new(RoomManager::new()),
            codec,
        }
    }

    /// Creates a room from encoded creation options.
    ///
    /// Empty `options` means the default [`RoomConfig`].
    pub async fn create_room(
        &self,
        options: &[u8],
    ) -> Result<RoomId, RingsideError> {
        let config: RoomConfig = if options.is_empty() {
            RoomConfig::default()
        } else {
            self.codec.decode(options)?
        };
        Ok(self.rooms.lock().await.create_room(config))
    }

    /// Joins a connection to a room with encoded join metadata.
    ///
    /// Empty `metadata` means no address.
    pub async fn join(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        metadata: &[u8],
        sender: ParticipantSender,
    ) -> Result<(), RingsideError> {
        let options: JoinOptions = if metadata.is_empty() {
            JoinOptions::default()
        } else {
            self.codec.decode(metadata)?
        };
        self.rooms
            .lock()
            .await
            .join_room(connection_id, room_id, options, sender)
            .await?;
        Ok(())
    }

    /// Decodes one command frame from a connection and routes it.
    pub async fn receive(
        &self,
        connection_id: ConnectionId,
        frame: &[u8],
    ) -> Result<Dispatch, RingsideError> {
        let command: Command = match self.codec.decode(frame) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(
                    %connection_id,
                    error = %e,
                    "failed to decode command"
                );
                return Err(e.into());
            }
        };

        let dispatch = self
            .rooms
            .lock()
            .await
            .route_command(connection_id, command)
            .await?;
        Ok(dispatch)
    }

    /// Removes a connection from its room.
    pub async fn leave(
        &self,
        connection_id: ConnectionId,
    ) -> Result<(), RingsideError> {
        self.rooms.lock().await.leave_room(connection_id).await?;
        Ok(())
    }

    /// Returns a room's observable state, for the replication layer.
    pub async fn snapshot(
        &self,
        room_id: RoomId,
    ) -> Result<RoomSnapshot, RingsideError> {
        Ok(self.rooms.lock().await.snapshot(room_id).await?)
    }

    /// Encodes a role command for the wire.
    pub fn encode(
        &self,
        command: &RoleCommand,
    ) -> Result<Vec<u8>, RingsideError> {
        Ok(self.codec.encode(command)?)
    }

    /// Encodes a room snapshot for the wire.
    pub fn encode_snapshot(
        &self,
        snapshot: &RoomSnapshot,
    ) -> Result<Vec<u8>, RingsideError> {
        Ok(self.codec.encode(snapshot)?)
    }
}
