//! Room manager: creates rooms, tracks which connection is in which, and
//! routes commands to the right room actor.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use ringside_protocol::{Command, ConnectionId, JoinOptions, RoomId, RoomSnapshot};

use crate::room::spawn_room;
use crate::{Dispatch, ParticipantSender, RoomConfig, RoomError, RoomHandle, RoomInfo};

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Manages all active rooms.
///
/// A connection can be in at most one room at a time.
pub struct RoomManager {
    rooms: HashMap<RoomId, RoomHandle>,
    connection_rooms: HashMap<ConnectionId, RoomId>,
}

impl RoomManager {
    /// Creates a new, empty room manager.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            connection_rooms: HashMap::new(),
        }
    }

    /// Creates a new room and returns its ID.
    pub fn create_room(&mut self, config: RoomConfig) -> RoomId {
        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let rotation = config.rotation;
        let handle = spawn_room(room_id, config, DEFAULT_CHANNEL_SIZE);
        self.rooms.insert(room_id, handle);
        tracing::info!(%room_id, %rotation, "room created");
        room_id
    }

    /// Adds a connection to a room's queue.
    pub async fn join_room(
        &mut self,
        connection_id: ConnectionId,
        room_id: RoomId,
        options: JoinOptions,
        sender: ParticipantSender,
    ) -> Result<(), RoomError> {
        if let Some(current) = self.connection_rooms.get(&connection_id) {
            return Err(RoomError::AlreadyInRoom(connection_id, *current));
        }

        let handle = self
            .rooms
            .get(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;

        handle.join(connection_id, options, sender).await?;
        self.connection_rooms.insert(connection_id, room_id);
        Ok(())
    }

    /// Removes a connection from whatever room it is in.
    pub async fn leave_room(
        &mut self,
        connection_id: ConnectionId,
    ) -> Result<(), RoomError> {
        let room_id = self
            .connection_rooms
            .remove(&connection_id)
            .ok_or(RoomError::UnknownSender(connection_id))?;

        if let Some(handle) = self.rooms.get(&room_id) {
            handle.leave(connection_id).await?;
        }
        Ok(())
    }

    /// Routes a command from a connection to its room.
    ///
    /// # Errors
    /// [`RoomError::UnknownSender`] if the connection isn't in any room,
    /// otherwise whatever the room rejected the command with.
    pub async fn route_command(
        &self,
        connection_id: ConnectionId,
        command: Command,
    ) -> Result<Dispatch, RoomError> {
        let room_id = self
            .connection_rooms
            .get(&connection_id)
            .ok_or(RoomError::UnknownSender(connection_id))?;

        let handle = self
            .rooms
            .get(room_id)
            .ok_or(RoomError::NotFound(*room_id))?;

        handle.send_command(connection_id, command).await
    }

    pub async fn get_room_info(
        &self,
        room_id: RoomId,
    ) -> Result<RoomInfo, RoomError> {
        self.handle(room_id)?.get_info().await
    }

    /// Returns a room's observable state.
    pub async fn snapshot(
        &self,
        room_id: RoomId,
    ) -> Result<RoomSnapshot, RoomError> {
        self.handle(room_id)?.snapshot().await
    }

    /// Shuts down a room and forgets every connection that was in it.
    pub async fn destroy_room(
        &mut self,
        room_id: RoomId,
    ) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .remove(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;

        let _ = handle.shutdown().await;
        self.connection_rooms.retain(|_, rid| *rid != room_id);

        tracing::info!(%room_id, "room destroyed");
        Ok(())
    }

    /// Returns the room a connection is currently in, if any.
    pub fn room_of(&self, connection_id: ConnectionId) -> Option<RoomId> {
        self.connection_rooms.get(&connection_id).copied()
    }

    /// Lists rooms that still have free slots.
    ///
    /// Rooms that fail to respond (e.g., shutting down) are skipped.
    pub async fn list_rooms(&self) -> Vec<RoomInfo> {
        let mut infos = Vec::with_capacity(self.rooms.len());
        for handle in self.rooms.values() {
            if let Ok(info) = handle.get_info().await {
                if info.is_joinable() {
                    infos.push(info);
                }
            }
        }
        infos.sort_by_key(|info| info.room_id.0);
        infos
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }

    fn handle(&self, room_id: RoomId) -> Result<&RoomHandle, RoomError> {
        self.rooms.get(&room_id).ok_or(RoomError::NotFound(room_id))
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
