//! The room controller: one room's roster, barrier, and rotation in one
//! place, driven by join, message, and leave events.
//!
//! The controller is synchronous and does no I/O. It decides; whoever owns
//! it (normally the room actor in [`crate::room`]) delivers. Each handler
//! returns the role commands that need sending, if any.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ringside_protocol::{
    Command, ConnectionId, JoinOptions, Participant, PlayerStatus,
    RoleCommand, RoomId, RoomSnapshot,
};

use crate::results::record_match;
use crate::roles::assign_roles;
use crate::{ReadyBarrier, RoomConfig, RoomError, Roster};

/// Owns everything one room knows about its participants.
pub struct RoomController<R = StdRng> {
    room_id: RoomId,
    config: RoomConfig,
    roster: Roster,
    barrier: ReadyBarrier,
    creator: Option<ConnectionId>,
    rng: R,
}

impl RoomController<StdRng> {
    /// Creates a controller for an empty room, seeding its coin flips
    /// from the OS.
    pub fn new(room_id: RoomId, config: RoomConfig) -> Self {
        Self::with_rng(room_id, config, StdRng::from_os_rng())
    }
}

impl<R: Rng> RoomController<R> {
    /// Creates a controller that draws random rotations from `rng`.
    pub fn with_rng(room_id: RoomId, config: RoomConfig, rng: R) -> Self {
        Self {
            room_id,
            config,
            roster: Roster::new(),
            barrier: ReadyBarrier::new(),
            creator: None,
            rng,
        }
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The first participant ever to join, even if it has since left.
    pub fn creator(&self) -> Option<ConnectionId> {
        self.creator
    }

    /// The observable state of the room.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            participants: self.roster.as_slice().to_vec(),
            rotation: self.config.rotation,
            creator: self.creator,
        }
    }

    /// Appends a newly connected participant to the back of the queue.
    ///
    /// Never assigns roles by itself.
    pub fn on_join(
        &mut self,
        connection_id: ConnectionId,
        options: JoinOptions,
    ) -> Result<(), RoomError> {
        if self.roster.contains(connection_id) {
            return Err(RoomError::AlreadyInRoom(connection_id, self.room_id));
        }
        if !self.config.has_room_for(self.roster.len()) {
            return Err(RoomError::RoomFull(self.room_id));
        }

        self.roster
            .push(Participant::new(connection_id, options.address));
        if self.creator.is_none() {
            self.creator = Some(connection_id);
        }

        tracing::info!(
            room_id = %self.room_id,
            %connection_id,
            position = self.roster.len() - 1,
            "participant joined"
        );
        Ok(())
    }

    /// Handles one command from a participant.
    ///
    /// Returns the role commands to deliver. That list is empty unless this
    /// command satisfied the ready barrier.
    ///
    /// # Errors
    /// - [`RoomError::UnknownSender`] if `connection_id` isn't on the roster.
    /// - [`RoomError::InvalidResult`] / [`RoomError::NotEnoughPlayers`] for
    ///   a rejected match-end report.
    pub fn on_message(
        &mut self,
        connection_id: ConnectionId,
        command: Command,
    ) -> Result<Vec<(ConnectionId, RoleCommand)>, RoomError> {
        if !self.roster.contains(connection_id) {
            return Err(RoomError::UnknownSender(connection_id));
        }

        match command {
            Command::Ready { ready } => self.handle_ready(connection_id, ready),
            Command::Status { status } => {
                self.handle_status(connection_id, status);
                Ok(Vec::new())
            }
            Command::MatchEnd { winner } => {
                self.handle_match_end(connection_id, winner)?;
                Ok(Vec::new())
            }
            Command::Unknown => {
                tracing::debug!(
                    room_id = %self.room_id,
                    %connection_id,
                    "ignoring unrecognized command"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Removes a participant. Everyone behind it moves up one place; no
    /// rotation and no role assignment happen.
    pub fn on_leave(
        &mut self,
        connection_id: ConnectionId,
    ) -> Result<Participant, RoomError> {
        let participant = self
            .roster
            .remove(connection_id)
            .ok_or(RoomError::NotInRoom(connection_id, self.room_id))?;

        tracing::info!(
            room_id = %self.room_id,
            %connection_id,
            remaining = self.roster.len(),
            "participant left"
        );
        Ok(participant)
    }

    fn handle_ready(
        &mut self,
        connection_id: ConnectionId,
        ready: bool,
    ) -> Result<Vec<(ConnectionId, RoleCommand)>, RoomError> {
        let fire = self.barrier.update(&mut self.roster, connection_id, ready)?;
        tracing::debug!(
            room_id = %self.room_id,
            %connection_id,
            ready,
            "ready flag updated"
        );
        if !fire {
            return Ok(Vec::new());
        }

        let roles = assign_roles(&self.roster);
        tracing::info!(
            room_id = %self.room_id,
            participants = roles.len(),
            "both players ready, roles assigned"
        );
        Ok(roles)
    }

    fn handle_status(&mut self, connection_id: ConnectionId, status: PlayerStatus) {
        if let Some(participant) = self.roster.get_mut(connection_id) {
            participant.status = status;
        }
    }

    fn handle_match_end(
        &mut self,
        connection_id: ConnectionId,
        winner: i64,
    ) -> Result<(), RoomError> {
        let outcome = match record_match(
            &mut self.roster,
            winner,
            self.config.rotation,
            &mut self.rng,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(
                    room_id = %self.room_id,
                    reporter = %connection_id,
                    error = %e,
                    "match result rejected"
                );
                return Err(e);
            }
        };
        self.barrier.reset();

        tracing::info!(
            room_id = %self.room_id,
            winner = %outcome.winner,
            loser = %outcome.loser,
            rotation = %self.config.rotation,
            "match recorded"
        );
        Ok(())
    }
}
