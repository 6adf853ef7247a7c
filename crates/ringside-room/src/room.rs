//! Room actor: an isolated Tokio task that owns one [`RoomController`].
//!
//! Each room runs in its own task and handles one command at a time from
//! its channel, so the roster never needs a lock. Role commands go out
//! through per-participant unbounded channels; a send never waits, and a
//! dead connection only fails its own delivery.

use std::collections::HashMap;

use ringside_protocol::{
    Command, ConnectionId, JoinOptions, RoleCommand, RoomId, RoomSnapshot,
    RotationPolicy,
};
use tokio::sync::{mpsc, oneshot};

use crate::{DeliveryFailure, RoomConfig, RoomController, RoomError};

/// Channel sender for delivering role commands to one participant.
pub type ParticipantSender = mpsc::UnboundedSender<RoleCommand>;

/// Result of delivering role commands after one inbound command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Connections that were handed their role command.
    pub delivered: Vec<ConnectionId>,
    /// One entry per participant whose connection was gone.
    pub failures: Vec<DeliveryFailure>,
}

impl Dispatch {
    /// Returns `true` if no role commands were sent at all.
    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty() && self.failures.is_empty()
    }
}

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    Join {
        connection_id: ConnectionId,
        options: JoinOptions,
        sender: ParticipantSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    Leave {
        connection_id: ConnectionId,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    Message {
        connection_id: ConnectionId,
        command: Command,
        reply: oneshot::Sender<Result<Dispatch, RoomError>>,
    },

    GetInfo {
        reply: oneshot::Sender<RoomInfo>,
    },

    Snapshot {
        reply: oneshot::Sender<RoomSnapshot>,
    },

    Shutdown,
}

/// A summary of a room (not its roster).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub participant_count: usize,
    /// 0 means unlimited.
    pub max_participants: usize,
    pub rotation: RotationPolicy,
}

impl RoomInfo {
    /// Returns `true` if another participant could join right now.
    pub fn is_joinable(&self) -> bool {
        self.max_participants == 0
            || self.participant_count < self.max_participants
    }
}

/// Handle to a running room actor.
///
/// Cheap to clone; it's just an `mpsc::Sender` wrapper.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Adds a participant to the back of the room's queue.
    pub async fn join(
        &self,
        connection_id: ConnectionId,
        options: JoinOptions,
        sender: ParticipantSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            RoomCommand::Join {
                connection_id,
                options,
                sender,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await?
    }

    /// Removes a participant from the room.
    pub async fn leave(
        &self,
        connection_id: ConnectionId,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            RoomCommand::Leave {
                connection_id,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await?
    }

    /// Delivers a participant's command and waits for the room's verdict.
    ///
    /// The returned [`Dispatch`] lists which role commands went out, if the
    /// command triggered role assignment.
    pub async fn send_command(
        &self,
        connection_id: ConnectionId,
        command: Command,
    ) -> Result<Dispatch, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            RoomCommand::Message {
                connection_id,
                command,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await?
    }

    pub async fn get_info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(RoomCommand::GetInfo { reply: reply_tx }, reply_rx)
            .await
    }

    /// Requests the room's observable state.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(RoomCommand::Snapshot { reply: reply_tx }, reply_rx)
            .await
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    async fn request<T>(
        &self,
        command: RoomCommand,
        reply: oneshot::Receiver<T>,
    ) -> Result<T, RoomError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply.await.map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    controller: RoomController,
    senders: HashMap<ConnectionId, ParticipantSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        let room_id = self.controller.room_id();
        tracing::info!(%room_id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    connection_id,
                    options,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(connection_id, options, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave {
                    connection_id,
                    reply,
                } => {
                    let result = self.handle_leave(connection_id);
                    let _ = reply.send(result);
                }
                RoomCommand::Message {
                    connection_id,
                    command,
                    reply,
                } => {
                    let result = self.handle_message(connection_id, command);
                    let _ = reply.send(result);
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Snapshot { reply } => {
                    let _ = reply.send(self.controller.snapshot());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(%room_id, "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(%room_id, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        connection_id: ConnectionId,
        options: JoinOptions,
        sender: ParticipantSender,
    ) -> Result<(), RoomError> {
        self.controller.on_join(connection_id, options)?;
        self.senders.insert(connection_id, sender);
        Ok(())
    }

    fn handle_leave(
        &mut self,
        connection_id: ConnectionId,
    ) -> Result<(), RoomError> {
        self.controller.on_leave(connection_id)?;
        self.senders.remove(&connection_id);
        Ok(())
    }

    fn handle_message(
        &mut self,
        connection_id: ConnectionId,
        command: Command,
    ) -> Result<Dispatch, RoomError> {
        let kind = command.kind();
        match self.controller.on_message(connection_id, command) {
            Ok(roles) => Ok(self.deliver(roles)),
            Err(e) => {
                tracing::debug!(
                    room_id = %self.controller.room_id(),
                    %connection_id,
                    command = kind,
                    error = %e,
                    "command rejected"
                );
                Err(e)
            }
        }
    }

    /// Hands each role command to its participant's channel.
    ///
    /// Every delivery is attempted; failures are collected, not returned
    /// early.
    fn deliver(&self, roles: Vec<(ConnectionId, RoleCommand)>) -> Dispatch {
        let mut dispatch = Dispatch::default();
        for (connection, command) in roles {
            let sent = match self.senders.get(&connection) {
                Some(sender) => sender.send(command).map_err(|e| e.0),
                None => Err(command),
            };
            match sent {
                Ok(()) => dispatch.delivered.push(connection),
                Err(command) => {
                    tracing::warn!(
                        room_id = %self.controller.room_id(),
                        %connection,
                        "role command not delivered, connection gone"
                    );
                    dispatch
                        .failures
                        .push(DeliveryFailure { connection, command });
                }
            }
        }
        dispatch
    }

    fn info(&self) -> RoomInfo {
        let config = self.controller.config();
        RoomInfo {
            room_id: self.controller.room_id(),
            participant_count: self.controller.roster().len(),
            max_participants: config.max_participants,
            rotation: config.rotation,
        }
    }
}

/// Spawns a new room actor task and returns a handle to communicate with it.
///
/// `channel_size` bounds the command queue; senders wait when it's full.
pub(crate) fn spawn_room(
    room_id: RoomId,
    config: RoomConfig,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        controller: RoomController::new(room_id, config),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
