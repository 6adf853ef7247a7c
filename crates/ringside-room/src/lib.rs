//! Queue, role, and rotation logic for Ringside rooms.
//!
//! A room keeps an ordered roster of participants. The two at the front
//! play; everyone else watches. When both front players flag ready, every
//! participant is told its role. When a match ends, counters are updated
//! and the roster is rotated according to the room's policy.
//!
//! # Key types
//!
//! - [`RoomController`] — the synchronous state machine for one room
//! - [`Roster`] / [`Seat`] — the ordered queue and its two playing seats
//! - [`ReadyBarrier`] — gates role assignment behind both players' ready flags
//! - [`assign_roles`], [`record_match`], [`rotate`] — the pure building blocks
//! - [`RoomManager`] / [`RoomHandle`] — rooms as Tokio actors
//! - [`RoomConfig`] — rotation policy and capacity

mod barrier;
mod config;
mod controller;
mod error;
mod manager;
mod results;
mod roles;
mod room;
mod roster;
mod rotation;

pub use barrier::ReadyBarrier;
pub use config::RoomConfig;
pub use controller::RoomController;
pub use error::{DeliveryFailure, RoomError};
pub use manager::RoomManager;
pub use results::{MatchOutcome, record_match};
pub use roles::assign_roles;
pub use room::{Dispatch, ParticipantSender, RoomHandle, RoomInfo};
pub use roster::{Roster, Seat};
pub use rotation::{rotate, seat_to_move};
