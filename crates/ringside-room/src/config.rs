//! Room configuration.

use ringside_protocol::RotationPolicy;
use serde::{Deserialize, Serialize};

/// Settings fixed when a room is created.
///
/// Decoded from the room-creation options; any field left out takes its
/// default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// How the roster is reordered after each match.
    pub rotation: RotationPolicy,

    /// Maximum participants on the roster (0 = unlimited).
    pub max_participants: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            rotation: RotationPolicy::WinnerStays,
            max_participants: 16,
        }
    }
}

impl RoomConfig {
    /// Returns `true` if a roster of `count` participants can take one more.
    pub fn has_room_for(&self, count: usize) -> bool {
        self.max_participants == 0 || count < self.max_participants
    }
}
