//! The ready barrier in front of every match.
//!
//! Roles are handed out only once both the host and the challenger have
//! flagged ready. The barrier remembers which pair it last fired for so
//! that an unrelated ready update (a spectator toggling, say) doesn't hand
//! out the same roles again.

use ringside_protocol::ConnectionId;

use crate::{RoomError, Roster};

/// Watches the ready flags of the two front-of-queue participants.
#[derive(Debug, Clone, Default)]
pub struct ReadyBarrier {
    /// Front pair the barrier was satisfied for at its last check.
    fired_for: Option<(ConnectionId, ConnectionId)>,
}

impl ReadyBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `id`'s ready flag, then checks the barrier.
    ///
    /// Returns `Ok(true)` when this update satisfied the barrier and roles
    /// should be assigned.
    ///
    /// # Errors
    /// Returns [`RoomError::UnknownSender`] if `id` isn't on the roster.
    /// Neither the roster nor the barrier changes in that case.
    pub fn update(
        &mut self,
        roster: &mut Roster,
        id: ConnectionId,
        ready: bool,
    ) -> Result<bool, RoomError> {
        let participant =
            roster.get_mut(id).ok_or(RoomError::UnknownSender(id))?;
        participant.ready = ready;
        Ok(self.check(roster))
    }

    /// Re-evaluates the barrier against the current roster.
    ///
    /// Fires (returns `true`) only on a transition into the satisfied
    /// state, or when a different pair has become satisfied since the last
    /// time it fired.
    pub fn check(&mut self, roster: &Roster) -> bool {
        let satisfied = roster
            .front_pair()
            .filter(|&(host, challenger)| {
                is_ready(roster, host) && is_ready(roster, challenger)
            });

        let fire = satisfied.is_some() && satisfied != self.fired_for;
        self.fired_for = satisfied;
        fire
    }

    /// Forgets the last pair, so the next satisfied check fires again.
    pub fn reset(&mut self) {
        self.fired_for = None;
    }

    /// Returns `true` if the barrier is currently satisfied.
    pub fn is_satisfied(&self) -> bool {
        self.fired_for.is_some()
    }
}

fn is_ready(roster: &Roster, id: ConnectionId) -> bool {
    roster.get(id).is_some_and(|p| p.ready)
}
