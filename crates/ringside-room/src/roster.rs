//! The roster: a room's ordered queue of participants.
//!
//! Position decides role. The participant at the front hosts, the one
//! behind it challenges, and everyone further back watches and waits.

use ringside_protocol::{ConnectionId, Participant};

/// One of the two front-of-queue positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    /// Position 0.
    Host,
    /// Position 1.
    Challenger,
}

impl Seat {
    /// Maps a 1-indexed match-end `winner` to the seat that won.
    ///
    /// `1` is the host and `2` the challenger; anything else is `None`.
    pub fn from_winner(winner: i64) -> Option<Self> {
        match winner {
            1 => Some(Self::Host),
            2 => Some(Self::Challenger),
            _ => None,
        }
    }

    /// Zero-based roster position of this seat.
    pub fn index(self) -> usize {
        match self {
            Self::Host => 0,
            Self::Challenger => 1,
        }
    }

    /// The opposing seat.
    pub fn other(self) -> Self {
        match self {
            Self::Host => Self::Challenger,
            Self::Challenger => Self::Host,
        }
    }
}

/// Ordered sequence of participants with unique connection ids.
///
/// Arrival order until the first match ends, rotation order after that.
/// The roster only stores; deciding who moves where is up to the
/// rotation and match-result code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants, front of the queue first.
    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Connection ids in queue order.
    pub fn order(&self) -> Vec<ConnectionId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.position(id).is_some()
    }

    /// Current queue position of `id`, if present.
    pub fn position(&self, id: ConnectionId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// The participant currently in `seat`, if the roster reaches that far.
    pub fn seat(&self, seat: Seat) -> Option<&Participant> {
        self.participants.get(seat.index())
    }

    pub fn seat_mut(&mut self, seat: Seat) -> Option<&mut Participant> {
        self.participants.get_mut(seat.index())
    }

    /// Ids of the host and challenger, if both seats are filled.
    pub fn front_pair(&self) -> Option<(ConnectionId, ConnectionId)> {
        match self.participants.as_slice() {
            [host, challenger, ..] => Some((host.id, challenger.id)),
            _ => None,
        }
    }

    /// Appends a participant to the back of the queue.
    ///
    /// Returns `false` and leaves the roster alone if a participant with
    /// the same id is already present.
    pub fn push(&mut self, participant: Participant) -> bool {
        if self.contains(participant.id) {
            return false;
        }
        self.participants.push(participant);
        true
    }

    /// Removes a participant, keeping everyone else in their relative order.
    pub fn remove(&mut self, id: ConnectionId) -> Option<Participant> {
        let index = self.position(id)?;
        Some(self.participants.remove(index))
    }

    /// Replaces the queue with whatever `reorder` makes of it.
    pub(crate) fn reorder(
        &mut self,
        reorder: impl FnOnce(Vec<Participant>) -> Vec<Participant>,
    ) {
        let current = std::mem::take(&mut self.participants);
        self.participants = reorder(current);
    }
}
