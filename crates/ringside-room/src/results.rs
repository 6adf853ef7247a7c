//! Match results: counters first, rotation second.

use rand::Rng;
use ringside_protocol::{ConnectionId, RotationPolicy};

use crate::rotation::rotate;
use crate::{RoomError, Roster, Seat};

/// What a recorded match did to the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: ConnectionId,
    pub loser: ConnectionId,
}

/// Records a match-end report and rotates the roster.
///
/// `winner` is 1-indexed: 1 means the host won, 2 the challenger. Both
/// players get a match, the winner gets a win, both have their ready
/// flag cleared for the next round, and only then is the roster rotated,
/// so the counters always land on the pre-rotation seats.
///
/// # Errors
/// - [`RoomError::InvalidResult`] if `winner` is not 1 or 2.
/// - [`RoomError::NotEnoughPlayers`] if the roster has fewer than two
///   participants.
///
/// Nothing is mutated on error.
pub fn record_match<R: Rng + ?Sized>(
    roster: &mut Roster,
    winner: i64,
    policy: RotationPolicy,
    rng: &mut R,
) -> Result<MatchOutcome, RoomError> {
    let winner_seat =
        Seat::from_winner(winner).ok_or(RoomError::InvalidResult(winner))?;
    let (host, challenger) = roster
        .front_pair()
        .ok_or(RoomError::NotEnoughPlayers(roster.len()))?;

    for seat in [Seat::Host, Seat::Challenger] {
        if let Some(player) = roster.seat_mut(seat) {
            player.matches += 1;
            player.ready = false;
        }
    }
    if let Some(player) = roster.seat_mut(winner_seat) {
        player.wins += 1;
    }

    roster.reorder(|order| rotate(policy, order, winner_seat, rng));

    let outcome = match winner_seat {
        Seat::Host => MatchOutcome {
            winner: host,
            loser: challenger,
        },
        Seat::Challenger => MatchOutcome {
            winner: challenger,
            loser: host,
        },
    };
    Ok(outcome)
}
