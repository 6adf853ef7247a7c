//! Rotation: who goes to the back of the queue after a match.
//!
//! Every policy moves exactly one of the two players to the end of the
//! roster and leaves everyone else in their relative order. Whoever stays
//! ends up at the front, and the next participant in line slides into the
//! challenger seat.

use rand::Rng;
use ringside_protocol::RotationPolicy;

use crate::Seat;

/// Picks the seat whose occupant goes to the back of the queue.
///
/// Only [`RotationPolicy::Random`] consumes randomness.
pub fn seat_to_move<R: Rng + ?Sized>(
    policy: RotationPolicy,
    winner: Seat,
    rng: &mut R,
) -> Seat {
    match policy {
        RotationPolicy::WinnerStays => winner.other(),
        RotationPolicy::LoserStays => winner,
        RotationPolicy::Random => {
            if rng.random_bool(0.5) {
                Seat::Host
            } else {
                Seat::Challenger
            }
        }
    }
}

/// Computes the next queue order from the current one.
///
/// Rosters shorter than two come back unchanged; there is no match to
/// rotate after. For exactly two, the moved player just swaps to the back.
pub fn rotate<T, R: Rng + ?Sized>(
    policy: RotationPolicy,
    mut roster: Vec<T>,
    winner: Seat,
    rng: &mut R,
) -> Vec<T> {
    if roster.len() < 2 {
        return roster;
    }
    let seat = seat_to_move(policy, winner, rng);
    let moved = roster.remove(seat.index());
    roster.push(moved);
    roster
}
