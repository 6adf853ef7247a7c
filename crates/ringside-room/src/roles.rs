//! Role assignment by queue position.

use ringside_protocol::{ConnectionId, RoleCommand};

use crate::Roster;

/// Maps every participant to the role its position earns.
///
/// Position 0 hosts, position 1 joins the host, everyone else spectates
/// the host. The result is in roster order with exactly one entry per
/// participant; an empty roster yields nothing.
pub fn assign_roles(roster: &Roster) -> Vec<(ConnectionId, RoleCommand)> {
    let Some(host) = roster.as_slice().first() else {
        return Vec::new();
    };
    let address = &host.address;

    roster
        .iter()
        .enumerate()
        .map(|(position, participant)| {
            let command = match position {
                0 => RoleCommand::Host,
                1 => RoleCommand::Join {
                    address: address.clone(),
                },
                _ => RoleCommand::Spectate {
                    address: address.clone(),
                },
            };
            (participant.id, command)
        })
        .collect()
}
