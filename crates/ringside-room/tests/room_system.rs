//! Integration tests for rooms running as actors behind a `RoomManager`.

use ringside_protocol::{
    Command, ConnectionId, JoinOptions, PlayerStatus, RoleCommand, RoomId,
    RotationPolicy,
};
use ringside_room::{RoomConfig, RoomError, RoomManager};
use tokio::sync::mpsc;

// =========================================================================
// Helpers
// =========================================================================

fn c(id: u64) -> ConnectionId {
    ConnectionId(id)
}

fn opts(address: &str) -> JoinOptions {
    JoinOptions {
        address: address.into(),
    }
}

fn config(rotation: RotationPolicy) -> RoomConfig {
    RoomConfig {
        rotation,
        ..RoomConfig::default()
    }
}

/// Joins `id` to `room` and returns the receiving end of its connection.
async fn join(
    mgr: &mut RoomManager,
    room: RoomId,
    id: u64,
) -> mpsc::UnboundedReceiver<RoleCommand> {
    let (tx, rx) = mpsc::unbounded_channel();
    mgr.join_room(c(id), room, opts(&format!("10.0.0.{id}:7000")), tx)
        .await
        .unwrap();
    rx
}

async fn ready(mgr: &RoomManager, id: u64) -> ringside_room::Dispatch {
    mgr.route_command(c(id), Command::Ready { ready: true })
        .await
        .unwrap()
}

async fn order(mgr: &RoomManager, room: RoomId) -> Vec<ConnectionId> {
    mgr.snapshot(room)
        .await
        .unwrap()
        .participants
        .iter()
        .map(|p| p.id)
        .collect()
}

// =========================================================================
// RoomManager basics
// =========================================================================

#[tokio::test]
async fn test_create_room_returns_unique_ids() {
    let mut mgr = RoomManager::new();
    let r1 = mgr.create_room(RoomConfig::default());
    let r2 = mgr.create_room(RoomConfig::default());
    assert_ne!(r1, r2);
    assert_eq!(mgr.room_count(), 2);
}

#[tokio::test]
async fn test_join_room_not_found() {
    let mut mgr = RoomManager::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    let result = mgr.join_room(c(1), RoomId(u64::MAX), opts("a"), tx).await;
    assert_eq!(result, Err(RoomError::NotFound(RoomId(u64::MAX))));
}

#[tokio::test]
async fn test_connection_joins_one_room_at_a_time() {
    let mut mgr = RoomManager::new();
    let r1 = mgr.create_room(RoomConfig::default());
    let r2 = mgr.create_room(RoomConfig::default());

    let _rx = join(&mut mgr, r1, 1).await;
    let (tx, _rx2) = mpsc::unbounded_channel();
    let result = mgr.join_room(c(1), r2, opts("a"), tx).await;
    assert_eq!(result, Err(RoomError::AlreadyInRoom(c(1), r1)));
    assert_eq!(mgr.room_of(c(1)), Some(r1));
}

#[tokio::test]
async fn test_join_does_not_assign_roles() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let mut rx1 = join(&mut mgr, room, 1).await;
    let mut rx2 = join(&mut mgr, room, 2).await;

    assert!(rx1.try_recv().is_err());
    assert!(rx2.try_recv().is_err());
    assert_eq!(order(&mgr, room).await, vec![c(1), c(2)]);
}

#[tokio::test]
async fn test_full_room_rejects_and_is_not_listed() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig {
        max_participants: 2,
        ..RoomConfig::default()
    });
    let _rx1 = join(&mut mgr, room, 1).await;
    assert!(mgr.list_rooms().await.iter().any(|i| i.room_id == room));
    let _rx2 = join(&mut mgr, room, 2).await;

    let (tx, _rx3) = mpsc::unbounded_channel();
    let result = mgr.join_room(c(3), room, opts("c"), tx).await;
    assert_eq!(result, Err(RoomError::RoomFull(room)));
    assert_eq!(mgr.room_of(c(3)), None);
    assert!(!mgr.list_rooms().await.iter().any(|i| i.room_id == room));
}

#[tokio::test]
async fn test_room_info_reports_rotation() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(config(RotationPolicy::LoserStays));
    let _rx = join(&mut mgr, room, 1).await;

    let info = mgr.get_room_info(room).await.unwrap();
    assert_eq!(info.room_id, room);
    assert_eq!(info.participant_count, 1);
    assert_eq!(info.rotation, RotationPolicy::LoserStays);
}

// =========================================================================
// Ready barrier and role delivery
// =========================================================================

#[tokio::test]
async fn test_ready_handshake_delivers_roles_to_everyone() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let mut rx1 = join(&mut mgr, room, 1).await;
    let mut rx2 = join(&mut mgr, room, 2).await;
    let mut rx3 = join(&mut mgr, room, 3).await;

    assert!(ready(&mgr, 2).await.is_empty());
    let dispatch = ready(&mgr, 1).await;
    assert_eq!(dispatch.delivered, vec![c(1), c(2), c(3)]);
    assert!(dispatch.failures.is_empty());

    let host = "10.0.0.1:7000".to_string();
    assert_eq!(rx1.recv().await.unwrap(), RoleCommand::Host);
    assert_eq!(
        rx2.recv().await.unwrap(),
        RoleCommand::Join { address: host.clone() }
    );
    assert_eq!(
        rx3.recv().await.unwrap(),
        RoleCommand::Spectate { address: host }
    );

    // A further unrelated update doesn't hand the roles out again.
    assert!(ready(&mgr, 3).await.is_empty());
    assert!(rx1.try_recv().is_err());
}

#[tokio::test]
async fn test_lone_participant_never_gets_roles() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let mut rx1 = join(&mut mgr, room, 1).await;

    for flag in [true, false, true] {
        let dispatch = mgr
            .route_command(c(1), Command::Ready { ready: flag })
            .await
            .unwrap();
        assert!(dispatch.is_empty());
    }
    assert!(rx1.try_recv().is_err());
}

#[tokio::test]
async fn test_dead_connection_does_not_block_other_deliveries() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let mut rx1 = join(&mut mgr, room, 1).await;
    let rx2 = join(&mut mgr, room, 2).await;
    let mut rx3 = join(&mut mgr, room, 3).await;

    ready(&mgr, 2).await;
    drop(rx2);
    let dispatch = ready(&mgr, 1).await;

    assert_eq!(dispatch.delivered, vec![c(1), c(3)]);
    assert_eq!(dispatch.failures.len(), 1);
    assert_eq!(dispatch.failures[0].connection, c(2));
    assert!(matches!(dispatch.failures[0].command, RoleCommand::Join { .. }));

    assert_eq!(rx1.recv().await.unwrap(), RoleCommand::Host);
    assert!(matches!(
        rx3.recv().await.unwrap(),
        RoleCommand::Spectate { .. }
    ));
}

// =========================================================================
// Match results and rotation
// =========================================================================

#[tokio::test]
async fn test_winner_stays_full_cycle() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(config(RotationPolicy::WinnerStays));
    let _rx1 = join(&mut mgr, room, 1).await;
    let _rx2 = join(&mut mgr, room, 2).await;
    let _rx3 = join(&mut mgr, room, 3).await;

    ready(&mgr, 1).await;
    ready(&mgr, 2).await;
    let dispatch = mgr
        .route_command(c(2), Command::MatchEnd { winner: 1 })
        .await
        .unwrap();
    assert!(dispatch.is_empty());

    let snapshot = mgr.snapshot(room).await.unwrap();
    let ids: Vec<_> = snapshot.participants.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![c(1), c(3), c(2)]);
    let a = &snapshot.participants[0];
    let b = &snapshot.participants[2];
    let spectator = &snapshot.participants[1];
    assert_eq!((a.wins, a.matches), (1, 1));
    assert_eq!((b.wins, b.matches), (0, 1));
    assert_eq!((spectator.wins, spectator.matches), (0, 0));
}

#[tokio::test]
async fn test_loser_stays_moves_winner_to_back() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(config(RotationPolicy::LoserStays));
    let _rx1 = join(&mut mgr, room, 1).await;
    let _rx2 = join(&mut mgr, room, 2).await;
    let _rx3 = join(&mut mgr, room, 3).await;

    mgr.route_command(c(1), Command::MatchEnd { winner: 2 })
        .await
        .unwrap();
    assert_eq!(order(&mgr, room).await, vec![c(1), c(3), c(2)]);
}

#[tokio::test]
async fn test_random_rotation_keeps_everyone() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(config(RotationPolicy::Random));
    let mut receivers = Vec::new();
    for id in 1..=4 {
        receivers.push(join(&mut mgr, room, id).await);
    }

    for _ in 0..10 {
        let before = order(&mgr, room).await;
        mgr.route_command(c(1), Command::MatchEnd { winner: 1 })
            .await
            .unwrap();
        let after = order(&mgr, room).await;

        let moved = *after.last().unwrap();
        assert!(moved == before[0] || moved == before[1]);
        let untouched: Vec<_> =
            before.iter().copied().filter(|id| *id != moved).collect();
        assert_eq!(&after[..3], untouched.as_slice());
    }
}

#[tokio::test]
async fn test_invalid_result_rejected_without_mutation() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let _rx1 = join(&mut mgr, room, 1).await;
    let _rx2 = join(&mut mgr, room, 2).await;
    let before = mgr.snapshot(room).await.unwrap();

    let result = mgr.route_command(c(1), Command::MatchEnd { winner: 3 }).await;
    assert_eq!(result, Err(RoomError::InvalidResult(3)));
    assert_eq!(mgr.snapshot(room).await.unwrap(), before);

    // The room keeps working afterwards.
    mgr.route_command(c(1), Command::MatchEnd { winner: 2 })
        .await
        .unwrap();
}

// =========================================================================
// Status, unknown senders, leave
// =========================================================================

#[tokio::test]
async fn test_status_report_is_replicated() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let _rx1 = join(&mut mgr, room, 1).await;

    mgr.route_command(c(1), Command::Status { status: PlayerStatus::Playing })
        .await
        .unwrap();
    let snapshot = mgr.snapshot(room).await.unwrap();
    assert_eq!(snapshot.participants[0].status, PlayerStatus::Playing);
    assert_eq!(snapshot.creator, Some(c(1)));
}

#[tokio::test]
async fn test_unknown_sender_is_rejected() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let _rx1 = join(&mut mgr, room, 1).await;
    let before = mgr.snapshot(room).await.unwrap();

    let result = mgr.route_command(c(99), Command::Ready { ready: true }).await;
    assert_eq!(result, Err(RoomError::UnknownSender(c(99))));
    assert_eq!(mgr.snapshot(room).await.unwrap(), before);
}

#[tokio::test]
async fn test_leave_preserves_order_and_frees_connection() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let mut rx1 = join(&mut mgr, room, 1).await;
    let _rx2 = join(&mut mgr, room, 2).await;
    let _rx3 = join(&mut mgr, room, 3).await;

    mgr.leave_room(c(1)).await.unwrap();
    assert_eq!(order(&mgr, room).await, vec![c(2), c(3)]);
    assert_eq!(mgr.room_of(c(1)), None);
    assert!(rx1.try_recv().is_err());

    let result = mgr.route_command(c(1), Command::Ready { ready: true }).await;
    assert_eq!(result, Err(RoomError::UnknownSender(c(1))));
    assert_eq!(
        mgr.leave_room(c(1)).await,
        Err(RoomError::UnknownSender(c(1)))
    );
}

#[tokio::test]
async fn test_destroy_room_forgets_connections() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    let _rx1 = join(&mut mgr, room, 1).await;

    mgr.destroy_room(room).await.unwrap();
    assert_eq!(mgr.room_count(), 0);
    assert_eq!(mgr.room_of(c(1)), None);
    assert_eq!(
        mgr.snapshot(room).await,
        Err(RoomError::NotFound(room))
    );
}
