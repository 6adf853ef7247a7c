use ringside::prelude::*;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// A scripted evening: four players, three matches, loser-stays rotation.
// Run with `RUST_LOG=debug` to see the room's own logging too.
// ---------------------------------------------------------------------------

const PLAYERS: [(u64, &str); 4] = [
    (1, "10.0.0.1:7000"),
    (2, "10.0.0.2:7000"),
    (3, "10.0.0.3:7000"),
    (4, "10.0.0.4:7000"),
];

#[tokio::main]
async fn main() -> Result<(), RingsideError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let gateway = Gateway::new(JsonCodec);
    let room = gateway
        .create_room(br#"{"rotation":"loser-stays"}"#)
        .await?;

    let mut inboxes = Vec::new();
    for (id, address) in PLAYERS {
        let (tx, rx) = mpsc::unbounded_channel();
        let metadata = format!(r#"{{"address":"{address}"}}"#);
        gateway
            .join(ConnectionId(id), room, metadata.as_bytes(), tx)
            .await?;
        inboxes.push((ConnectionId(id), rx));
    }

    for (round, winner) in [1, 2, 1].into_iter().enumerate() {
        let snapshot = gateway.snapshot(room).await?;
        let host = snapshot.participants[0].id;
        let challenger = snapshot.participants[1].id;

        for id in [host, challenger] {
            gateway
                .receive(id, br#"{"kind":"ready","ready":true}"#)
                .await?;
        }

        for (id, inbox) in &mut inboxes {
            while let Ok(role) = inbox.try_recv() {
                let frame = gateway.encode(&role)?;
                tracing::info!(
                    round,
                    connection = %id,
                    frame = %String::from_utf8_lossy(&frame),
                    "role received"
                );
            }
        }

        let report = format!(r#"{{"kind":"matchEnd","winner":{winner}}}"#);
        gateway.receive(host, report.as_bytes()).await?;
    }

    let snapshot = gateway.snapshot(room).await?;
    let state = gateway.encode_snapshot(&snapshot)?;
    tracing::info!(state = %String::from_utf8_lossy(&state), "final room state");
    Ok(())
}
