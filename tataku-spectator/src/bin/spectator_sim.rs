use std::sync::Arc;
use std::time::Duration;
use tataku_spectator::prelude::*;

const HOST: UserId = 7;
const MAP: ContentId = ContentId(1234);

/// plays through a host retrying and finishing, with a simulated server and a local spectator.
///
/// usage: spectator-sim [config.json]
#[tokio::main]
async fn main() -> SpectatorResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SpectatorConfig::load(path)?,
        None => SpectatorConfig { local_user_id: Some(1), ..Default::default() },
    };
    info!(?config, "starting spectator simulation");

    let (spectator_task, spectator) = SpectatorService::spawn(SpectatorManager::new(config, Arc::new(AnyContent)));
    let (roster_task, roster) = RosterService::spawn(TestUserLookup);
    let (mut server, source) = SimulatedStreamServer::new();
    let router = tokio::spawn(StreamRouter::new(spectator.clone(), roster.clone()).run(source));

    tokio::spawn(log_playback(spectator.subscribe()));
    tokio::spawn(log_roster(roster.subscribe()));

    server.add_playing_users([2, 3, UNKNOWN_TEST_USER]);
    let first = server.start_session(HOST, MAP);
    server.send_frames(HOST, first, 0, 20);
    tokio::time::sleep(Duration::from_millis(500)).await;

    spectator.watch(HOST).await?;
    let mut sent = 20;
    for _ in 0..3 {
        server.send_frames(HOST, first, sent, 5);
        sent += 5;
        tokio::time::sleep(Duration::from_millis(400)).await;
    }

    // let playback run dry before the host gives up
    tokio::time::sleep(Duration::from_millis(1000)).await;
    info!("host retries");
    let second = server.start_session(HOST, MAP);
    server.send_frames(HOST, first, sent, 5);
    server.send_frames(HOST, second, 0, 15);
    tokio::time::sleep(Duration::from_millis(1000)).await;

    server.end_session(HOST, second);
    tokio::time::sleep(Duration::from_millis(800)).await;

    info!(roster = ?roster.snapshot().entries, playback = ?spectator.snapshot(), "simulation finished");
    drop(server);
    if let Ok(result) = router.await {
        result?;
    }

    spectator.shutdown()?;
    roster.shutdown()?;
    let _ = tokio::join!(spectator_task, roster_task);
    Ok(())
}

async fn log_playback(mut receiver: tokio::sync::watch::Receiver<PlaybackSnapshot>) {
    let mut last_state = None;
    while receiver.changed().await.is_ok() {
        let snapshot = receiver.borrow_and_update().clone();
        if last_state != Some(snapshot.state) {
            info!(
                state = ?snapshot.state,
                time = snapshot.current_time,
                buffered = snapshot.buffered_frames,
                token = ?snapshot.session.map(|s| s.token),
                "playback state changed"
            );
            last_state = Some(snapshot.state);
        }
    }
}

async fn log_roster(mut receiver: tokio::sync::watch::Receiver<RosterSnapshot>) {
    while receiver.changed().await.is_ok() {
        let snapshot = receiver.borrow_and_update().clone();
        let names = snapshot.entries.iter().map(|u| u.username.as_str()).collect::<Vec<_>>();
        info!(?names, resolving = snapshot.resolving, "roster updated");
    }
}
