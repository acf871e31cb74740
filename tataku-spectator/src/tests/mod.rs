use crate::prelude::*;
use std::sync::Arc;
use std::collections::HashSet;

const HOST: UserId = 7;
const LOCAL_USER: UserId = 1;
const MAP: ContentId = ContentId(1234);

/// simulated server wired straight into a manager, pumped by hand
struct Harness {
    server: SimulatedStreamServer,
    source: ChannelStreamSource,
    manager: SpectatorManager,
}
impl Harness {
    fn new() -> Self {
        Self::with_content(Arc::new(AnyContent))
    }

    fn with_content(content: Arc<dyn ContentLibrary>) -> Self {
        let config = SpectatorConfig {
            local_user_id: Some(LOCAL_USER),
            strict_contract: false,
            ..Default::default()
        };
        let (server, source) = SimulatedStreamServer::new();
        Self { server, source, manager: SpectatorManager::new(config, content) }
    }

    /// apply everything the server sent so far
    fn pump(&mut self) -> Vec<SpectatorResult<EventOutcome>> {
        let mut results = Vec::new();
        while let Some(event) = self.source.try_next_event() {
            results.push(self.manager.handle_event(event));
        }
        results
    }

    fn tick(&mut self, elapsed: f64) -> Option<ClockTick> {
        self.pump();
        self.manager.tick(elapsed)
    }
}

#[test]
fn scenario_a_plays_frames_in_order() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();

    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 5);
    h.pump();
    assert_eq!(h.manager.state(), SessionState::Playing);

    let mut times = Vec::new();
    h.tick(0.0);
    times.push(h.manager.current_time());
    for _ in 0..4 {
        assert_eq!(h.tick(SIMULATED_FRAME_INTERVAL), Some(ClockTick::Advanced { frames: 1 }));
        times.push(h.manager.current_time());
    }
    assert_eq!(times, vec![0.0, 100.0, 200.0, 300.0, 400.0]);
}

#[test]
fn scenario_b_starves_at_last_frame() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 5);
    h.tick(0.0);
    for _ in 0..4 { h.tick(SIMULATED_FRAME_INTERVAL); }

    for _ in 0..5 {
        assert_eq!(h.tick(SIMULATED_FRAME_INTERVAL), Some(ClockTick::Starved));
        assert_eq!(h.manager.state(), SessionState::Starved);
        assert_eq!(h.manager.current_time(), SimulatedStreamServer::frame(4).time);
    }

    // the host catches up
    h.server.send_frames(HOST, t1, 5, 1);
    assert_eq!(h.tick(SIMULATED_FRAME_INTERVAL), Some(ClockTick::Advanced { frames: 1 }));
    assert_eq!(h.manager.state(), SessionState::Playing);
    assert_eq!(h.manager.current_time(), 500.0);
}

#[test]
fn scenario_c_stale_frames_after_retry() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 5);
    h.pump();

    h.server.end_session(HOST, t1);
    let t2 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 5, 3);

    let results = h.pump();
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(h.manager.state(), SessionState::Awaiting);

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.session.map(|s| s.token), Some(t2));
    assert_eq!(snapshot.buffered_frames, 0);
}

#[test]
fn retry_without_end_discards_the_old_attempt() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 50);
    h.tick(0.0);
    h.tick(1000.0);

    let t2 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 50, 10);
    h.server.send_frames(HOST, t2, 0, 2);
    h.pump();

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.session.map(|s| s.token), Some(t2));
    assert_eq!(snapshot.buffered_frames, 2);
    assert_eq!(snapshot.state, SessionState::Playing);

    // the new attempt starts from its own first frame
    h.tick(16.0);
    assert_eq!(h.manager.current_time(), 0.0);
}

#[test]
fn joining_mid_session_starts_from_the_current_frame() {
    let mut h = Harness::new();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 300);
    h.pump();

    h.manager.watch(HOST).unwrap();
    assert_eq!(h.manager.snapshot().session, Some(SessionInfo::new(t1, MAP)));

    h.server.send_frames(HOST, t1, 300, 10);
    h.tick(16.0);
    assert_eq!(h.manager.current_time(), 30_000.0);
    assert_eq!(h.manager.state(), SessionState::Playing);
}

#[test]
fn host_fails_without_sending_frames() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.end_session(HOST, t1);
    h.pump();

    assert_eq!(h.manager.state(), SessionState::Ended);
    assert_eq!(h.tick(16.0), Some(ClockTick::Starved));
    assert_eq!(h.manager.state(), SessionState::Ended);
}

#[test]
fn ended_session_shows_its_last_frames() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 3);
    h.server.end_session(HOST, t1);
    h.pump();

    assert_eq!(h.manager.state(), SessionState::Ended);
    h.tick(0.0);
    h.tick(200.0);
    assert_eq!(h.manager.current_time(), 200.0);
    assert_eq!(h.manager.snapshot().buffered_frames, 0);

    // a host which keeps going after ending is broken
    h.server.send_frames(HOST, t1, 3, 1);
    let results = h.pump();
    assert!(matches!(results[..], [Err(SpectatorError::SessionEnded { .. })]));
}

#[test]
fn stop_watching_then_host_retries() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 5);
    h.tick(0.0);

    h.manager.stop_watching();
    assert_eq!(h.manager.state(), SessionState::Idle);

    let t2 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t2, 0, 5);
    h.pump();
    assert_eq!(h.manager.state(), SessionState::Idle);
    assert_eq!(h.manager.snapshot().buffered_frames, 0);

    // watching again picks up the new attempt, but not the frames we ignored
    h.manager.watch(HOST).unwrap();
    assert_eq!(h.manager.snapshot().session.map(|s| s.token), Some(t2));
    assert_eq!(h.manager.state(), SessionState::Awaiting);
}

#[test]
fn reset_forgets_sessions_in_progress() {
    let mut h = Harness::new();
    let t1 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t1, 0, 5);
    h.server.reset_playing_users();
    h.pump();
    assert_eq!(h.server.current_session(HOST), None);

    // nothing to bind to, wait for the next play
    h.manager.watch(HOST).unwrap();
    assert_eq!(h.manager.known_session(HOST), None);
    assert_eq!(h.manager.snapshot().session, None);
    assert_eq!(h.manager.state(), SessionState::Awaiting);

    let t2 = h.server.start_session(HOST, MAP);
    h.pump();
    assert_eq!(h.manager.snapshot().session, Some(SessionInfo::new(t2, MAP)));
}

#[test]
fn host_leaving_without_ending_is_forgotten() {
    let mut h = Harness::new();
    h.server.start_session(HOST, MAP);
    h.server.start_session(8, MAP);
    h.pump();

    h.server.remove_playing_users([HOST]);
    h.pump();
    assert_eq!(h.manager.known_session(HOST), None);
    assert!(h.manager.known_session(8).is_some());

    h.manager.watch(HOST).unwrap();
    assert_eq!(h.manager.snapshot().session, None);
}

#[test]
fn missing_map_then_available_map() {
    let maps: HashSet<ContentId> = [MAP].into_iter().collect();
    let mut h = Harness::with_content(Arc::new(maps));
    h.manager.watch(HOST).unwrap();

    let t1 = h.server.start_session(HOST, ContentId(-1));
    h.server.send_frames(HOST, t1, 0, 5);
    h.tick(16.0);
    assert_eq!(h.manager.state(), SessionState::Awaiting);
    assert!(h.manager.snapshot().missing_content);

    h.server.end_session(HOST, t1);
    let t2 = h.server.start_session(HOST, MAP);
    h.server.send_frames(HOST, t2, 0, 5);
    h.tick(0.0);
    assert_eq!(h.manager.state(), SessionState::Playing);
    assert!(!h.manager.snapshot().missing_content);
}

#[test]
fn switching_hosts_mid_play() {
    let mut h = Harness::new();
    h.manager.watch(HOST).unwrap();
    let t1 = h.server.start_session(HOST, MAP);
    let t2 = h.server.start_session(8, MAP);
    h.server.send_frames(HOST, t1, 0, 5);
    h.server.send_frames(8, t2, 40, 5);
    h.tick(0.0);
    assert_eq!(h.manager.current_time(), 0.0);

    h.manager.watch(8).unwrap();
    assert_eq!(h.manager.snapshot().session, Some(SessionInfo::new(t2, MAP)));

    h.server.send_frames(8, t2, 45, 1);
    h.tick(0.0);
    assert_eq!(h.manager.current_time(), 4_500.0);
}

#[tokio::test]
async fn packets_drive_the_same_state_machine() {
    let (bytes, mut source) = PacketStreamSource::new();
    let (mut server, mut events) = SimulatedStreamServer::new();

    let t1 = server.start_session(HOST, MAP);
    server.send_frames(HOST, t1, 0, 3);
    drop(server);

    // everything the server sent goes over the wire as one message
    let mut sent = Vec::new();
    while let Some(event) = events.next_event().await {
        sent.push(event);
    }
    bytes.send(encode_events(sent)).unwrap();
    drop(bytes);

    let config = SpectatorConfig { strict_contract: false, ..Default::default() };
    let mut manager = SpectatorManager::new(config, Arc::new(AnyContent));
    manager.watch(HOST).unwrap();
    while let Some(event) = source.next_event().await {
        manager.handle_event(event).unwrap();
    }

    assert_eq!(manager.state(), SessionState::Playing);
    assert_eq!(manager.snapshot().buffered_frames, 3);
    manager.tick(0.0);
    manager.tick(200.0);
    assert_eq!(manager.current_time(), 200.0);
}

#[tokio::test]
async fn scenario_d_unknown_user_never_appears() {
    let (_, spectator) = SpectatorService::spawn(SpectatorManager::new(SpectatorConfig::default(), Arc::new(AnyContent)));
    let (_, roster) = RosterService::spawn(TestUserLookup);

    let (mut server, source) = SimulatedStreamServer::new();
    server.add_playing_users([UNKNOWN_TEST_USER]);
    server.add_playing_users([LOCAL_USER, HOST]);
    server.remove_playing_users([HOST]);
    drop(server);

    StreamRouter::new(spectator, roster.clone()).run(source).await.unwrap();

    let snapshot = roster.subscribe()
        .wait_for(|s| s.resolving == 0 && !s.entries.is_empty())
        .await
        .unwrap()
        .clone();

    assert_eq!(snapshot.entries, vec![OnlineUser::new(LOCAL_USER, "Kerensa")]);
    assert_eq!(snapshot.watchable_entries(Some(LOCAL_USER)).count(), 0);
}
