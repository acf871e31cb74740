use crate::prelude::*;
use std::sync::Arc;
use std::collections::HashMap;

/// what the presentation layer needs to draw the spectator
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: SessionState,
    pub user_id: Option<UserId>,
    pub session: Option<SessionInfo>,
    pub current_time: f64,
    /// the host is playing a map we don't have
    pub missing_content: bool,
    pub buffered_frames: usize,
    /// how many times the stream source broke its contract, and the latest way it did
    pub contract_violations: usize,
    pub last_violation: Option<String>,
}

/// the spectator state machine.
///
/// every stream event and watch request goes through here, one at a time.
/// it owns at most one [`PlaybackSession`], and that session owns its frames and clock.
pub struct SpectatorManager {
    config: SpectatorConfig,
    content: Arc<dyn ContentLibrary>,
    session: Option<PlaybackSession>,

    /// what everyone is currently playing, so watching someone mid-play can start right away
    known_sessions: HashMap<UserId, SessionInfo>,

    contract_violations: usize,
    last_violation: Option<String>,
}
impl SpectatorManager {
    pub fn new(config: SpectatorConfig, content: Arc<dyn ContentLibrary>) -> Self {
        Self {
            config,
            content,
            session: None,
            known_sessions: HashMap::new(),
            contract_violations: 0,
            last_violation: None,
        }
    }

    pub fn config(&self) -> &SpectatorConfig { &self.config }
    pub fn session(&self) -> Option<&PlaybackSession> { self.session.as_ref() }
    pub fn watched_user(&self) -> Option<UserId> { self.session.as_ref().map(|s| s.user_id()) }
    pub fn known_session(&self, user_id: UserId) -> Option<SessionInfo> { self.known_sessions.get(&user_id).copied() }

    pub fn state(&self) -> SessionState {
        self.session.as_ref().map_or(SessionState::Idle, |s| s.state())
    }

    pub fn current_time(&self) -> f64 {
        self.session.as_ref().map_or(self.config.clock_start_time, |s| s.current_time())
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let attempt = self.session.as_ref().and_then(|s| s.attempt());

        PlaybackSnapshot {
            state: self.state(),
            user_id: self.watched_user(),
            session: attempt.map(|a| a.info),
            current_time: self.current_time(),
            missing_content: attempt.is_some_and(|a| !a.content_available),
            buffered_frames: attempt.map_or(0, |a| a.buffer().pending()),
            contract_violations: self.contract_violations,
            last_violation: self.last_violation.clone(),
        }
    }

    /// start watching someone. if they're already mid-session we bind to it immediately
    pub fn watch(&mut self, user_id: UserId) -> SpectatorResult<EventOutcome> {
        if self.config.local_user_id == Some(user_id) {
            return Err(SpectatorError::SpectatingYourself);
        }
        if self.watched_user() == Some(user_id) {
            return Ok(EventOutcome::Ignored(IgnoreReason::DuplicateSession));
        }

        info!(user_id, "started spectating");
        let mut session = PlaybackSession::new(user_id, self.config.clock_start_time);
        if let Some(info) = self.known_sessions.get(&user_id) {
            session.bind(*info, self.content.has_content(info.content_id));
        }

        // replacing the session drops the old buffer and clock
        self.session = Some(session);
        Ok(EventOutcome::Applied)
    }

    pub fn stop_watching(&mut self) {
        if let Some(session) = self.session.take() {
            info!(user_id = session.user_id(), "stopped spectating");
        }
    }

    pub fn handle_event(&mut self, event: StreamEvent) -> SpectatorResult<EventOutcome> {
        match event {
            StreamEvent::Membership(change) => Ok(self.membership_changed(change)),
            StreamEvent::SessionStarted { user_id, info } => Ok(self.session_started(user_id, info)),
            StreamEvent::SessionEnded { user_id, token } => Ok(self.session_ended(user_id, token)),
            StreamEvent::Frames { user_id, token, frames } => self.frames_received(user_id, token, frames),
        }
    }

    /// users who stopped playing can't be mid-session anymore
    fn membership_changed(&mut self, change: MembershipChange) -> EventOutcome {
        match change {
            MembershipChange::Added(_) => {}
            MembershipChange::Removed(user_ids) => {
                for user_id in user_ids {
                    self.known_sessions.remove(&user_id);
                }
            }
            MembershipChange::Reset => self.known_sessions.clear(),
        }

        // the watched session is only ever changed by session events
        EventOutcome::Ignored(IgnoreReason::NotASessionEvent)
    }

    fn session_started(&mut self, user_id: UserId, info: SessionInfo) -> EventOutcome {
        trace!(user_id, token = %info.token, content_id = %info.content_id, "session started");
        self.known_sessions.insert(user_id, info);

        let content_available = self.content.has_content(info.content_id);
        match self.session.as_mut() {
            // a new token always wins, whatever state the old one was in
            Some(session) if session.user_id() == user_id => session.bind(info, content_available),
            _ => EventOutcome::Ignored(IgnoreReason::NotWatching),
        }
    }

    fn session_ended(&mut self, user_id: UserId, token: SessionToken) -> EventOutcome {
        trace!(user_id, %token, "session ended");
        if self.known_sessions.get(&user_id).is_some_and(|info| info.token == token) {
            self.known_sessions.remove(&user_id);
        }

        match self.session.as_mut() {
            Some(session) if session.user_id() == user_id => session.end(token),
            _ => EventOutcome::Ignored(IgnoreReason::NotWatching),
        }
    }

    fn frames_received(&mut self, user_id: UserId, token: SessionToken, frames: Vec<Frame>) -> SpectatorResult<EventOutcome> {
        let result = match self.session.as_mut() {
            Some(session) if session.user_id() == user_id => session.receive_frames(token, frames),
            _ => return Ok(EventOutcome::Ignored(IgnoreReason::NotWatching)),
        };

        result.map_err(|e| self.contract_violation(e))
    }

    /// advance playback by `elapsed` ms of real time
    pub fn tick(&mut self, elapsed: f64) -> Option<ClockTick> {
        self.session.as_mut()?.tick(elapsed)
    }

    /// the stream source sent us something it promised it wouldn't
    fn contract_violation(&mut self, error: SpectatorError) -> SpectatorError {
        error!(%error, "stream source broke its contract");
        if self.config.strict_contract {
            panic!("stream source broke its contract: {error}");
        }

        self.contract_violations += 1;
        self.last_violation = Some(error.to_string());
        error
    }
}
