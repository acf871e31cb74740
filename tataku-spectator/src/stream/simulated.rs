use crate::prelude::*;
use std::collections::{ HashMap, BTreeSet };
use tokio::sync::mpsc::UnboundedSender;

/// how far apart synthesized frames are (ms)
pub const SIMULATED_FRAME_INTERVAL: f64 = 100.0;

/// stand-in for the spectator server, for tests and the simulator binary.
///
/// keeps track of who is playing what, and emits the same events a real server would.
pub struct SimulatedStreamServer {
    sender: UnboundedSender<StreamEvent>,
    playing_users: BTreeSet<UserId>,
    sessions: HashMap<UserId, SessionInfo>,
    next_token: u64,
}
impl SimulatedStreamServer {
    pub fn new() -> (Self, ChannelStreamSource) {
        let (sender, source) = ChannelStreamSource::new();
        let server = Self {
            sender,
            playing_users: BTreeSet::new(),
            sessions: HashMap::new(),
            next_token: 1,
        };
        (server, source)
    }

    pub fn playing_users(&self) -> Vec<UserId> {
        self.playing_users.iter().copied().collect()
    }
    pub fn current_session(&self, user_id: UserId) -> Option<SessionInfo> {
        self.sessions.get(&user_id).copied()
    }

    /// the frame a host would have sent at this index
    pub fn frame(index: u32) -> Frame {
        // wander around the 512x384 playfield
        let x = (index.wrapping_mul(37) % 512) as f32;
        let y = (index.wrapping_mul(23) % 384) as f32;
        Frame::new(index, index as f64 * SIMULATED_FRAME_INTERVAL, ReplayAction::MousePos { x, y })
    }

    /// user starts a new play, with a freshly allocated token
    pub fn start_session(&mut self, user_id: UserId, content_id: ContentId) -> SessionToken {
        let token = SessionToken(self.next_token);
        self.start_session_with_token(user_id, token, content_id);
        token
    }

    pub fn start_session_with_token(&mut self, user_id: UserId, token: SessionToken, content_id: ContentId) {
        self.next_token = self.next_token.max(token.0 + 1);
        if self.playing_users.insert(user_id) {
            self.emit(StreamEvent::Membership(MembershipChange::Added(vec![user_id])));
        }

        let info = SessionInfo::new(token, content_id);
        self.sessions.insert(user_id, info);
        self.emit(StreamEvent::SessionStarted { user_id, info });
    }

    pub fn end_session(&mut self, user_id: UserId, token: SessionToken) {
        self.emit(StreamEvent::SessionEnded { user_id, token });

        if self.sessions.get(&user_id).is_some_and(|info| info.token == token) {
            self.sessions.remove(&user_id);
            self.playing_users.remove(&user_id);
            self.emit(StreamEvent::Membership(MembershipChange::Removed(vec![user_id])));
        }
    }

    /// send `count` frames starting at `start`, whatever the token.
    /// stops short at the last possible frame index
    pub fn send_frames(&mut self, user_id: UserId, token: SessionToken, start: u32, count: u32) {
        let frames = (start..start.saturating_add(count)).map(Self::frame).collect();
        self.emit(StreamEvent::Frames { user_id, token, frames });
    }

    /// everyone stops playing at once, like after a reconnect
    pub fn reset_playing_users(&mut self) {
        self.playing_users.clear();
        self.sessions.clear();
        self.emit(StreamEvent::Membership(MembershipChange::Reset));
    }

    /// playing users without a session, just to populate the roster
    pub fn add_playing_users(&mut self, user_ids: impl IntoIterator<Item = UserId>) {
        let added = user_ids.into_iter()
            .filter(|id| self.playing_users.insert(*id))
            .collect::<Vec<_>>();

        if !added.is_empty() {
            self.emit(StreamEvent::Membership(MembershipChange::Added(added)));
        }
    }

    pub fn remove_playing_users(&mut self, user_ids: impl IntoIterator<Item = UserId>) {
        let removed = user_ids.into_iter()
            .filter(|id| self.playing_users.remove(id))
            .collect::<Vec<_>>();

        for id in &removed {
            self.sessions.remove(id);
        }
        if !removed.is_empty() {
            self.emit(StreamEvent::Membership(MembershipChange::Removed(removed)));
        }
    }

    fn emit(&self, event: StreamEvent) {
        if self.sender.send(event).is_err() {
            trace!("simulated server has no listener");
        }
    }
}
