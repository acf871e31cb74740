use crate::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// not watching anyone
    Idle,
    /// watching someone, but no frames have arrived for their current session
    Awaiting,
    /// frames are being consumed
    Playing,
    /// ran out of frames, time is held until more arrive
    Starved,
    /// the host finished (or failed) their play
    Ended,
}

/// the frames and clock for exactly one session token
#[derive(Debug)]
pub struct PlaybackAttempt {
    pub info: SessionInfo,
    pub content_available: bool,
    buffer: FrameBuffer,
    clock: FrameStableClock,
}
impl PlaybackAttempt {
    fn new(info: SessionInfo, content_available: bool, start_time: f64) -> Self {
        Self {
            info,
            content_available,
            buffer: FrameBuffer::new(),
            clock: FrameStableClock::new(start_time),
        }
    }

    pub fn buffer(&self) -> &FrameBuffer { &self.buffer }
    pub fn clock(&self) -> &FrameStableClock { &self.clock }
}

/// everything to do with watching one user
#[derive(Debug)]
pub struct PlaybackSession {
    user_id: UserId,
    state: SessionState,
    /// None until the user starts (or is known to be in) a session
    attempt: Option<PlaybackAttempt>,
    start_time: f64,
}
impl PlaybackSession {
    pub fn new(user_id: UserId, start_time: f64) -> Self {
        Self {
            user_id,
            state: SessionState::Awaiting,
            attempt: None,
            start_time,
        }
    }

    pub fn user_id(&self) -> UserId { self.user_id }
    pub fn state(&self) -> SessionState { self.state }
    pub fn attempt(&self) -> Option<&PlaybackAttempt> { self.attempt.as_ref() }
    pub fn token(&self) -> Option<SessionToken> { self.attempt.as_ref().map(|a| a.info.token) }

    pub fn current_time(&self) -> f64 {
        self.attempt.as_ref().map_or(self.start_time, |a| a.clock.current_time())
    }

    /// bind to a (new) session, throwing away everything from the previous one
    pub fn bind(&mut self, info: SessionInfo, content_available: bool) -> EventOutcome {
        if self.token() == Some(info.token) {
            return EventOutcome::Ignored(IgnoreReason::DuplicateSession);
        }

        if let Some(old) = &self.attempt {
            debug!(user_id = self.user_id, old = %old.info.token, new = %info.token, "host retried, discarding old session");
        }
        if !content_available {
            warn!(user_id = self.user_id, content_id = %info.content_id, "spectated map is not available locally");
        }

        self.attempt = Some(PlaybackAttempt::new(info, content_available, self.start_time));
        self.state = SessionState::Awaiting;
        EventOutcome::Applied
    }

    pub fn receive_frames(&mut self, token: SessionToken, frames: Vec<Frame>) -> SpectatorResult<EventOutcome> {
        let Some(attempt) = self.attempt.as_mut() else {
            return Ok(EventOutcome::Ignored(IgnoreReason::NoActiveSession));
        };
        if attempt.info.token != token {
            trace!(user_id = self.user_id, %token, count = frames.len(), "dropping frames for stale session");
            return Ok(EventOutcome::Ignored(IgnoreReason::StaleSessionToken));
        }
        if self.state == SessionState::Ended {
            return Err(SpectatorError::SessionEnded { user_id: self.user_id, token });
        }
        if !attempt.content_available {
            return Ok(EventOutcome::Ignored(IgnoreReason::MissingContent));
        }

        let mut appended = 0;
        let mut result = Ok(EventOutcome::Applied);
        for frame in frames {
            if let Err(e) = attempt.buffer.append(frame) {
                result = Err(e.into());
                break;
            }
            appended += 1;
        }

        if appended > 0 && matches!(self.state, SessionState::Awaiting | SessionState::Starved) {
            debug!(user_id = self.user_id, %token, appended, "frames arrived, playing");
            self.state = SessionState::Playing;
        }

        result
    }

    pub fn end(&mut self, token: SessionToken) -> EventOutcome {
        if self.token() != Some(token) {
            return EventOutcome::Ignored(IgnoreReason::StaleSessionToken);
        }
        if self.state == SessionState::Ended {
            return EventOutcome::Ignored(IgnoreReason::AlreadyEnded);
        }

        debug!(user_id = self.user_id, %token, "host ended their session");
        self.state = SessionState::Ended;
        EventOutcome::Applied
    }

    /// advance playback by `elapsed` ms of real time
    pub fn tick(&mut self, elapsed: f64) -> Option<ClockTick> {
        let attempt = self.attempt.as_mut()?;

        match self.state {
            SessionState::Idle | SessionState::Awaiting => None,
            SessionState::Playing => {
                let tick = attempt.clock.tick(&mut attempt.buffer, elapsed);
                if tick == ClockTick::Starved {
                    debug!(user_id = self.user_id, time = attempt.clock.current_time(), "out of frames, buffering");
                    self.state = SessionState::Starved;
                }
                Some(tick)
            }
            // nothing new can have arrived without an append moving us back to playing
            SessionState::Starved => Some(ClockTick::Starved),
            // still show whatever was buffered before the host ended
            SessionState::Ended => Some(attempt.clock.tick(&mut attempt.buffer, elapsed)),
        }
    }
}
