/// what happened to an event handed to the spectator
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    /// expected and harmless, nothing changed
    Ignored(IgnoreReason),
}
impl EventOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// the event is for someone we aren't watching (or we aren't watching anyone)
    NotWatching,
    /// the user we're watching hasn't started a session yet
    NoActiveSession,
    /// the event belongs to a session which has since been replaced
    StaleSessionToken,
    /// we don't have the map locally, so there's nothing to play the frames on
    MissingContent,
    /// we already know about this session
    DuplicateSession,
    /// the session has already ended
    AlreadyEnded,
    /// membership changes are the roster's business
    NotASessionEvent,
}
