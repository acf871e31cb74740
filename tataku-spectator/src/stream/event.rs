use crate::prelude::*;

/// change to the set of users who are currently playing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MembershipChange {
    Added(Vec<UserId>),
    Removed(Vec<UserId>),
    /// everyone stopped playing (usually a reconnect)
    Reset,
}

/// everything a stream source can tell us
#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    Membership(MembershipChange),

    /// user started a play (or retried, in which case the token is new)
    SessionStarted {
        user_id: UserId,
        info: SessionInfo,
    },

    /// user finished, failed, or quit the play with this token
    SessionEnded {
        user_id: UserId,
        token: SessionToken,
    },

    /// a batch of frames for one session
    Frames {
        user_id: UserId,
        token: SessionToken,
        frames: Vec<Frame>,
    },
}
impl StreamEvent {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Membership(_) => None,
            Self::SessionStarted { user_id, .. }
            | Self::SessionEnded { user_id, .. }
            | Self::Frames { user_id, .. } => Some(*user_id),
        }
    }
}
