use crate::prelude::*;
use thiserror::Error;

pub type SpectatorResult<T> = Result<T, SpectatorError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FrameBufferError {
    /// frames must be appended with strictly increasing indices
    #[error("frame {index} arrived after frame {last_index}")]
    OutOfOrderFrame { index: u32, last_index: u32 },
}

#[derive(Debug, Error)]
pub enum SpectatorError {
    #[error(transparent)]
    FrameBuffer(#[from] FrameBufferError),

    /// the stream source kept sending frames for a session it already ended
    #[error("received frames for user {user_id} after session {token} ended")]
    SessionEnded { user_id: UserId, token: SessionToken },

    #[error("you can't spectate yourself")]
    SpectatingYourself,

    #[error("the spectator service has shut down")]
    ServiceClosed,

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
