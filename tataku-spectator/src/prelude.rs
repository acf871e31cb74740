pub use crate::error::*;
pub use crate::types::*;
pub use crate::config::*;
pub use crate::roster::*;
pub use crate::stream::*;
pub use crate::packets::*;
pub use crate::playback::*;
pub use crate::serialization::*;

pub use tracing::{ trace, debug, info, warn, error };
pub use tataku_spectator_proc_macros::Serializable;
pub use tataku_spectator_proc_macros::PacketSerialization;
