mod content;
mod outcome;
mod frame_buffer;
mod playback_session;
mod spectator_manager;
mod spectator_service;
mod frame_stable_clock;

pub use content::*;
pub use outcome::*;
pub use frame_buffer::*;
pub use playback_session::*;
pub use spectator_manager::*;
pub use spectator_service::*;
pub use frame_stable_clock::*;
