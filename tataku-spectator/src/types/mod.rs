mod frame;
mod session;
mod online_user;
mod replay_action;

pub use frame::*;
pub use session::*;
pub use online_user::*;
pub use replay_action::*;
