mod roster;
mod user_lookup;
mod roster_service;

pub use roster::*;
pub use user_lookup::*;
pub use roster_service::*;
