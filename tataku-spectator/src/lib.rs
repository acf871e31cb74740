#[cfg(test)]
mod tests;
pub mod error;
pub mod types;
pub mod config;
pub mod roster;
pub mod stream;
pub mod packets;
pub mod prelude;
pub mod playback;
pub mod serialization;

pub use prelude::*;
