use crate::prelude::*;

/// what the host did at a frame. the playback core never looks inside this
#[derive(Clone, Copy, Debug, PartialEq)]
#[derive(PacketSerialization)]
#[packet(type="u8")]
pub enum ReplayAction {
    /// key ids are ruleset specific
    #[packet(id=0)]
    Press { key: u8 },

    #[packet(id=1)]
    Release { key: u8 },

    #[packet(id=2)]
    MousePos { x: f32, y: f32 },
}
