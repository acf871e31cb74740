use crate::prelude::*;

/// one timestamped unit of input streamed from the host
#[derive(Clone, Debug, PartialEq)]
#[derive(Serializable)]
pub struct Frame {
    /// position of this frame within its session, strictly increasing
    pub index: u32,
    /// session time (ms) at which this frame's state should be visible
    pub time: f64,
    pub action: ReplayAction,
}
impl Frame {
    pub fn new(index: u32, time: f64, action: ReplayAction) -> Self {
        Self {
            index,
            time,
            action
        }
    }
}
