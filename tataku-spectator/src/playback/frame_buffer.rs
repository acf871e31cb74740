use crate::prelude::*;

/// append-only list of frames for a single play attempt.
///
/// frames are consumed in the order they were appended, and the consume
/// cursor only ever moves forward. a retry gets a brand new buffer, frames
/// are never removed from one.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    frames: Vec<Frame>,
    /// index into `frames` of the next unconsumed frame
    next: usize,
}
impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// add a frame to the end of the buffer.
    /// the buffer is left untouched if the frame's index isn't after the last one
    pub fn append(&mut self, frame: Frame) -> Result<(), FrameBufferError> {
        if let Some(last) = self.frames.last() {
            if frame.index <= last.index {
                return Err(FrameBufferError::OutOfOrderFrame {
                    index: frame.index,
                    last_index: last.index,
                });
            }
        }

        self.frames.push(frame);
        Ok(())
    }

    /// the earliest frame that hasn't been consumed yet
    pub fn peek_next(&self) -> Option<&Frame> {
        self.frames.get(self.next)
    }

    /// consume the frame returned by [`Self::peek_next`]
    pub fn advance(&mut self) -> Option<&Frame> {
        let frame = self.frames.get(self.next)?;
        self.next += 1;
        Some(frame)
    }

    /// have we ever received anything? (never started vs starved)
    pub fn has_any_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn last_index(&self) -> Option<u32> {
        self.frames.last().map(|f| f.index)
    }

    /// how many frames are waiting to be consumed
    pub fn pending(&self) -> usize {
        self.frames.len() - self.next
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
