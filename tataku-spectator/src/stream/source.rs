use crate::prelude::*;
use std::future::Future;
use std::collections::VecDeque;
use tokio::sync::mpsc::{ self, UnboundedSender, UnboundedReceiver };

/// where spectator events come from.
///
/// events must come out in the order the source produced them.
pub trait StreamSource: Send {
    /// the next event, or None once the source has shut down
    fn next_event(&mut self) -> impl Future<Output = Option<StreamEvent>> + Send;
}

/// in-process source, fed through a channel
pub struct ChannelStreamSource {
    receiver: UnboundedReceiver<StreamEvent>,
}
impl ChannelStreamSource {
    pub fn new() -> (UnboundedSender<StreamEvent>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver })
    }

    /// the next event if one is already queued, without waiting
    pub fn try_next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.try_recv().ok()
    }
}
impl StreamSource for ChannelStreamSource {
    async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// source fed with raw binary messages straight off the connection
pub struct PacketStreamSource {
    receiver: UnboundedReceiver<Vec<u8>>,
    pending: VecDeque<StreamEvent>,
}
impl PacketStreamSource {
    pub fn new() -> (UnboundedSender<Vec<u8>>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver, pending: VecDeque::new() })
    }
}
impl StreamSource for PacketStreamSource {
    async fn next_event(&mut self) -> Option<StreamEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            let message = self.receiver.recv().await?;
            let len = message.len();
            match decode_message(message) {
                Ok(events) => self.pending.extend(events),
                Err(e) => warn!(len, error = %e, "dropping malformed stream message"),
            }
        }
    }
}
