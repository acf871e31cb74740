use crate::prelude::*;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::sync::{ mpsc, oneshot, watch };
use tokio::time::{ Instant, MissedTickBehavior };

pub enum SpectatorMessage {
    Stream(StreamEvent),
    Watch {
        user_id: UserId,
        reply: oneshot::Sender<SpectatorResult<EventOutcome>>,
    },
    StopWatching,
    Shutdown,
}

/// runs a [`SpectatorManager`] on its own task.
///
/// stream events and watch requests are queued and applied one at a time in
/// the order they were sent, and the clock is ticked between them.
pub struct SpectatorService {
    manager: SpectatorManager,
    receiver: mpsc::UnboundedReceiver<SpectatorMessage>,
    snapshot: watch::Sender<PlaybackSnapshot>,
}
impl SpectatorService {
    pub fn new(manager: SpectatorManager) -> (Self, SpectatorHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (snapshot, snapshot_receiver) = watch::channel(manager.snapshot());

        let service = Self { manager, receiver, snapshot };
        let handle = SpectatorHandle { sender, snapshot: snapshot_receiver };
        (service, handle)
    }

    pub fn spawn(manager: SpectatorManager) -> (JoinHandle<()>, SpectatorHandle) {
        let (service, handle) = Self::new(manager);
        (tokio::spawn(service.run()), handle)
    }

    pub async fn run(mut self) {
        let period = Duration::from_millis(self.manager.config().tick_interval_ms.max(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                biased;

                message = self.receiver.recv() => {
                    let Some(message) = message else { break };
                    if !self.handle_message(message) { break }
                }
                _ = interval.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_tick).as_secs_f64() * 1000.0;
                    last_tick = now;
                    self.manager.tick(elapsed);
                }
            }

            self.publish();
        }

        // let the presentation layer know we're not watching anything anymore
        self.manager.stop_watching();
        self.publish();
        debug!("spectator service stopped");
    }

    /// returns false when the service should stop
    fn handle_message(&mut self, message: SpectatorMessage) -> bool {
        match message {
            SpectatorMessage::Stream(event) => {
                // contract violations are logged and counted in the snapshot by the manager
                match self.manager.handle_event(event) {
                    Ok(outcome) => trace!(?outcome, "stream event handled"),
                    Err(e) => trace!(error = %e, "stream event rejected"),
                }
            }
            SpectatorMessage::Watch { user_id, reply } => {
                let _ = reply.send(self.manager.watch(user_id));
            }
            SpectatorMessage::StopWatching => self.manager.stop_watching(),
            SpectatorMessage::Shutdown => return false,
        }

        true
    }

    fn publish(&self) {
        let snapshot = self.manager.snapshot();
        self.snapshot.send_if_modified(|current| {
            if *current == snapshot { return false }
            *current = snapshot;
            true
        });
    }
}

/// cheap handle for talking to a running [`SpectatorService`]
#[derive(Clone)]
pub struct SpectatorHandle {
    sender: mpsc::UnboundedSender<SpectatorMessage>,
    snapshot: watch::Receiver<PlaybackSnapshot>,
}
impl SpectatorHandle {
    fn send(&self, message: SpectatorMessage) -> SpectatorResult<()> {
        self.sender.send(message).map_err(|_| SpectatorError::ServiceClosed)
    }

    pub fn stream_event(&self, event: StreamEvent) -> SpectatorResult<()> {
        self.send(SpectatorMessage::Stream(event))
    }

    pub async fn watch(&self, user_id: UserId) -> SpectatorResult<EventOutcome> {
        let (reply, response) = oneshot::channel();
        self.send(SpectatorMessage::Watch { user_id, reply })?;
        response.await.map_err(|_| SpectatorError::ServiceClosed)?
    }

    pub fn stop_watching(&self) -> SpectatorResult<()> {
        self.send(SpectatorMessage::StopWatching)
    }

    pub fn shutdown(&self) -> SpectatorResult<()> {
        self.send(SpectatorMessage::Shutdown)
    }

    /// latest published state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot.clone()
    }
}
