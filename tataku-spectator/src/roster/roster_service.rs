use crate::prelude::*;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::sync::{ mpsc, watch };

pub enum RosterMessage {
    Membership(MembershipChange),
    /// a lookup finished. only ever sent by the service's own lookup tasks
    Resolved {
        user_id: UserId,
        user: Option<OnlineUser>,
    },
    Shutdown,
}

/// runs a [`Roster`] on its own task.
///
/// lookups run on their own tasks and report back through the same queue as
/// membership changes, so the roster only ever has one writer.
pub struct RosterService<L: UserLookup> {
    roster: Roster,
    lookup: Arc<L>,
    /// weak so pending lookups don't keep the service alive
    sender: mpsc::WeakUnboundedSender<RosterMessage>,
    receiver: mpsc::UnboundedReceiver<RosterMessage>,
    snapshot: watch::Sender<RosterSnapshot>,
}
impl<L: UserLookup> RosterService<L> {
    pub fn new(lookup: L) -> (Self, RosterHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let roster = Roster::new();
        let (snapshot, snapshot_receiver) = watch::channel(roster.snapshot());

        let service = Self {
            roster,
            lookup: Arc::new(lookup),
            sender: sender.downgrade(),
            receiver,
            snapshot,
        };
        let handle = RosterHandle { sender, snapshot: snapshot_receiver };
        (service, handle)
    }

    pub fn spawn(lookup: L) -> (JoinHandle<()>, RosterHandle) {
        let (service, handle) = Self::new(lookup);
        (tokio::spawn(service.run()), handle)
    }

    pub async fn run(mut self) {
        while let Some(message) = self.receiver.recv().await {
            match message {
                RosterMessage::Membership(change) => {
                    for user_id in self.roster.apply_membership(change) {
                        self.resolve(user_id);
                    }
                }
                RosterMessage::Resolved { user_id, user } => {
                    let outcome = self.roster.apply_resolution(user_id, user);
                    trace!(user_id, ?outcome, "lookup finished");
                }
                RosterMessage::Shutdown => break,
            }

            let snapshot = self.roster.snapshot();
            self.snapshot.send_if_modified(|current| {
                if *current == snapshot { return false }
                *current = snapshot;
                true
            });
        }

        debug!("roster service stopped");
    }

    fn resolve(&self, user_id: UserId) {
        let lookup = self.lookup.clone();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let user = lookup.lookup(user_id).await;

            let Some(sender) = sender.upgrade() else { return };
            if sender.send(RosterMessage::Resolved { user_id, user }).is_err() {
                trace!(user_id, "roster service stopped before lookup finished");
            }
        });
    }
}

/// cheap handle for talking to a running [`RosterService`]
#[derive(Clone)]
pub struct RosterHandle {
    sender: mpsc::UnboundedSender<RosterMessage>,
    snapshot: watch::Receiver<RosterSnapshot>,
}
impl RosterHandle {
    pub fn membership_changed(&self, change: MembershipChange) -> SpectatorResult<()> {
        self.sender
            .send(RosterMessage::Membership(change))
            .map_err(|_| SpectatorError::ServiceClosed)
    }

    pub fn shutdown(&self) -> SpectatorResult<()> {
        self.sender
            .send(RosterMessage::Shutdown)
            .map_err(|_| SpectatorError::ServiceClosed)
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RosterSnapshot> {
        self.snapshot.clone()
    }
}
