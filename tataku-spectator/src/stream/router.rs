use crate::prelude::*;

/// pumps a [`StreamSource`] into the roster and spectator services.
///
/// membership goes to both, session events only to the spectator. each
/// service gets its events in the same order the source produced them.
#[derive(Clone)]
pub struct StreamRouter {
    spectator: SpectatorHandle,
    roster: RosterHandle,
}
impl StreamRouter {
    pub fn new(spectator: SpectatorHandle, roster: RosterHandle) -> Self {
        Self { spectator, roster }
    }

    pub fn route(&self, event: StreamEvent) -> SpectatorResult<()> {
        trace!(user_id = ?event.user_id(), "routing stream event");
        match event {
            StreamEvent::Membership(change) => {
                // the spectator forgets sessions of users who stopped playing
                self.spectator.stream_event(StreamEvent::Membership(change.clone()))?;
                self.roster.membership_changed(change)
            }
            event => self.spectator.stream_event(event),
        }
    }

    /// runs until the source closes or one of the services stops
    pub async fn run(self, mut source: impl StreamSource) -> SpectatorResult<()> {
        while let Some(event) = source.next_event().await {
            if let Err(e) = self.route(event) {
                warn!(error = %e, "stopping stream router");
                return Err(e);
            }
        }

        debug!("stream source closed");
        Ok(())
    }
}
