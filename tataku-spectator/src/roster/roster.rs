use crate::prelude::*;
use std::collections::HashSet;

/// what happened to a finished lookup
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// the user got an entry
    Materialized,
    /// the user stopped playing (or everyone was reset) before the lookup finished
    NoLongerPlaying,
    /// the lookup couldn't find the user
    UnresolvableIdentity,
    /// a previous lookup already added them
    AlreadyPresent,
}

/// the users currently playing, in the order their lookups finished
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterSnapshot {
    pub entries: Vec<OnlineUser>,
    /// lookups still in flight
    pub resolving: usize,
}
impl RosterSnapshot {
    /// everyone except ourselves
    pub fn watchable_entries(&self, local_user_id: Option<UserId>) -> impl Iterator<Item = &OnlineUser> {
        self.entries.iter().filter(move |u| Some(u.user_id) != local_user_id)
    }
}

/// reconciles membership notifications with async identity lookups.
///
/// membership is applied immediately, entries only show up once their lookup
/// completes, and a completion is only accepted if the user is still playing
/// at that point.
#[derive(Debug, Default)]
pub struct Roster {
    playing: HashSet<UserId>,
    entries: Vec<OnlineUser>,
    resolving: usize,
}
impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[OnlineUser] { &self.entries }
    pub fn resolving(&self) -> usize { self.resolving }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.entries.iter().any(|u| u.user_id == user_id)
    }
    pub fn is_playing(&self, user_id: UserId) -> bool {
        self.playing.contains(&user_id)
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            entries: self.entries.clone(),
            resolving: self.resolving,
        }
    }

    /// apply a membership change, returning the ids which need looking up
    pub fn apply_membership(&mut self, change: MembershipChange) -> Vec<UserId> {
        match change {
            MembershipChange::Added(user_ids) => {
                let entries = &self.entries;
                let playing = &mut self.playing;
                let to_resolve = user_ids
                    .into_iter()
                    .filter(|id| playing.insert(*id))
                    .filter(|id| !entries.iter().any(|u| u.user_id == *id))
                    .collect::<Vec<_>>();

                self.resolving += to_resolve.len();
                to_resolve
            }
            MembershipChange::Removed(user_ids) => {
                for id in &user_ids {
                    self.playing.remove(id);
                }
                self.entries.retain(|u| !user_ids.contains(&u.user_id));
                Vec::new()
            }
            MembershipChange::Reset => {
                debug!(entries = self.entries.len(), "roster reset");
                self.playing.clear();
                self.entries.clear();
                Vec::new()
            }
        }
    }

    /// a lookup started by [`Self::apply_membership`] finished
    pub fn apply_resolution(&mut self, user_id: UserId, user: Option<OnlineUser>) -> ResolutionOutcome {
        self.resolving = self.resolving.saturating_sub(1);

        if !self.playing.contains(&user_id) {
            debug!(user_id, "discarding lookup for user who is no longer playing");
            return ResolutionOutcome::NoLongerPlaying;
        }
        let Some(user) = user else {
            debug!(user_id, "couldn't resolve user, leaving them out of the roster");
            return ResolutionOutcome::UnresolvableIdentity;
        };
        if self.contains(user_id) {
            return ResolutionOutcome::AlreadyPresent;
        }

        trace!(user_id, username = %user.username, "user added to roster");
        self.entries.push(user);
        ResolutionOutcome::Materialized
    }
}
