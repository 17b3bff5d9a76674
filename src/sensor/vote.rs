use crate::gesture::{GestureConsumer, GestureMask};
use crate::sensor::{Error, SensorVoteRegistry, VoterId};
use log::warn;
use std::fmt;
use std::sync::{Arc, Weak};

/// A voter's seat in a `SensorVoteRegistry`.
///
/// Only the owner of the handle changes the vote. Dropping the
/// handle withdraws it.
pub struct Vote {
    registry: Arc<SensorVoteRegistry>,
    voter: VoterId,
}

impl Vote {
    pub(crate) fn new(registry: Arc<SensorVoteRegistry>, voter: VoterId) -> Self {
        Vote { registry, voter }
    }

    pub fn voter(&self) -> VoterId {
        self.voter
    }

    pub fn registry(&self) -> &Arc<SensorVoteRegistry> {
        &self.registry
    }

    /// Replaces this voter's vote, see `SensorVoteRegistry::vote`.
    pub fn vote_for(&self, mask: GestureMask) -> Result<GestureMask, Error> {
        self.registry.vote(self.voter, mask)
    }

    pub fn listen(&self, consumer: Weak<dyn GestureConsumer>) -> bool {
        self.registry.register(self.voter, consumer)
    }

    pub fn unlisten(&self) -> bool {
        self.registry.unregister(self.voter)
    }
}

impl fmt::Debug for Vote {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Vote")
            .field("voter", &self.voter)
            .field("sensor", &self.registry.sensor())
            .field("mask", &self.registry.vote_of(self.voter))
            .finish()
    }
}

impl Drop for Vote {
    fn drop(&mut self) {
        if let Err(e) = self.registry.retire(self.voter) {
            warn!("Failed to withdraw vote of {:?}: {}", self.voter, e);
        }
    }
}
