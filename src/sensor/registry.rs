use crate::gesture::{GestureConsumer, GestureMask};
use crate::sensor::dispatch::Dispatcher;
use crate::sensor::{Error, SensorEventListener, SensorId, SensorSubscription, Vote};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Result<T> = std::result::Result<T, Error>;

/// Identity of a voter, stable until its vote is retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoterId(pub(crate) u32);

/// Arbitrates one shared sensor between independent voters.
///
/// Every voter asks for a subset of gestures, the hardware is
/// subscribed to the union of all of them. The subscription is
/// active while at least one voter asks for anything.
pub struct SensorVoteRegistry {
    sensor: SensorId,
    subscription: Arc<dyn SensorSubscription>,
    dispatcher: Arc<Dispatcher>,
    ballot: Mutex<Ballot>,
}

#[derive(Default)]
struct Ballot {
    votes: BTreeMap<VoterId, GestureMask>,
    next_voter: u32,
    /// Mask the active subscription was last configured with,
    /// `None` while not subscribed.
    subscribed: Option<GestureMask>,
}

impl Ballot {
    fn combined(&self) -> GestureMask {
        self.votes.values().collect()
    }
}

impl SensorVoteRegistry {
    pub fn new(sensor: SensorId, subscription: Arc<dyn SensorSubscription>) -> Arc<Self> {
        Arc::new(SensorVoteRegistry {
            sensor,
            subscription,
            dispatcher: Arc::new(Dispatcher::new()),
            ballot: Mutex::new(Ballot::default()),
        })
    }

    pub fn sensor(&self) -> SensorId {
        self.sensor
    }

    /// Adds a new voter with an empty vote.
    ///
    /// Dropping the returned handle retires the voter.
    pub fn enroll(self: &Arc<Self>) -> Vote {
        let voter = {
            let mut ballot = self.ballot();
            let voter = VoterId(ballot.next_voter);
            ballot.next_voter += 1;
            ballot.votes.insert(voter, GestureMask::EMPTY);
            voter
        };
        debug!("Enrolled {:?} for {}", voter, self.sensor);
        Vote::new(Arc::clone(self), voter)
    }

    /// Replaces the vote of `voter` and brings the subscription in
    /// line with the new combined mask before returning.
    ///
    /// Returns the new combined mask. An error means the vote has
    /// been recorded but the hardware did not follow.
    pub(crate) fn vote(&self, voter: VoterId, mask: GestureMask) -> Result<GestureMask> {
        let mut ballot = self.ballot();
        let previous = ballot.votes.insert(voter, mask);
        self.dispatcher.set_mask(voter, mask);

        let combined = ballot.combined();
        if previous != Some(mask) {
            debug!(
                "{:?} votes {:?} for {}, combined {:?}",
                voter, mask, self.sensor, combined
            );
        }

        self.apply(&mut ballot, combined)?;
        Ok(combined)
    }

    /// Removes the voter, its registration and its vote.
    pub(crate) fn retire(&self, voter: VoterId) -> Result<GestureMask> {
        let mut ballot = self.ballot();
        ballot.votes.remove(&voter);
        self.dispatcher.remove(voter);

        let combined = ballot.combined();
        debug!(
            "Retired {:?} from {}, combined {:?}",
            voter, self.sensor, combined
        );

        self.apply(&mut ballot, combined)?;
        Ok(combined)
    }

    /// Delivers gestures in the voter's mask to `consumer` from now on.
    ///
    /// Returns `false` without changes if the voter already has a
    /// registered consumer.
    pub(crate) fn register(&self, voter: VoterId, consumer: Weak<dyn GestureConsumer>) -> bool {
        self.dispatcher.register(voter, consumer)
    }

    /// Returns `false` without changes if nothing was registered.
    pub(crate) fn unregister(&self, voter: VoterId) -> bool {
        self.dispatcher.unregister(voter)
    }

    pub fn is_registered(&self, voter: VoterId) -> bool {
        self.dispatcher.is_registered(voter)
    }

    pub fn current_combined_mask(&self) -> GestureMask {
        self.ballot().combined()
    }

    /// Current vote of the voter, empty for unknown voters.
    pub fn vote_of(&self, voter: VoterId) -> GestureMask {
        self.ballot()
            .votes
            .get(&voter)
            .copied()
            .unwrap_or_default()
    }

    /// `true` if the hardware subscription is active.
    pub fn is_active(&self) -> bool {
        self.ballot().subscribed.is_some()
    }

    fn apply(&self, ballot: &mut Ballot, combined: GestureMask) -> Result<()> {
        match ballot.subscribed {
            None if !combined.is_empty() => {
                let target: Arc<dyn SensorEventListener> = self.dispatcher.clone();
                match self.subscription.activate(self.sensor, combined, target) {
                    Ok(()) => {
                        info!("Activated {} for {:?}", self.sensor, combined);
                        ballot.subscribed = Some(combined);
                    }
                    Err(cause) => {
                        warn!("Failed to activate {}: {}", self.sensor, cause);
                        return Err(Error::activation_failed(self.sensor, combined, cause));
                    }
                }
            }
            Some(_) if combined.is_empty() => {
                let target: Arc<dyn SensorEventListener> = self.dispatcher.clone();
                self.subscription.deactivate(self.sensor, &target);
                info!("Deactivated {}", self.sensor);
                ballot.subscribed = None;
            }
            Some(subscribed) if subscribed != combined => {
                match self.subscription.reconfigure(self.sensor, combined) {
                    Ok(()) => {
                        debug!("Reconfigured {} for {:?}", self.sensor, combined);
                        ballot.subscribed = Some(combined);
                    }
                    Err(cause) => {
                        warn!("Failed to reconfigure {}: {}", self.sensor, cause);
                        return Err(Error::reconfiguration_failed(
                            self.sensor,
                            combined,
                            cause,
                        ));
                    }
                }
            }
            _ => (),
        }

        Ok(())
    }

    fn ballot(&self) -> MutexGuard<Ballot> {
        self.ballot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
