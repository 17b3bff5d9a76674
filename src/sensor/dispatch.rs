use crate::gesture::{GestureConsumer, GestureEvent, GestureMask};
use crate::sensor::{SensorEvent, SensorEventListener, VoterId};
use log::{debug, trace};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Routes parsed gestures to the consumers of the voters that
/// asked for them.
///
/// This is the one delivery target the registry hands to the
/// subscription.
#[derive(Default)]
pub struct Dispatcher {
    routes: Mutex<BTreeMap<VoterId, Route>>,
}

#[derive(Default)]
struct Route {
    mask: GestureMask,
    consumer: Option<Weak<dyn GestureConsumer>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns `false` if the voter already had a consumer, in which
    /// case the existing registration stays.
    pub fn register(&self, voter: VoterId, consumer: Weak<dyn GestureConsumer>) -> bool {
        let mut routes = self.routes();
        let route = routes.entry(voter).or_default();
        if route.consumer.is_some() {
            debug!("{:?} is already registered for gestures", voter);
            false
        } else {
            route.consumer = Some(consumer);
            true
        }
    }

    /// Returns `false` if the voter had no consumer registered.
    pub fn unregister(&self, voter: VoterId) -> bool {
        let removed = self
            .routes()
            .get_mut(&voter)
            .and_then(|route| route.consumer.take())
            .is_some();
        if !removed {
            debug!("{:?} was not registered for gestures", voter);
        }
        removed
    }

    pub fn set_mask(&self, voter: VoterId, mask: GestureMask) {
        self.routes().entry(voter).or_default().mask = mask;
    }

    pub fn remove(&self, voter: VoterId) {
        self.routes().remove(&voter);
    }

    pub fn is_registered(&self, voter: VoterId) -> bool {
        self.routes()
            .get(&voter)
            .map(|route| route.consumer.is_some())
            .unwrap_or(false)
    }

    /// Consumers of voters whose mask contains the gesture.
    ///
    /// Collected under the lock and called after releasing it, so
    /// consumers may vote from inside their handlers.
    fn recipients(&self, event: &GestureEvent) -> Vec<Arc<dyn GestureConsumer>> {
        self.routes()
            .values()
            .filter(|route| route.mask.contains(event.kind()))
            .filter_map(|route| route.consumer.as_ref().and_then(Weak::upgrade))
            .collect()
    }

    fn routes(&self) -> MutexGuard<BTreeMap<VoterId, Route>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SensorEventListener for Dispatcher {
    fn on_sensor_changed(&self, event: SensorEvent) {
        let gesture = match GestureEvent::from_raw(&event) {
            Ok(gesture) => gesture,
            Err(err) => {
                debug!("Discarding malformed event {:?}: {}", event.values, err);
                return;
            }
        };

        let recipients = self.recipients(&gesture);
        trace!(
            "Delivering {} to {} consumer(s)",
            gesture.kind(),
            recipients.len()
        );
        for consumer in recipients {
            consumer.on_gesture(&gesture);
        }
    }
}
