use crate::acts::{Ringer, SensorAction};
use crate::gesture::{GestureConsumer, GestureEvent, GestureKind, GestureMask};
use crate::sensor::{SensorEvent, SensorEventListener, SensorId, SensorSubscription};
use failure::{bail, Error};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering::SeqCst};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Subscription that remembers what the registry asked of it.
#[derive(Default)]
pub struct RecordingSubscription {
    activations: AtomicUsize,
    deactivations: AtomicUsize,
    reconfigurations: Mutex<Vec<GestureMask>>,
    active: Mutex<Option<(GestureMask, Arc<dyn SensorEventListener>)>>,
    refuse: AtomicBool,
}

impl RecordingSubscription {
    /// Number of successful activations.
    pub fn activations(&self) -> usize {
        self.activations.load(SeqCst)
    }

    pub fn deactivations(&self) -> usize {
        self.deactivations.load(SeqCst)
    }

    /// Masks of successful reconfigurations in call order.
    pub fn reconfigurations(&self) -> Vec<GestureMask> {
        self.reconfigurations.lock().unwrap().clone()
    }

    pub fn mask(&self) -> Option<GestureMask> {
        self.active.lock().unwrap().as_ref().map(|(mask, _)| *mask)
    }

    pub fn refuse(&self, refuse: bool) {
        self.refuse.store(refuse, SeqCst)
    }

    /// Sends raw samples to the active target, if any.
    pub fn deliver(&self, values: &[f32]) {
        let target = self
            .active
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, target)| Arc::clone(target));

        if let Some(target) = target {
            target.on_sensor_changed(SensorEvent::new(
                SensorId::IR_GESTURE,
                values.to_vec(),
                Instant::now(),
            ));
        }
    }
}

impl SensorSubscription for RecordingSubscription {
    fn activate(
        &self,
        _sensor: SensorId,
        mask: GestureMask,
        target: Arc<dyn SensorEventListener>,
    ) -> Result<(), Error> {
        if self.refuse.load(SeqCst) {
            bail!("refused activation")
        }
        self.activations.fetch_add(1, SeqCst);
        *self.active.lock().unwrap() = Some((mask, target));
        Ok(())
    }

    fn reconfigure(&self, _sensor: SensorId, mask: GestureMask) -> Result<(), Error> {
        if self.refuse.load(SeqCst) {
            bail!("refused reconfiguration")
        }
        self.reconfigurations.lock().unwrap().push(mask);
        if let Some((active_mask, _)) = self.active.lock().unwrap().as_mut() {
            *active_mask = mask;
        }
        Ok(())
    }

    fn deactivate(&self, _sensor: SensorId, _target: &Arc<dyn SensorEventListener>) {
        self.deactivations.fetch_add(1, SeqCst);
        *self.active.lock().unwrap() = None;
    }
}

/// Consumer that records the kinds it received.
#[derive(Default)]
pub struct GestureLog(Mutex<Vec<GestureKind>>);

impl GestureLog {
    pub fn kinds(&self) -> Vec<GestureKind> {
        self.0.lock().unwrap().clone()
    }
}

impl GestureConsumer for GestureLog {
    fn on_gesture(&self, event: &GestureEvent) {
        self.0.lock().unwrap().push(event.kind());
    }
}

/// Ringer and wake action counting its invocations.
#[derive(Default)]
pub struct Counter(AtomicUsize);

impl Counter {
    pub fn count(&self) -> usize {
        self.0.load(SeqCst)
    }
}

impl Ringer for Counter {
    fn silence_ringer(&self) {
        self.0.fetch_add(1, SeqCst);
    }
}

impl SensorAction for Counter {
    fn action(&self) {
        self.0.fetch_add(1, SeqCst);
    }
}

pub fn gesture(kind: GestureKind) -> GestureEvent {
    GestureEvent::new(kind, vec![0.0, kind.code() as f32, 0.0], Instant::now())
}
