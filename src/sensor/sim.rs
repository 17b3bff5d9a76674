use crate::gesture::{GestureKind, GestureMask};
use crate::sensor::{
    SensorEvent, SensorEventListener, SensorId, SensorSubscription, BATCH_LATENCY,
};
use failure::{bail, Error};
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// In-memory stand-in for the sensor service.
///
/// Events are only delivered while some registry keeps the
/// subscription active, the same way the hardware stays silent
/// when nobody listens.
#[derive(Default)]
pub struct SimulatedSensor {
    active: Mutex<Option<Active>>,
    refuse: AtomicBool,
}

struct Active {
    sensor: SensorId,
    mask: GestureMask,
    target: Arc<dyn SensorEventListener>,
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes subsequent activations and reconfigurations fail
    /// as if the hardware were busy.
    pub fn refuse_activation(&self, refuse: bool) {
        self.refuse.store(refuse, SeqCst);
    }

    pub fn active_mask(&self) -> Option<GestureMask> {
        self.active().as_ref().map(|a| a.mask)
    }

    /// Delivers raw samples to the active subscription on the
    /// calling thread.
    ///
    /// Returns `false` if no subscription was active and the
    /// event got lost.
    pub fn inject(&self, values: Vec<f32>) -> bool {
        let delivery = self
            .active()
            .as_ref()
            .map(|a| (a.sensor, Arc::clone(&a.target)));

        match delivery {
            Some((sensor, target)) => {
                target.on_sensor_changed(SensorEvent::new(sensor, values, Instant::now()));
                true
            }
            None => {
                trace!("Sensor inactive, dropping event {:?}", values);
                false
            }
        }
    }

    /// Delivers a well-formed event for the gesture.
    pub fn inject_gesture(&self, kind: GestureKind) -> bool {
        self.inject(vec![0.0, kind.code() as f32, 0.0])
    }

    fn check_refusal(&self, sensor: SensorId) -> Result<(), Error> {
        if self.refuse.load(SeqCst) {
            bail!("{} is busy", sensor)
        }
        Ok(())
    }

    fn active(&self) -> MutexGuard<Option<Active>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SensorSubscription for SimulatedSensor {
    fn activate(
        &self,
        sensor: SensorId,
        mask: GestureMask,
        target: Arc<dyn SensorEventListener>,
    ) -> Result<(), Error> {
        self.check_refusal(sensor)?;
        debug!(
            "Simulating {} for {:?}, batch latency {:?}",
            sensor, mask, BATCH_LATENCY
        );
        *self.active() = Some(Active {
            sensor,
            mask,
            target,
        });
        Ok(())
    }

    fn reconfigure(&self, sensor: SensorId, mask: GestureMask) -> Result<(), Error> {
        self.check_refusal(sensor)?;
        if let Some(active) = self.active().as_mut() {
            active.mask = mask;
        }
        Ok(())
    }

    fn deactivate(&self, sensor: SensorId, target: &Arc<dyn SensorEventListener>) {
        let mut active = self.active();
        let matches = active
            .as_ref()
            .map(|a| a.sensor == sensor && Arc::ptr_eq(&a.target, target))
            .unwrap_or(false);
        if matches {
            debug!("Stopped simulating {}", sensor);
            *active = None;
        }
    }
}
