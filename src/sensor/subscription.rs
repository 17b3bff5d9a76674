use crate::gesture::GestureMask;
use failure::Error;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Maximum time the hardware may hold back events to batch them.
pub const BATCH_LATENCY: Duration = Duration::from_millis(100);

/// Vendor sensor type of a hardware sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorId(pub u32);

impl SensorId {
    pub const FLAT_UP: SensorId = SensorId(65537);
    pub const FLAT_DOWN: SensorId = SensorId(65538);
    pub const STOW: SensorId = SensorId(65539);
    pub const IR_GESTURE: SensorId = SensorId(65541);
    pub const IR_OBJECT: SensorId = SensorId(65543);
    pub const CHOP_CHOP: SensorId = SensorId(65546);
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "sensor type {}", self.0)
    }
}

/// Event as delivered by the sensor hardware, before it has
/// been interpreted as a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    pub sensor: SensorId,
    pub values: Vec<f32>,
    pub timestamp: Instant,
}

impl SensorEvent {
    pub fn new(sensor: SensorId, values: Vec<f32>, timestamp: Instant) -> Self {
        SensorEvent {
            sensor,
            values,
            timestamp,
        }
    }
}

/// Target for raw events of an active subscription.
pub trait SensorEventListener: Send + Sync {
    fn on_sensor_changed(&self, event: SensorEvent);
}

/// The only gateway to the sensor hardware.
///
/// Implementations are called with the registry lock held and
/// should return quickly.
pub trait SensorSubscription: Send + Sync {
    /// Starts delivering events of the sensor to `target`, asking
    /// the hardware for the gestures in `mask`.
    ///
    /// Returns an error if the hardware refused, e.g. because it is
    /// busy or access is denied.
    fn activate(
        &self,
        sensor: SensorId,
        mask: GestureMask,
        target: Arc<dyn SensorEventListener>,
    ) -> Result<(), Error>;

    /// Changes the requested gestures of an active subscription.
    ///
    /// Hardware that always reports every gesture can keep the
    /// default, which does nothing.
    fn reconfigure(&self, _sensor: SensorId, _mask: GestureMask) -> Result<(), Error> {
        Ok(())
    }

    /// Stops delivering events to `target`.
    fn deactivate(&self, sensor: SensorId, target: &Arc<dyn SensorEventListener>);
}
