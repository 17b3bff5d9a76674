/// Silences the ringer of an incoming call.
///
/// Silencing an already silent ringer does nothing, so it is fine
/// to call this repeatedly.
pub trait Ringer: Send + Sync {
    fn silence_ringer(&self);
}

/// Action bound to a sensor gesture, e.g. waking the display.
///
/// Invoked from the consumer's gesture handler. Must be cheap and
/// safe to repeat.
pub trait SensorAction: Send + Sync {
    fn action(&self);
}
