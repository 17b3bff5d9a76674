mod act;
mod queue;

pub use act::{Ringer, SensorAction};
pub use queue::{Actuation, ActuationSender, Actuations};
