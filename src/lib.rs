//! Lets independent phone features share the IR gesture sensor.
//!
//! Features vote for the gestures they need in a
//! `SensorVoteRegistry`, which keeps a single hardware
//! subscription for the union of all votes and routes gestures
//! back to the features that asked for them. `RingSilencer` and
//! `ScreenWakeGesture` are the two features built on it, driven by
//! call state and screen state notifications.
//!
//! `App` replays scripted notifications and gestures against a
//! simulated sensor, for the runner in `main.rs` and for tests.

#[cfg(test)]
mod testutil;

pub mod acts;
pub mod app;
pub mod consumers;
pub mod gesture;
pub mod log;
pub mod sensor;
pub mod settings;
pub mod state;
pub mod util;

pub use app::{App, Builder as AppBuilder, Service, Summary};
pub use consumers::{RingSilencer, ScreenWakeGesture};
pub use gesture::{GestureEvent, GestureKind, GestureMask};
pub use sensor::{SensorSubscription, SensorVoteRegistry};
