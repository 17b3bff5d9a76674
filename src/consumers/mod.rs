//! The features that share the IR gesture sensor.
//!
//! Each consumer owns one vote and serializes its state changes
//! and gesture handling behind its own lock.
mod ring_silencer;
mod screen_wake;

pub use ring_silencer::{Ring, RingSilencer, SILENCE_DELAY};
pub use screen_wake::ScreenWakeGesture;
