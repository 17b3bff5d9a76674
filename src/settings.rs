//! Feature switches for the gesture consumers.
//!
//! Consumers ask on every transition instead of caching the answer,
//! so switches flipped at runtime take effect on the next ring or
//! the next time the screen turns off.
use failure::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};

pub trait Settings: Send + Sync {
    fn is_ring_silencer_enabled(&self) -> bool;
    fn is_wake_gesture_enabled(&self) -> bool;
}

/// Settings that can be flipped at runtime.
///
/// Everything starts out disabled.
#[derive(Debug, Default)]
pub struct Toggles {
    ring_silencer: AtomicBool,
    wake_gesture: AtomicBool,
}

/// Serialized form of the settings. Missing keys leave the
/// current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsSpec {
    pub ring_silencer: Option<bool>,
    pub wake_gesture: Option<bool>,
}

impl Toggles {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_spec(spec: SettingsSpec) -> Self {
        let toggles = Toggles::new();
        toggles.apply(spec);
        toggles
    }

    pub fn set_ring_silencer_enabled(&self, enabled: bool) {
        self.ring_silencer.store(enabled, SeqCst)
    }

    pub fn set_wake_gesture_enabled(&self, enabled: bool) {
        self.wake_gesture.store(enabled, SeqCst)
    }

    pub fn apply(&self, spec: SettingsSpec) {
        if let Some(enabled) = spec.ring_silencer {
            self.set_ring_silencer_enabled(enabled);
        }
        if let Some(enabled) = spec.wake_gesture {
            self.set_wake_gesture_enabled(enabled);
        }
    }
}

impl Settings for Toggles {
    fn is_ring_silencer_enabled(&self) -> bool {
        self.ring_silencer.load(SeqCst)
    }

    fn is_wake_gesture_enabled(&self) -> bool {
        self.wake_gesture.load(SeqCst)
    }
}

pub fn from_path(source_file: impl AsRef<Path>) -> Result<Toggles, Error> {
    file::load(source_file).map(Toggles::from_spec)
}

pub fn from_str(source_string: impl AsRef<str>) -> Result<Toggles, Error> {
    let spec = serde_yaml::from_str(source_string.as_ref())?;
    Ok(Toggles::from_spec(spec))
}

mod file {
    use super::SettingsSpec;
    use failure::Error;
    use serde_yaml::from_reader;
    use std::fs::File;
    use std::path::Path;

    pub fn load<P: AsRef<Path>>(source_file: P) -> Result<SettingsSpec, Error> {
        let mut source_file = File::open(source_file.as_ref())?;
        let spec = from_reader(&mut source_file)?;
        Ok(spec)
    }
}
