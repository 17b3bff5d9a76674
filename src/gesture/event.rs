use crate::gesture::{Error, GestureKind};
use crate::sensor::SensorEvent;
use std::time::Instant;

/// Index of the sample carrying the gesture code.
const KIND_SAMPLE: usize = 1;

/// A raw sensor event that was recognized as a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    kind: GestureKind,
    values: Vec<f32>,
    timestamp: Instant,
}

impl GestureEvent {
    pub fn new(kind: GestureKind, values: Vec<f32>, timestamp: Instant) -> Self {
        GestureEvent {
            kind,
            values,
            timestamp,
        }
    }

    /// Reads the gesture kind from the second sample of the
    /// raw event.
    ///
    /// The hardware stream is not validated anywhere upstream,
    /// so short events, non-finite samples and codes outside the
    /// known set are all reported as errors here.
    pub fn from_raw(event: &SensorEvent) -> Result<Self, Error> {
        let code = event
            .values
            .get(KIND_SAMPLE)
            .copied()
            .ok_or_else(|| Error::MissingSample {
                index: KIND_SAMPLE,
                len: event.values.len(),
            })?;

        if !code.is_finite() {
            return Err(Error::NonFinite { index: KIND_SAMPLE });
        }

        let kind = if code >= 0.0 {
            GestureKind::from_code(code.trunc() as u32)
        } else {
            None
        };

        kind.map(|kind| GestureEvent::new(kind, event.values.clone(), event.timestamp))
            .ok_or(Error::UnknownKind { code })
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }
}
