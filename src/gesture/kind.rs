use serde::{Deserialize, Serialize};
use std::fmt;

/// Gesture classified by the IR gesture sensor.
///
/// The discriminants are the codes the hardware reports in
/// the second sample of each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    ObjectDetected = 1,
    ObjectNotDetected = 2,
    Swipe = 3,
    Approach = 4,
    Cover = 5,
    Depart = 6,
    Hover = 7,
    HoverPulse = 8,
    ProximityNone = 9,
    HoverFist = 10,
}

impl GestureKind {
    pub const ALL: [GestureKind; 10] = [
        GestureKind::ObjectDetected,
        GestureKind::ObjectNotDetected,
        GestureKind::Swipe,
        GestureKind::Approach,
        GestureKind::Cover,
        GestureKind::Depart,
        GestureKind::Hover,
        GestureKind::HoverPulse,
        GestureKind::ProximityNone,
        GestureKind::HoverFist,
    ];

    /// Looks up the kind for a hardware code, `None` if the
    /// code is not one the sensor is known to report.
    pub fn from_code(code: u32) -> Option<Self> {
        GestureKind::ALL.iter().copied().find(|k| k.code() == code)
    }

    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Bit of this kind in a `GestureMask`.
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GestureKind::ObjectDetected => "object detected",
            GestureKind::ObjectNotDetected => "object not detected",
            GestureKind::Swipe => "swipe",
            GestureKind::Approach => "approach",
            GestureKind::Cover => "cover",
            GestureKind::Depart => "depart",
            GestureKind::Hover => "hover",
            GestureKind::HoverPulse => "hover pulse",
            GestureKind::ProximityNone => "proximity none",
            GestureKind::HoverFist => "hover fist",
        };
        f.write_str(name)
    }
}
