use crate::gesture::GestureMask;
use crate::sensor::SensorId;
use failure::Fail;

#[derive(Debug, Fail)]
pub enum Error {
    /// The vote was recorded, but the hardware did not accept the
    /// subscription. The next vote on the registry tries again.
    #[fail(display = "failed to activate {} for gestures {:?}: {}", sensor, mask, cause)]
    ActivationFailed {
        sensor: SensorId,
        mask: GestureMask,
        cause: failure::Error,
    },
    /// The vote was recorded, but the active subscription still
    /// uses the previous mask.
    #[fail(display = "failed to reconfigure {} for gestures {:?}: {}", sensor, mask, cause)]
    ReconfigurationFailed {
        sensor: SensorId,
        mask: GestureMask,
        cause: failure::Error,
    },
}

impl Error {
    pub fn activation_failed(sensor: SensorId, mask: GestureMask, cause: failure::Error) -> Self {
        Error::ActivationFailed {
            sensor,
            mask,
            cause,
        }
    }

    pub fn reconfiguration_failed(
        sensor: SensorId,
        mask: GestureMask,
        cause: failure::Error,
    ) -> Self {
        Error::ReconfigurationFailed {
            sensor,
            mask,
            cause,
        }
    }
}
