//! Scripts of notifications and gestures to replay against a
//! simulated sensor.
use crate::gesture::GestureKind;
use crate::settings::SettingsSpec;
use crate::state::CallState;

use failure::Error;
use serde::{Deserialize, Serialize};

use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Script {
    /// Applied before the first step.
    pub settings: SettingsSpec,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Screen(Screen),
    Call(CallState),
    /// A well-formed event of the given kind.
    Gesture(GestureKind),
    /// Raw samples exactly as the hardware would send them.
    Raw(Vec<f32>),
    /// Seconds to let pass.
    Wait(f64),
    /// Changes settings and notifies consumers about it.
    Settings(SettingsSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    TurnedOn,
    TurnedOff,
}

pub fn from_path(source_file: impl AsRef<Path>) -> Result<Script, Error> {
    file::load(source_file)
}

pub fn from_str(source_string: impl AsRef<str>) -> Result<Script, Error> {
    Ok(serde_yaml::from_str(source_string.as_ref())?)
}

mod file {
    use super::Script;
    use failure::Error;
    use serde_yaml::from_reader;
    use std::fs::File;
    use std::path::Path;

    pub fn load<P: AsRef<Path>>(source_file: P) -> Result<Script, Error> {
        let mut source_file = File::open(source_file.as_ref())?;
        let script = from_reader(&mut source_file)?;
        Ok(script)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_parse_demo() {
        let script = from_str(include_str!("../../resources/demo.yaml")).unwrap();

        assert_eq!(script.settings.ring_silencer, Some(true));
        assert_eq!(script.steps[0], Step::Screen(Screen::TurnedOff));
    }

    #[test]
    fn every_step_kind() {
        // given
        let yaml = "---
settings:
  wake_gesture: true
steps:
  - screen: turned_off
  - gesture: approach
  - raw: [0.0, 3.0, 1.5]
  - wait: 0.25
  - call: ringing
  - settings:
      ring_silencer: false
  - screen: turned_on";

        // when
        let script = from_str(yaml).unwrap();

        // then
        assert_eq!(
            script.steps,
            vec![
                Step::Screen(Screen::TurnedOff),
                Step::Gesture(GestureKind::Approach),
                Step::Raw(vec![0.0, 3.0, 1.5]),
                Step::Wait(0.25),
                Step::Call(CallState::Ringing),
                Step::Settings(SettingsSpec {
                    ring_silencer: Some(false),
                    wake_gesture: None,
                }),
                Step::Screen(Screen::TurnedOn),
            ]
        );
    }

    #[test]
    fn unknown_gesture_errs() {
        assert!(from_str("steps:\n  - gesture: wave").is_err());
    }
}
