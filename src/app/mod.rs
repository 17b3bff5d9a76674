mod builder;
pub mod script;
mod service;

use crate::acts::{Actuation, Actuations};
use crate::sensor::SimulatedSensor;
use crate::settings::Toggles;
use crate::state::{CallStateListener, ScreenStateNotifier, UpdatedStateNotifier};
use crate::util::time::{to_duration, Clock};

use failure::{bail, Error};
use log::{debug, info};
use script::{Screen, Script, Step};

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
use std::sync::Arc;

pub use builder::Builder;
pub use service::{Service, ServiceBuilder};

/// Replays scripts against a `Service` running on a simulated
/// IR gesture sensor and collects the actuations it triggers.
pub struct App {
    service: Service,
    sensor: Arc<SimulatedSensor>,
    settings: Arc<Toggles>,
    clock: Arc<dyn Clock>,
    actuations: Actuations,
    termination_flag: Arc<AtomicBool>,
}

/// What happened during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub silenced: usize,
    pub woken: usize,
    /// Gestures injected while the sensor was not subscribed.
    pub unheard: usize,
}

impl App {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn sensor(&self) -> &Arc<SimulatedSensor> {
        &self.sensor
    }

    /// Performs the steps of the script in order, stopping early if
    /// termination has been requested.
    ///
    /// Settings of the script are applied first.
    pub fn run(&mut self, script: &Script) -> Result<Summary, Error> {
        let mut summary = Summary::default();

        self.settings.apply(script.settings);
        self.service.update_state();

        for step in &script.steps {
            if self.should_terminate() {
                info!("termination requested, stopping replay");
                break;
            }

            self.perform(step, &mut summary)?;
            self.collect(&mut summary);
        }

        Ok(summary)
    }

    fn perform(&self, step: &Step, summary: &mut Summary) -> Result<(), Error> {
        debug!("step: {:?}", step);
        match step {
            Step::Screen(Screen::TurnedOn) => self.service.screen_turned_on(),
            Step::Screen(Screen::TurnedOff) => self.service.screen_turned_off(),
            Step::Call(state) => self.service.on_call_state_changed(*state, ""),
            Step::Gesture(kind) => {
                if !self.sensor.inject_gesture(*kind) {
                    debug!("nobody listened for {}", kind);
                    summary.unheard += 1;
                }
            }
            Step::Raw(values) => {
                if !self.sensor.inject(values.clone()) {
                    summary.unheard += 1;
                }
            }
            Step::Wait(secs) => self.wait(*secs)?,
            Step::Settings(spec) => {
                self.settings.apply(*spec);
                self.service.update_state();
            }
        }

        Ok(())
    }

    /// Lets `secs` pass on the clock, refusing waits that would
    /// move it past the last representable instant.
    fn wait(&self, secs: f64) -> Result<(), Error> {
        let duration = to_duration(secs)?;
        if self.clock.now().checked_add(duration).is_none() {
            bail!("Wait of {} seconds is too long to be replayed", secs)
        }

        self.clock.sleep(duration);
        Ok(())
    }

    fn collect(&self, summary: &mut Summary) {
        for actuation in self.actuations.drain() {
            match actuation {
                Actuation::SilenceRinger => summary.silenced += 1,
                Actuation::Wake => summary.woken += 1,
            }
        }
    }

    fn should_terminate(&self) -> bool {
        self.termination_flag.load(SeqCst)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "silenced ringer {} time(s), woke {} time(s), {} gesture(s) went unheard",
            self.silenced, self.woken, self.unheard
        )
    }
}
