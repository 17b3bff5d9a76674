use super::{App, Service};

use crate::acts::{Actuations, Ringer, SensorAction};
use crate::sensor::{SensorSubscription, SimulatedSensor};
use crate::settings::{Settings, Toggles};
use crate::util::time::{Clock, SystemClock};

use failure::Error;
use log::error;

use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
use std::sync::Arc;

pub struct Builder {
    settings: Toggles,
    clock: Arc<dyn Clock>,
    termination_flag: Arc<AtomicBool>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            settings: Toggles::new(),
            clock: Arc::new(SystemClock),
            // if never set up, termination flag never changes to true
            termination_flag: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Builder {
    pub fn new() -> Builder {
        Default::default()
    }

    /// Starting settings, scripts may still override them.
    pub fn settings(&mut self, settings: Toggles) -> &mut Self {
        self.settings = settings;
        self
    }

    /// Replaces the wall clock, e.g. to replay without actually
    /// waiting.
    pub fn clock(&mut self, clock: &Arc<dyn Clock>) -> &mut Self {
        self.clock = Arc::clone(clock);
        self
    }

    /// Sets a custom termination flag.
    pub fn termination_flag(&mut self, flag: &Arc<AtomicBool>) -> &mut Self {
        self.termination_flag = Arc::clone(flag);
        self
    }

    pub fn terminate_on_ctrlc_and_sigterm(&mut self) -> &mut Self {
        let termination_requested = Arc::new(AtomicBool::new(false));

        let termination_requested_handler_reference = Arc::clone(&termination_requested);
        let result = ctrlc::set_handler(move || {
            termination_requested_handler_reference.store(true, SeqCst);
        });

        match result {
            Ok(()) => self.termination_flag(&termination_requested),
            Err(e) => {
                error!(
                    "Failed to set up signal handler for safe termination. \
                     The replay will run to the end. \
                     Error: {:?}",
                    e
                );
                self
            }
        }
    }

    /// Consumes the builder and wires a service to a fresh
    /// simulated sensor.
    pub fn build(self) -> Result<App, Error> {
        let Builder {
            settings,
            clock,
            termination_flag,
        } = self;

        let sensor = Arc::new(SimulatedSensor::new());
        let settings = Arc::new(settings);
        let (actuations, sender) = Actuations::new();
        let sender = Arc::new(sender);

        let mut service = Service::builder();
        service
            .subscription(&(Arc::clone(&sensor) as Arc<dyn SensorSubscription>))
            .settings(&(Arc::clone(&settings) as Arc<dyn Settings>))
            .clock(&clock)
            .ringer(&(Arc::clone(&sender) as Arc<dyn Ringer>))
            .wake_action(&(sender as Arc<dyn SensorAction>));

        Ok(App {
            service: service.build()?,
            sensor,
            settings,
            clock,
            actuations,
            termination_flag,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app::script::{self, Screen, Step};
    use crate::app::Summary;
    use crate::gesture::GestureKind;
    use crate::util::time::ManualClock;
    use std::time::Duration;

    fn app() -> App {
        crate::log::init_test_logging();
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());
        let mut builder = App::builder();
        builder.clock(&clock);
        builder.build().unwrap()
    }

    #[test]
    fn build_with_default_settings() {
        // given
        let builder = App::builder();

        // when
        let app = builder.build().unwrap();

        // then
        assert!(!app.settings.is_ring_silencer_enabled());
        assert!(!app.settings.is_wake_gesture_enabled());
        assert_eq!(app.termination_flag.load(SeqCst), false);
        assert_eq!(app.sensor.active_mask(), None);
    }

    #[test]
    fn demo_replay() {
        // given
        let mut app = app();
        let demo = script::from_str(include_str!("../../resources/demo.yaml")).unwrap();

        // when
        let summary = app.run(&demo).unwrap();

        // then
        assert_eq!(
            summary,
            Summary {
                silenced: 1,
                woken: 3,
                unheard: 1,
            }
        );
        assert_eq!(app.sensor.active_mask(), None);
    }

    #[test]
    fn terminated_app_performs_nothing() {
        // given
        let mut app = app();
        app.termination_flag.store(true, SeqCst);
        let script = script::Script {
            steps: vec![Step::Gesture(GestureKind::Swipe)],
            ..Default::default()
        };

        // when
        let summary = app.run(&script).unwrap();

        // then
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn negative_wait_fails_replay() {
        let mut app = app();
        let script = script::Script {
            steps: vec![Step::Screen(Screen::TurnedOff), Step::Wait(-1.0)],
            ..Default::default()
        };

        assert!(app.run(&script).is_err());
    }

    #[test]
    fn unrepresentable_wait_fails_replay() {
        // given
        let clock = Arc::new(ManualClock::new());
        let mut builder = App::builder();
        builder.clock(&(Arc::clone(&clock) as Arc<dyn Clock>));
        let mut app = builder.build().unwrap();
        let script = script::Script {
            steps: vec![Step::Wait(1e19), Step::Wait(0.5)],
            ..Default::default()
        };

        // when
        let result = app.run(&script);

        // then
        assert!(result.is_err());
        assert_eq!(clock.elapsed(), Duration::from_millis(0));
    }
}
