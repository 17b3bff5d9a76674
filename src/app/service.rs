use crate::acts::{Ringer, SensorAction};
use crate::consumers::{RingSilencer, ScreenWakeGesture};
use crate::sensor::{SensorId, SensorSubscription, SensorVoteRegistry};
use crate::settings::{Settings, Toggles};
use crate::state::{CallState, CallStateListener, ScreenStateNotifier, UpdatedStateNotifier};
use crate::util::time::{Clock, SystemClock};

use derivative::Derivative;
use failure::{bail, Error};
use log::debug;

use std::sync::Arc;

/// The IR gesture sensor shared by the ring silencer and the
/// screen wake gesture, together with the fan-out of the call,
/// screen and settings notifications they react to.
///
/// Created once at startup. Dropping it withdraws all votes.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Service {
    #[derivative(Debug = "ignore")]
    registry: Arc<SensorVoteRegistry>,
    ring_silencer: Arc<RingSilencer>,
    screen_wake: Arc<ScreenWakeGesture>,
    #[derivative(Debug = "ignore")]
    screen_notifiers: Vec<Arc<dyn ScreenStateNotifier>>,
    #[derivative(Debug = "ignore")]
    call_listeners: Vec<Arc<dyn CallStateListener>>,
    #[derivative(Debug = "ignore")]
    updated_notifiers: Vec<Arc<dyn UpdatedStateNotifier>>,
}

impl Service {
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    pub fn registry(&self) -> &Arc<SensorVoteRegistry> {
        &self.registry
    }

    pub fn ring_silencer(&self) -> &Arc<RingSilencer> {
        &self.ring_silencer
    }

    pub fn screen_wake(&self) -> &Arc<ScreenWakeGesture> {
        &self.screen_wake
    }
}

impl ScreenStateNotifier for Service {
    fn screen_turned_on(&self) {
        debug!("Screen turned on");
        for notifier in &self.screen_notifiers {
            notifier.screen_turned_on();
        }
    }

    fn screen_turned_off(&self) {
        debug!("Screen turned off");
        for notifier in &self.screen_notifiers {
            notifier.screen_turned_off();
        }
    }
}

impl CallStateListener for Service {
    fn on_call_state_changed(&self, state: CallState, incoming_number: &str) {
        debug!("Call state changed to {:?}", state);
        for listener in &self.call_listeners {
            listener.on_call_state_changed(state, incoming_number);
        }
    }
}

impl UpdatedStateNotifier for Service {
    fn update_state(&self) {
        for notifier in &self.updated_notifiers {
            notifier.update_state();
        }
    }
}

pub struct ServiceBuilder {
    sensor: SensorId,
    subscription: Option<Arc<dyn SensorSubscription>>,
    settings: Arc<dyn Settings>,
    clock: Arc<dyn Clock>,
    ringer: Option<Arc<dyn Ringer>>,
    wake_action: Option<Arc<dyn SensorAction>>,
    screen_notifiers: Vec<Arc<dyn ScreenStateNotifier>>,
    call_listeners: Vec<Arc<dyn CallStateListener>>,
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        ServiceBuilder {
            sensor: SensorId::IR_GESTURE,
            subscription: None,
            // everything off until configured
            settings: Arc::new(Toggles::new()),
            clock: Arc::new(SystemClock),
            ringer: None,
            wake_action: None,
            screen_notifiers: Vec::new(),
            call_listeners: Vec::new(),
        }
    }
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Arbitrates a sensor other than the IR gesture sensor.
    pub fn sensor(&mut self, sensor: SensorId) -> &mut Self {
        self.sensor = sensor;
        self
    }

    pub fn subscription(&mut self, subscription: &Arc<dyn SensorSubscription>) -> &mut Self {
        self.subscription = Some(Arc::clone(subscription));
        self
    }

    pub fn settings(&mut self, settings: &Arc<dyn Settings>) -> &mut Self {
        self.settings = Arc::clone(settings);
        self
    }

    pub fn clock(&mut self, clock: &Arc<dyn Clock>) -> &mut Self {
        self.clock = Arc::clone(clock);
        self
    }

    pub fn ringer(&mut self, ringer: &Arc<dyn Ringer>) -> &mut Self {
        self.ringer = Some(Arc::clone(ringer));
        self
    }

    pub fn wake_action(&mut self, action: &Arc<dyn SensorAction>) -> &mut Self {
        self.wake_action = Some(Arc::clone(action));
        self
    }

    /// Also forwards screen changes to the given notifier.
    pub fn screen_notifier(&mut self, notifier: Arc<dyn ScreenStateNotifier>) -> &mut Self {
        self.screen_notifiers.push(notifier);
        self
    }

    /// Also forwards call state changes to the given listener.
    pub fn call_listener(&mut self, listener: Arc<dyn CallStateListener>) -> &mut Self {
        self.call_listeners.push(listener);
        self
    }

    /// Consumes the builder and creates both consumers with empty
    /// votes.
    ///
    /// Fails if the subscription or one of the actions is missing.
    pub fn build(self) -> Result<Service, Error> {
        let ServiceBuilder {
            sensor,
            subscription,
            settings,
            clock,
            ringer,
            wake_action,
            mut screen_notifiers,
            mut call_listeners,
        } = self;

        let subscription = match subscription {
            Some(subscription) => subscription,
            None => bail!("No sensor subscription configured"),
        };
        let ringer = match ringer {
            Some(ringer) => ringer,
            None => bail!("No ringer configured"),
        };
        let wake_action = match wake_action {
            Some(action) => action,
            None => bail!("No wake action configured"),
        };

        let registry = SensorVoteRegistry::new(sensor, subscription);
        let ring_silencer = RingSilencer::new(Arc::clone(&settings), &registry, ringer, clock);
        let screen_wake = ScreenWakeGesture::new(settings, &registry, wake_action);

        screen_notifiers.insert(0, Arc::clone(&screen_wake) as Arc<dyn ScreenStateNotifier>);
        call_listeners.insert(0, Arc::clone(&ring_silencer) as Arc<dyn CallStateListener>);
        let updated_notifiers: Vec<Arc<dyn UpdatedStateNotifier>> =
            vec![Arc::clone(&ring_silencer) as Arc<dyn UpdatedStateNotifier>];

        Ok(Service {
            registry,
            ring_silencer,
            screen_wake,
            screen_notifiers,
            call_listeners,
            updated_notifiers,
        })
    }
}
