use crate::acts::SensorAction;
use crate::gesture::{GestureConsumer, GestureEvent, GestureKind, GestureMask};
use crate::sensor::{SensorVoteRegistry, Vote};
use crate::settings::Settings;
use crate::state::ScreenStateNotifier;
use derivative::Derivative;
use log::{debug, error};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

const GESTURES_FOR_SCREEN_OFF: GestureMask =
    GestureMask::single(GestureKind::Swipe).with(GestureKind::Approach);

/// Runs an action, typically waking the display, when a hand
/// swipes over or approaches the phone while the screen is off.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct ScreenWakeGesture {
    #[derivative(Debug = "ignore")]
    me: Weak<ScreenWakeGesture>,
    #[derivative(Debug = "ignore")]
    settings: Arc<dyn Settings>,
    #[derivative(Debug = "ignore")]
    action: Arc<dyn SensorAction>,
    vote: Vote,
    /// `true` while the screen is off and gestures are wanted.
    enabled: Mutex<bool>,
}

impl ScreenWakeGesture {
    pub fn new(
        settings: Arc<dyn Settings>,
        registry: &Arc<SensorVoteRegistry>,
        action: Arc<dyn SensorAction>,
    ) -> Arc<Self> {
        let vote = registry.enroll();
        Arc::new_cyclic(|me| ScreenWakeGesture {
            me: me.clone(),
            settings,
            action,
            vote,
            enabled: Mutex::new(false),
        })
    }

    pub fn is_enabled(&self) -> bool {
        *self.enabled()
    }

    pub fn vote(&self) -> &Vote {
        &self.vote
    }

    fn enabled(&self) -> MutexGuard<bool> {
        self.enabled.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScreenStateNotifier for ScreenWakeGesture {
    fn screen_turned_on(&self) {
        let mut enabled = self.enabled();
        if *enabled {
            debug!("Disabling");
            self.vote.unlisten();
            if let Err(e) = self.vote.vote_for(GestureMask::EMPTY) {
                error!("Failed to withdraw vote for wake gestures: {}", e);
            }
            *enabled = false;
        }
    }

    fn screen_turned_off(&self) {
        let mut enabled = self.enabled();
        if !*enabled && self.settings.is_wake_gesture_enabled() {
            debug!("Enabling");
            let me: Weak<dyn GestureConsumer> = self.me.clone();
            self.vote.listen(me);
            if let Err(e) = self.vote.vote_for(GESTURES_FOR_SCREEN_OFF) {
                error!("Wake gestures may not work: {}", e);
            }
            *enabled = true;
        }
    }
}

impl GestureConsumer for ScreenWakeGesture {
    fn on_gesture(&self, event: &GestureEvent) {
        let enabled = self.enabled();
        if *enabled && GESTURES_FOR_SCREEN_OFF.contains(event.kind()) {
            debug!(
                "event: [{}]: {:?}",
                event.values().len(),
                event.values()
            );
            self.action.action();
        }
    }
}
