use crate::acts::Ringer;
use crate::gesture::{GestureConsumer, GestureEvent, GestureKind, GestureMask};
use crate::sensor::{SensorVoteRegistry, Vote};
use crate::settings::Settings;
use crate::state::{CallState, CallStateListener, UpdatedStateNotifier};
use crate::util::time::Clock;
use derivative::Derivative;
use log::{debug, error, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

/// Swipes this soon after the ring started are not taken as a
/// request to silence it.
pub const SILENCE_DELAY: Duration = Duration::from_millis(500);

const GESTURES_FOR_RINGING: GestureMask = GestureMask::single(GestureKind::Swipe);

/// Silences an incoming call when a hand swipes over the phone.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct RingSilencer {
    #[derivative(Debug = "ignore")]
    me: Weak<RingSilencer>,
    #[derivative(Debug = "ignore")]
    settings: Arc<dyn Settings>,
    #[derivative(Debug = "ignore")]
    ringer: Arc<dyn Ringer>,
    #[derivative(Debug = "ignore")]
    clock: Arc<dyn Clock>,
    vote: Vote,
    line: Mutex<Line>,
}

/// Ring state along with the last reported call state, which may
/// be ringing while the silencer is disabled.
#[derive(Debug)]
struct Line {
    ring: Ring,
    call: CallState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    /// Not ringing, not listening for gestures.
    Idle,
    /// Ringing and listening for swipes since `started`.
    Ringing { started: Instant },
}

impl RingSilencer {
    pub fn new(
        settings: Arc<dyn Settings>,
        registry: &Arc<SensorVoteRegistry>,
        ringer: Arc<dyn Ringer>,
        clock: Arc<dyn Clock>,
    ) -> Arc<Self> {
        let vote = registry.enroll();
        Arc::new_cyclic(|me| RingSilencer {
            me: me.clone(),
            settings,
            ringer,
            clock,
            vote,
            line: Mutex::new(Line {
                ring: Ring::Idle,
                call: CallState::Idle,
            }),
        })
    }

    pub fn state(&self) -> Ring {
        self.line().ring
    }

    pub fn vote(&self) -> &Vote {
        &self.vote
    }

    fn arm(&self, line: &mut Line) {
        self.start_listening();
        line.ring = Ring::Ringing {
            started: self.clock.now(),
        };
    }

    fn disarm(&self, line: &mut Line) {
        self.stop_listening();
        line.ring = Ring::Idle;
    }

    fn start_listening(&self) {
        let me: Weak<dyn GestureConsumer> = self.me.clone();
        self.vote.listen(me);
        if let Err(e) = self.vote.vote_for(GESTURES_FOR_RINGING) {
            error!("Swipes may not silence the ringer: {}", e);
        }
    }

    fn stop_listening(&self) {
        self.vote.unlisten();
        if let Err(e) = self.vote.vote_for(GestureMask::EMPTY) {
            error!("Failed to withdraw vote for swipes: {}", e);
        }
    }

    fn line(&self) -> MutexGuard<Line> {
        self.line.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CallStateListener for RingSilencer {
    fn on_call_state_changed(&self, state: CallState, _incoming_number: &str) {
        let mut line = self.line();
        line.call = state;
        match (line.ring, state.is_ringing()) {
            (Ring::Idle, true) => {
                if !self.settings.is_ring_silencer_enabled() {
                    debug!("Ringing started, but silencing by gesture is disabled");
                    return;
                }
                debug!("Ringing started");
                self.arm(&mut line);
            }
            (Ring::Ringing { .. }, false) => {
                debug!("Ringing stopped");
                self.disarm(&mut line);
            }
            _ => (),
        }
    }
}

impl UpdatedStateNotifier for RingSilencer {
    fn update_state(&self) {
        let mut line = self.line();
        let enabled = self.settings.is_ring_silencer_enabled();
        match (line.ring, enabled) {
            (Ring::Ringing { .. }, false) => {
                debug!("Silencing by gesture disabled while ringing");
                self.disarm(&mut line);
            }
            (Ring::Idle, true) if line.call.is_ringing() => {
                debug!("Silencing by gesture enabled while ringing");
                self.arm(&mut line);
            }
            _ => (),
        }
    }
}

impl GestureConsumer for RingSilencer {
    fn on_gesture(&self, event: &GestureEvent) {
        let line = self.line();
        let started = match line.ring {
            Ring::Ringing { started } if event.kind() == GestureKind::Swipe => started,
            _ => return,
        };

        debug!("event: [{}]: {:?}", event.values().len(), event.values());
        let now = self.clock.now();
        let since_ring = now.saturating_duration_since(started);
        if since_ring >= SILENCE_DELAY {
            info!("Silencing ringer");
            self.ringer.silence_ringer();
        } else {
            debug!(
                "Ignoring silence gesture {:?} after ring started, delay={:?}",
                since_ring, SILENCE_DELAY
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gesture::GestureKind::*;
    use crate::sensor::SensorId;
    use crate::settings::Toggles;
    use crate::testutil::{gesture, Counter, RecordingSubscription};
    use crate::util::time::ManualClock;

    struct Fixture {
        silencer: Arc<RingSilencer>,
        registry: Arc<SensorVoteRegistry>,
        subscription: Arc<RecordingSubscription>,
        settings: Arc<Toggles>,
        ringer: Arc<Counter>,
        clock: Arc<ManualClock>,
    }

    fn fixture() -> Fixture {
        crate::log::init_test_logging();
        let subscription = Arc::new(RecordingSubscription::default());
        let registry = SensorVoteRegistry::new(SensorId::IR_GESTURE, subscription.clone());
        let settings = Arc::new(Toggles::new());
        settings.set_ring_silencer_enabled(true);
        let ringer = Arc::new(Counter::default());
        let clock = Arc::new(ManualClock::new());
        let silencer = RingSilencer::new(
            settings.clone(),
            &registry,
            ringer.clone(),
            clock.clone(),
        );
        Fixture {
            silencer,
            registry,
            subscription,
            settings,
            ringer,
            clock,
        }
    }

    #[test]
    fn starts_idle_without_vote() {
        let f = fixture();

        assert_eq!(f.silencer.state(), Ring::Idle);
        assert!(f.registry.current_combined_mask().is_empty());
        assert_eq!(f.subscription.activations(), 0);
    }

    #[test]
    fn ringing_votes_for_swipes() {
        // given
        let f = fixture();

        // when
        f.silencer.on_call_state_changed(CallState::Ringing, "");

        // then
        assert_eq!(
            f.silencer.state(),
            Ring::Ringing {
                started: f.clock.now()
            }
        );
        assert_eq!(f.registry.current_combined_mask(), Swipe.into());
        assert!(f.registry.is_registered(f.silencer.vote().voter()));
        assert_eq!(f.subscription.activations(), 1);
    }

    #[test]
    fn swipe_at_delay_silences() {
        // given
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");

        // when
        f.clock.advance(SILENCE_DELAY);
        f.silencer.on_gesture(&gesture(Swipe));

        // then
        assert_eq!(f.ringer.count(), 1);
    }

    #[test]
    fn swipe_just_before_delay_is_ignored() {
        // given
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");

        // when
        f.clock.advance(Duration::from_millis(499));
        f.silencer.on_gesture(&gesture(Swipe));

        // then
        assert_eq!(f.ringer.count(), 0);
    }

    #[test]
    fn every_late_swipe_silences_again() {
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");
        f.clock.advance(Duration::from_secs(1));

        f.silencer.on_gesture(&gesture(Swipe));
        f.silencer.on_gesture(&gesture(Swipe));

        assert_eq!(f.ringer.count(), 2);
    }

    #[test]
    fn only_swipes_silence() {
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");
        f.clock.advance(Duration::from_secs(1));

        f.silencer.on_gesture(&gesture(Approach));
        f.silencer.on_gesture(&gesture(Cover));

        assert_eq!(f.ringer.count(), 0);
    }

    #[test]
    fn swipes_while_idle_are_ignored() {
        let f = fixture();

        f.clock.advance(Duration::from_secs(1));
        f.silencer.on_gesture(&gesture(Swipe));

        assert_eq!(f.ringer.count(), 0);
    }

    #[test]
    fn ringing_twice_keeps_start_time() {
        // given
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");
        let first = f.silencer.state();

        // when
        f.clock.advance(Duration::from_millis(300));
        f.silencer.on_call_state_changed(CallState::Ringing, "");

        // then
        assert_eq!(f.silencer.state(), first);
        assert_eq!(f.subscription.activations(), 1);
        assert!(f.subscription.reconfigurations().is_empty());

        // and the delay still counts from the first notification
        f.clock.advance(Duration::from_millis(200));
        f.silencer.on_gesture(&gesture(Swipe));
        assert_eq!(f.ringer.count(), 1);
    }

    #[test]
    fn ringing_stopped_withdraws() {
        // given
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");

        // when
        f.silencer.on_call_state_changed(CallState::Offhook, "");

        // then
        assert_eq!(f.silencer.state(), Ring::Idle);
        assert!(f.registry.current_combined_mask().is_empty());
        assert!(!f.registry.is_registered(f.silencer.vote().voter()));
        assert_eq!(f.subscription.deactivations(), 1);

        // and late swipes do nothing
        f.clock.advance(Duration::from_secs(1));
        f.silencer.on_gesture(&gesture(Swipe));
        assert_eq!(f.ringer.count(), 0);
    }

    #[test]
    fn idle_while_idle_is_a_no_op() {
        let f = fixture();

        f.silencer.on_call_state_changed(CallState::Idle, "");

        assert_eq!(f.subscription.deactivations(), 0);
    }

    #[test]
    fn disabled_silencer_ignores_ringing() {
        let f = fixture();
        f.settings.set_ring_silencer_enabled(false);

        f.silencer.on_call_state_changed(CallState::Ringing, "");

        assert_eq!(f.silencer.state(), Ring::Idle);
        assert_eq!(f.subscription.activations(), 0);
    }

    #[test]
    fn disabling_while_ringing_withdraws() {
        // given
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");

        // when
        f.settings.set_ring_silencer_enabled(false);
        f.silencer.update_state();

        // then
        assert_eq!(f.silencer.state(), Ring::Idle);
        assert!(f.registry.current_combined_mask().is_empty());
        assert_eq!(f.subscription.deactivations(), 1);
    }

    #[test]
    fn update_state_while_enabled_changes_nothing() {
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");
        let ringing = f.silencer.state();

        f.silencer.update_state();

        assert_eq!(f.silencer.state(), ringing);
        assert_eq!(f.subscription.deactivations(), 0);
    }

    #[test]
    fn swipes_arrive_through_the_registry() {
        let f = fixture();
        f.silencer.on_call_state_changed(CallState::Ringing, "");
        f.clock.advance(SILENCE_DELAY);

        f.subscription.deliver(&[0.0, Swipe.code() as f32, 0.0]);

        assert_eq!(f.ringer.count(), 1);
    }

    #[test]
    fn enabling_while_ringing_arms() {
        // given
        let f = fixture();
        f.settings.set_ring_silencer_enabled(false);
        f.silencer.on_call_state_changed(CallState::Ringing, "");
        f.clock.advance(Duration::from_secs(2));

        // when
        f.settings.set_ring_silencer_enabled(true);
        f.silencer.update_state();

        // then the delay counts from enabling
        assert_eq!(
            f.silencer.state(),
            Ring::Ringing {
                started: f.clock.now()
            }
        );
        assert_eq!(f.subscription.mask(), Some(Swipe.into()));
        f.silencer.on_gesture(&gesture(Swipe));
        assert_eq!(f.ringer.count(), 0);
        f.clock.advance(SILENCE_DELAY);
        f.silencer.on_gesture(&gesture(Swipe));
        assert_eq!(f.ringer.count(), 1);
    }

    #[test]
    fn enabling_after_ringing_stopped_stays_idle() {
        let f = fixture();
        f.settings.set_ring_silencer_enabled(false);
        f.silencer.on_call_state_changed(CallState::Ringing, "");
        f.silencer.on_call_state_changed(CallState::Offhook, "");

        f.settings.set_ring_silencer_enabled(true);
        f.silencer.update_state();

        assert_eq!(f.silencer.state(), Ring::Idle);
        assert_eq!(f.subscription.activations(), 0);
    }
}
