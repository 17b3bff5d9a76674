//! Notifications from outside the gesture core: call state, screen
//! state and changed settings.
mod call;

pub use call::{CallState, CallStateListener};

/// Receives display power changes.
pub trait ScreenStateNotifier: Send + Sync {
    fn screen_turned_on(&self);
    fn screen_turned_off(&self);
}

/// Receives a nudge after settings changed, so enablement can be
/// re-evaluated.
pub trait UpdatedStateNotifier: Send + Sync {
    fn update_state(&self);
}
