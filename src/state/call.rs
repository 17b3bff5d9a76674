use serde::{Deserialize, Serialize};

/// Call state as reported by telephony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    /// No call activity.
    Idle,
    /// An incoming call is ringing.
    Ringing,
    /// A call is dialing, active or on hold.
    Offhook,
}

impl CallState {
    pub fn is_ringing(self) -> bool {
        self == CallState::Ringing
    }
}

/// Receives call state changes.
pub trait CallStateListener: Send + Sync {
    /// `incoming_number` is passed through from telephony and may
    /// be empty.
    fn on_call_state_changed(&self, state: CallState, incoming_number: &str);
}
