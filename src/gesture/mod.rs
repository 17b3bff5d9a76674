mod event;
mod kind;
mod mask;

pub use err::Error;
pub use event::GestureEvent;
pub use kind::GestureKind;
pub use mask::GestureMask;

/// Receives gestures the consumer voted for.
///
/// Called from whatever thread the sensor delivers on, possibly
/// concurrently with state notifications to the same consumer.
pub trait GestureConsumer: Send + Sync {
    fn on_gesture(&self, event: &GestureEvent);
}

mod err {
    use failure::Fail;

    /// Raw event that could not be read as a gesture.
    #[derive(Debug, Fail, PartialEq)]
    pub enum Error {
        #[fail(display = "expected gesture sample at index {}, but event has only {} samples", index, len)]
        MissingSample { index: usize, len: usize },
        #[fail(display = "gesture sample at index {} is not a finite number", index)]
        NonFinite { index: usize },
        #[fail(display = "{} is not a known gesture code", code)]
        UnknownKind { code: f32 },
    }
}
