use crate::acts::{Ringer, SensorAction};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{info, warn};

/// Something a consumer asked the phone to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuation {
    SilenceRinger,
    Wake,
}

/// Sending end handed to consumers as ringer and wake action.
///
/// Sending never blocks, so the actions are safe to invoke with
/// a consumer lock held.
#[derive(Clone)]
pub struct ActuationSender(Sender<Actuation>);

/// FIFO of actuations, drained by whoever performs them.
pub struct Actuations(Receiver<Actuation>);

impl Actuations {
    pub fn new() -> (Self, ActuationSender) {
        let (tx, rx) = unbounded();
        (Actuations(rx), ActuationSender(tx))
    }

    /// Next actuation, if any has been queued.
    pub fn poll(&self) -> Option<Actuation> {
        match self.0.try_recv() {
            Ok(actuation) => Some(actuation),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Takes everything queued so far.
    pub fn drain(&self) -> Vec<Actuation> {
        std::iter::from_fn(|| self.poll()).collect()
    }
}

impl ActuationSender {
    fn send(&self, actuation: Actuation) {
        info!("{:?}", actuation);
        if let Err(e) = self.0.send(actuation) {
            warn!("Nobody performs actuations anymore, dropping {:?}", e.0);
        }
    }
}

impl Ringer for ActuationSender {
    fn silence_ringer(&self) {
        self.send(Actuation::SilenceRinger)
    }
}

impl SensorAction for ActuationSender {
    fn action(&self) {
        self.send(Actuation::Wake)
    }
}
