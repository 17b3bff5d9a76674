mod dispatch;
mod err;
mod registry;
mod sim;
mod subscription;
mod vote;

pub use err::Error;
pub use registry::{SensorVoteRegistry, VoterId};
pub use sim::SimulatedSensor;
pub use subscription::{
    SensorEvent, SensorEventListener, SensorId, SensorSubscription, BATCH_LATENCY,
};
pub use vote::Vote;
