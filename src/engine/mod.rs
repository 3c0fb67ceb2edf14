mod clock;
mod engine;
mod types;

pub use clock::FrameClock;
pub use engine::{Engine, EngineError};
pub use types::{EngineConfig, RunState, Scene};
