mod engine;

pub use engine::{Countdown, TimerState};
