mod engine;

pub use engine::{ResumePolicy, TimerEngine, TimerState, BREAK_DIVISOR};
