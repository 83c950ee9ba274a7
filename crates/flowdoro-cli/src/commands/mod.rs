pub mod config;
pub mod session;
pub mod task;
pub mod timer;
