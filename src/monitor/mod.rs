//! Camera monitoring subsystem - log stream, debounce and dispatch

mod camera_monitor;
mod conditions;
mod debounce;
pub mod log_stream;

pub use camera_monitor::{shutdown_signal, CameraMonitor, EventOutcome, StopReason};
pub use conditions::ConditionGates;
pub use debounce::Debouncer;
pub use log_stream::{LogStream, CAMERA_PREDICATE};
