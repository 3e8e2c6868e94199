//! Webcam Light - 监听 macOS 摄像头开关事件并通过 webhook 通知

pub mod cli;
pub mod config;
pub mod event;
pub mod monitor;
pub mod notification;
pub mod system;

pub use config::Config;
pub use event::{parse_camera_state, CameraState};
pub use monitor::{CameraMonitor, ConditionGates, Debouncer, EventOutcome, LogStream, StopReason};
pub use notification::{
    ConditionMetadata, NotificationPayload, Notifier, WebhookConfig, WebhookNotifier,
};
pub use system::{
    CommandError, CommandRunner, DisplayProbe, NetworkProbe, SystemCommandRunner, SystemInfo,
};
