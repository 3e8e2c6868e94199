//! 通知模块 - 载荷与 webhook 发送

pub mod payload;
pub mod webhook;

pub use payload::{ConditionMetadata, NotificationPayload};
pub use webhook::{Notifier, WebhookConfig, WebhookNotifier};
