//! Watch 命令 - 持续监控摄像头事件

use crate::config::Config;
use crate::monitor::{CameraMonitor, StopReason};
use crate::notification::WebhookNotifier;
use crate::system::SystemInfo;
use anyhow::Result;
use tracing::info;

/// 处理 watch 命令
pub async fn handle_watch(config: Config) -> Result<()> {
    info!(
        webhook_url = %config.webhook_url,
        home_ip_prefix = %config.home_ip_prefix,
        require_home_network = config.require_home_network,
        require_external_monitor = config.require_external_monitor,
        debounce = ?config.debounce,
        displays_cache_ttl = ?config.displays_cache_ttl,
        "Loaded configuration"
    );

    let system = SystemInfo::from_system(&config.home_ip_prefix, config.displays_cache_ttl);
    let notifier = WebhookNotifier::new(config.webhook_config())?;
    let mut monitor = CameraMonitor::new(&config, system, notifier);

    match monitor.run().await? {
        StopReason::Interrupted => info!("Camera monitor stopped"),
        reason => info!(?reason, "Camera monitor exited"),
    }

    Ok(())
}
