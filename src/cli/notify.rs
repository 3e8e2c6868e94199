//! Notify 命令 - 手动发送一次 webhook

use crate::config::Config;
use crate::event::CameraState;
use crate::notification::{ConditionMetadata, Notifier, WebhookNotifier};
use crate::system::SystemInfo;
use anyhow::{bail, Result};
use clap::Args;
use tracing::warn;

/// Notify 命令参数
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// 要发送的摄像头状态
    #[arg(long, value_enum)]
    pub state: CameraState,

    /// 忽略条件门控，总是发送（不加此参数时条件不满足会以非零状态退出）
    #[arg(long)]
    pub force: bool,
}

/// 条件不满足且未指定 `--force` 时返回错误
fn ensure_conditions(config: &Config, metadata: &ConditionMetadata, force: bool) -> Result<()> {
    if force || config.gates().allows(metadata) {
        return Ok(());
    }

    warn!(?metadata, "Conditions not met, skipping webhook");
    bail!(
        "Conditions not met (home_network={}, external_monitor={}), use --force to send anyway",
        metadata.home_network,
        metadata.external_monitor
    );
}

/// 处理 notify 命令
pub async fn handle_notify(config: Config, args: NotifyArgs) -> Result<()> {
    let mut system = SystemInfo::from_system(&config.home_ip_prefix, config.displays_cache_ttl);
    let metadata = system.snapshot().await;

    ensure_conditions(&config, &metadata, args.force)?;

    let notifier = WebhookNotifier::new(config.webhook_config())?;
    if !notifier.send(args.state, &metadata).await {
        bail!("Webhook delivery to {} failed", notifier.url());
    }

    println!("已发送 {} 通知到 {}", args.state, notifier.url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn away_metadata() -> ConditionMetadata {
        ConditionMetadata {
            home_network: false,
            ip_addresses: vec!["10.0.0.5".to_string()],
            external_monitor: true,
        }
    }

    #[test]
    fn test_unmet_conditions_fail_without_force() {
        let config = Config::default();
        let err = ensure_conditions(&config, &away_metadata(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn test_force_bypasses_conditions() {
        let config = Config::default();
        assert!(ensure_conditions(&config, &away_metadata(), true).is_ok());
    }

    #[test]
    fn test_met_conditions_pass() {
        let config = Config {
            require_home_network: false,
            ..Config::default()
        };
        assert!(ensure_conditions(&config, &away_metadata(), false).is_ok());
    }
}
