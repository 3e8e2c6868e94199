//! 系统环境探测 - 网络与外接显示器

pub mod command;
pub mod display;
pub mod network;

pub use command::{CommandError, CommandRunner, SystemCommandRunner, PROBE_TIMEOUT};
pub use display::{parse_displays_output, DisplayCache, DisplayProbe};
pub use network::{matches_home_prefix, parse_ifconfig_output, NetworkProbe};

use crate::notification::ConditionMetadata;
use std::sync::Arc;
use std::time::Duration;

/// 组合网络与显示器探测，产出一次条件快照
pub struct SystemInfo {
    network: NetworkProbe,
    display: DisplayProbe,
}

impl SystemInfo {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        home_ip_prefix: &str,
        displays_cache_ttl: Duration,
    ) -> Self {
        Self {
            network: NetworkProbe::new(runner.clone(), home_ip_prefix),
            display: DisplayProbe::new(runner, displays_cache_ttl),
        }
    }

    /// 使用系统命令的默认实现
    pub fn from_system(home_ip_prefix: &str, displays_cache_ttl: Duration) -> Self {
        Self::new(
            Arc::new(SystemCommandRunner::default()),
            home_ip_prefix,
            displays_cache_ttl,
        )
    }

    /// 探测当前网络与显示器状态（显示器结果走缓存）
    pub async fn snapshot(&mut self) -> ConditionMetadata {
        let (home_network, ip_addresses) = self.network.is_on_home_network().await;
        let external_monitor = self.display.has_external_monitor().await;

        ConditionMetadata {
            home_network,
            ip_addresses,
            external_monitor,
        }
    }
}
