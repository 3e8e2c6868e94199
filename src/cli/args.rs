//! 公共监控参数 - 命令行优先，其次环境变量

use crate::config::{
    resolve_flag, Config, DEFAULT_DEBOUNCE_SECONDS, DEFAULT_DISPLAYS_CACHE_TTL_SECONDS,
    DEFAULT_HOME_IP_PREFIX, DEFAULT_WEBHOOK_URL,
};
use anyhow::Result;
use clap::Args;

pub const ENV_REQUIRE_HOME_NETWORK: &str = "REQUIRE_HOME_NETWORK";
pub const ENV_REQUIRE_EXTERNAL_MONITOR: &str = "REQUIRE_EXTERNAL_MONITOR";

/// 监控参数
#[derive(Args, Debug, Clone)]
pub struct MonitorArgs {
    /// 完整的 webhook URL
    #[arg(long, global = true, env = "WEBHOOK_URL", default_value = DEFAULT_WEBHOOK_URL)]
    pub webhook_url: String,

    /// 家庭网络 IP 前缀
    #[arg(long, global = true, env = "HOME_IP_PREFIX", default_value = DEFAULT_HOME_IP_PREFIX)]
    pub home_ip_prefix: String,

    /// 仅在家庭网络时发送通知
    #[arg(long, global = true, conflicts_with = "no_require_home_network")]
    pub require_home_network: bool,

    /// 不论网络都发送通知
    #[arg(long, global = true)]
    pub no_require_home_network: bool,

    /// 仅在连接外接显示器时发送通知
    #[arg(long, global = true, conflicts_with = "no_require_external_monitor")]
    pub require_external_monitor: bool,

    /// 不论外接显示器都发送通知
    #[arg(long, global = true)]
    pub no_require_external_monitor: bool,

    /// 相同事件的防抖秒数
    #[arg(
        long,
        global = true,
        env = "DEBOUNCE_SECONDS",
        default_value_t = DEFAULT_DEBOUNCE_SECONDS
    )]
    pub debounce_seconds: f64,

    /// 显示器探测缓存 TTL（秒）
    #[arg(
        long = "displays-cache-ttl",
        global = true,
        env = "DISPLAYS_CACHE_TTL_SECONDS",
        default_value_t = DEFAULT_DISPLAYS_CACHE_TTL_SECONDS
    )]
    pub displays_cache_ttl_seconds: u64,
}

impl MonitorArgs {
    /// 结合进程环境变量生成配置
    pub fn into_config(self) -> Result<Config> {
        let home_env = std::env::var(ENV_REQUIRE_HOME_NETWORK).ok();
        let monitor_env = std::env::var(ENV_REQUIRE_EXTERNAL_MONITOR).ok();
        self.into_config_with_env(home_env.as_deref(), monitor_env.as_deref())
    }

    /// 同上，显式传入两个开关的环境变量值
    pub fn into_config_with_env(
        self,
        require_home_network_env: Option<&str>,
        require_external_monitor_env: Option<&str>,
    ) -> Result<Config> {
        Config::new(
            self.webhook_url,
            self.home_ip_prefix,
            resolve_flag(
                self.require_home_network,
                self.no_require_home_network,
                require_home_network_env,
            ),
            resolve_flag(
                self.require_external_monitor,
                self.no_require_external_monitor,
                require_external_monitor_env,
            ),
            self.debounce_seconds,
            self.displays_cache_ttl_seconds,
        )
    }
}
