//! 运行配置 - 启动时确定，进程生命周期内不变

use crate::monitor::ConditionGates;
use crate::notification::WebhookConfig;
use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_WEBHOOK_URL: &str = "http://homeassistant:8123/api/webhook/none";
pub const DEFAULT_HOME_IP_PREFIX: &str = "192.168.137.";
pub const DEFAULT_DEBOUNCE_SECONDS: f64 = 5.0;
pub const DEFAULT_DISPLAYS_CACHE_TTL_SECONDS: u64 = 15;

/// 监控配置
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub webhook_url: String,
    pub home_ip_prefix: String,
    pub require_home_network: bool,
    pub require_external_monitor: bool,
    pub debounce: Duration,
    pub displays_cache_ttl: Duration,
}

impl Config {
    /// 从原始值构建并校验
    pub fn new(
        webhook_url: impl Into<String>,
        home_ip_prefix: impl Into<String>,
        require_home_network: bool,
        require_external_monitor: bool,
        debounce_seconds: f64,
        displays_cache_ttl_seconds: u64,
    ) -> Result<Self> {
        let webhook_url = webhook_url.into();
        reqwest::Url::parse(&webhook_url)
            .with_context(|| format!("Invalid webhook URL: {}", webhook_url))?;

        let debounce = Duration::try_from_secs_f64(debounce_seconds)
            .with_context(|| format!("Invalid debounce seconds: {}", debounce_seconds))?;

        Ok(Self {
            webhook_url,
            home_ip_prefix: home_ip_prefix.into(),
            require_home_network,
            require_external_monitor,
            debounce,
            displays_cache_ttl: Duration::from_secs(displays_cache_ttl_seconds),
        })
    }

    pub fn gates(&self) -> ConditionGates {
        ConditionGates {
            require_home_network: self.require_home_network,
            require_external_monitor: self.require_external_monitor,
        }
    }

    pub fn webhook_config(&self) -> WebhookConfig {
        WebhookConfig {
            url: self.webhook_url.clone(),
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            home_ip_prefix: DEFAULT_HOME_IP_PREFIX.to_string(),
            require_home_network: true,
            require_external_monitor: true,
            debounce: Duration::from_secs_f64(DEFAULT_DEBOUNCE_SECONDS),
            displays_cache_ttl: Duration::from_secs(DEFAULT_DISPLAYS_CACHE_TTL_SECONDS),
        }
    }
}

/// 合并一对开关参数与环境变量
///
/// 显式参数优先；否则环境变量值为 `true`（不区分大小写）时为真；未设置时默认为真。
pub fn resolve_flag(enable: bool, disable: bool, env_value: Option<&str>) -> bool {
    if enable {
        true
    } else if disable {
        false
    } else {
        env_value.map_or(true, |v| v.eq_ignore_ascii_case("true"))
    }
}
