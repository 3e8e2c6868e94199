//! Webhook 通知 - 将摄像头事件 POST 到配置的地址

use super::payload::{ConditionMetadata, NotificationPayload};
use crate::event::CameraState;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

/// 通知发送方
///
/// 返回是否送达；失败只记录日志，不向调用方传播错误。
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, state: CameraState, metadata: &ConditionMetadata) -> bool;
}

/// Webhook 客户端配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 完整的 webhook URL
    pub url: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
    /// 是否使用 HTTP_PROXY 等系统代理
    pub use_system_proxy: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: "http://homeassistant:8123/api/webhook/none".to_string(),
            timeout_secs: 5,
            use_system_proxy: true,
        }
    }
}

/// Webhook 通知器
#[derive(Debug)]
pub struct WebhookNotifier {
    client: Client,
    config: WebhookConfig,
}

impl WebhookNotifier {
    /// 创建新的 Webhook 通知器
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    async fn post(
        &self,
        payload: &NotificationPayload,
    ) -> Result<reqwest::StatusCode, reqwest::Error> {
        let response = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        Ok(response.status())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, state: CameraState, metadata: &ConditionMetadata) -> bool {
        let payload = NotificationPayload::new(state, metadata.clone());

        match self.post(&payload).await {
            Ok(status) if status.is_success() => {
                info!(url = %self.config.url, %state, "Webhook sent successfully");
                true
            }
            Ok(status) => {
                error!(url = %self.config.url, status = status.as_u16(), "Webhook failed");
                false
            }
            Err(e) => {
                error!(url = %self.config.url, error = %e, "Failed to send webhook");
                false
            }
        }
    }
}
