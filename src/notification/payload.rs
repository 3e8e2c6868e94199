//! Webhook 载荷

use crate::event::CameraState;
use serde::{Deserialize, Serialize};

/// 条件评估时采集的环境信息
///
/// 无论门控是否启用都会完整上报。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionMetadata {
    /// 是否在家庭网络
    pub home_network: bool,
    /// 活动 IPv4 地址
    pub ip_addresses: Vec<String>,
    /// 是否连接外接显示器
    pub external_monitor: bool,
}

/// Webhook 请求体：`{"state": ...}` 与元数据平铺合并
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub state: CameraState,
    #[serde(flatten)]
    pub metadata: ConditionMetadata,
}

impl NotificationPayload {
    pub fn new(state: CameraState, metadata: ConditionMetadata) -> Self {
        Self { state, metadata }
    }
}
