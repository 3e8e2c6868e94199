//! 条件门控

use crate::notification::ConditionMetadata;

/// 发送通知前必须满足的条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionGates {
    pub require_home_network: bool,
    pub require_external_monitor: bool,
}

impl ConditionGates {
    /// 门控只决定是否发送，不影响上报的元数据
    pub fn allows(&self, metadata: &ConditionMetadata) -> bool {
        let mut ok = true;
        if self.require_home_network {
            ok &= metadata.home_network;
        }
        if self.require_external_monitor {
            ok &= metadata.external_monitor;
        }
        ok
    }
}
