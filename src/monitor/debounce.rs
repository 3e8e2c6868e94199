//! 事件防抖 - 同一状态在窗口内只处理一次

use crate::event::CameraState;
use std::time::{Duration, Instant};

/// 监控运行时状态：上次处理的状态与时间
///
/// 两个字段总是一起更新。
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_state: Option<CameraState>,
    last_sent: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_state: None,
            last_sent: None,
        }
    }

    /// 事件是否应被丢弃
    ///
    /// 仅当状态与上次相同且距上次处理不足窗口时间时返回 true；
    /// 相反状态永远不会被防抖。
    pub fn should_debounce(&self, state: CameraState, now: Instant) -> bool {
        if self.last_state != Some(state) {
            return false;
        }
        match self.last_sent {
            Some(last) => now.saturating_duration_since(last) < self.window,
            None => false,
        }
    }

    /// 记录一次已处理的事件（无论通知是否成功）
    pub fn record(&mut self, state: CameraState, now: Instant) {
        self.last_state = Some(state);
        self.last_sent = Some(now);
    }

    pub fn last_state(&self) -> Option<CameraState> {
        self.last_state
    }

    pub fn last_sent(&self) -> Option<Instant> {
        self.last_sent
    }
}
