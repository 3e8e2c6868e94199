//! 摄像头事件解析 - 从 log stream 行中提取开/关状态

use serde::{Deserialize, Serialize};
use std::fmt;

/// `log stream` 自身输出的提示行
pub const LOG_INFO_MARKER: &str = "Filtering the log data using";

/// AVCaptureSession 开始运行
pub const RUNNING_ON_MARKER: &str = "running -> 1";
/// AVCaptureSession 停止运行
pub const RUNNING_OFF_MARKER: &str = "running -> 0";

/// 摄像头状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CameraState {
    On,
    Off,
}

impl CameraState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraState::On => "on",
            CameraState::Off => "off",
        }
    }
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析一行日志
///
/// 同时包含两个标记时 On 优先（先检查）。
pub fn parse_camera_state(line: &str) -> Option<CameraState> {
    if line.contains(RUNNING_ON_MARKER) {
        Some(CameraState::On)
    } else if line.contains(RUNNING_OFF_MARKER) {
        Some(CameraState::Off)
    } else {
        None
    }
}

/// 是否为 `log stream` 的提示信息行
pub fn is_log_info_line(line: &str) -> bool {
    line.contains(LOG_INFO_MARKER)
}
