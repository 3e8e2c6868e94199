//! macOS `log stream` 子进程封装

use anyhow::{anyhow, Context, Result};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, info, warn};

const LOG_BINARY: &str = "/usr/bin/log";

/// 只保留 AVCaptureSession 开始/停止事件
pub const CAMERA_PREDICATE: &str = concat!(
    "subsystem == \"com.apple.cameracapture\" AND ",
    "eventMessage CONTAINS \"AVCaptureSession\" AND ",
    "(eventMessage CONTAINS \"running -> 1\" OR eventMessage CONTAINS \"running -> 0\")"
);

/// 等待子进程退出的上限
pub const REAP_TIMEOUT: Duration = Duration::from_secs(5);

/// `log stream` 的完整参数
pub fn log_stream_args() -> [&'static str; 5] {
    ["stream", "--style", "syslog", "--predicate", CAMERA_PREDICATE]
}

/// 正在运行的日志流子进程
pub struct LogStream {
    child: Child,
}

impl LogStream {
    /// 启动 `log stream`
    pub fn spawn() -> Result<Self> {
        Self::spawn_command(LOG_BINARY, &log_stream_args())
    }

    /// 启动任意逐行输出的命令
    pub fn spawn_command(program: &str, args: &[&str]) -> Result<Self> {
        debug!(program = %program, ?args, "Spawning log stream");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", program))?;

        Ok(Self { child })
    }

    /// 取出 stdout 的逐行读取器（只能取一次）
    pub fn take_reader(&mut self) -> Result<BufReader<ChildStdout>> {
        let stdout = self
            .child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("log stream stdout already taken"))?;
        Ok(BufReader::new(stdout))
    }

    /// 先发送 SIGTERM，宽限期内未退出再强制结束
    pub async fn shutdown(self) -> Option<ExitStatus> {
        self.shutdown_with_grace(REAP_TIMEOUT).await
    }

    /// 同上，指定 SIGTERM 后等待的宽限期
    pub async fn shutdown_with_grace(mut self, grace: Duration) -> Option<ExitStatus> {
        match self.child.try_wait() {
            Ok(Some(status)) => {
                if status.success() {
                    info!(%status, "Log stream exited");
                } else {
                    warn!(%status, "Log stream exited unexpectedly");
                }
                return Some(status);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to query log stream status"),
        }

        if let Some(pid) = self.child.id() {
            terminate(pid).await;
            match tokio::time::timeout(grace, self.child.wait()).await {
                Ok(Ok(status)) => {
                    debug!(%status, "Log stream terminated");
                    return Some(status);
                }
                Ok(Err(e)) => warn!(error = %e, "Failed to reap log stream"),
                Err(_) => warn!(grace = ?grace, "Log stream ignored SIGTERM, killing"),
            }
        }

        if let Err(e) = self.child.start_kill() {
            warn!(error = %e, "Failed to kill log stream");
        }

        match tokio::time::timeout(REAP_TIMEOUT, self.child.wait()).await {
            Ok(Ok(status)) => {
                debug!(%status, "Log stream killed");
                Some(status)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to reap log stream");
                None
            }
            Err(_) => {
                warn!(timeout = ?REAP_TIMEOUT, "Log stream did not exit in time");
                None
            }
        }
    }
}

/// 发送 SIGTERM
async fn terminate(pid: u32) {
    let result = Command::new("kill")
        .args(["-TERM", &pid.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match result {
        Ok(status) if status.success() => debug!(pid, "Sent SIGTERM to log stream"),
        Ok(status) => warn!(pid, %status, "kill -TERM failed"),
        Err(e) => warn!(pid, error = %e, "Failed to run kill"),
    }
}
