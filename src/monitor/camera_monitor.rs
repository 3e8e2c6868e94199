//! 摄像头监控主循环 - 解析、防抖、条件评估、通知

use super::conditions::ConditionGates;
use super::debounce::Debouncer;
use super::log_stream::LogStream;
use crate::config::Config;
use crate::event::{is_log_info_line, parse_camera_state, CameraState};
use crate::notification::{ConditionMetadata, Notifier};
use crate::system::SystemInfo;
use anyhow::Result;
use std::future::Future;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, warn};

/// 单行日志的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// 不是摄像头事件
    Ignored,
    /// 被防抖丢弃
    Debounced(CameraState),
    /// 条件不满足，未发送
    Suppressed {
        state: CameraState,
        metadata: ConditionMetadata,
    },
    /// 已尝试发送
    Notified {
        state: CameraState,
        metadata: ConditionMetadata,
        delivered: bool,
    },
}

/// 主循环结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 日志流关闭（生产者退出）
    StreamClosed,
    /// 用户中断
    Interrupted,
    /// 读取出错
    StreamError,
}

/// 摄像头监控器
///
/// 独占运行时状态（防抖）与显示器缓存，逐行串行处理。
pub struct CameraMonitor<N: Notifier> {
    gates: ConditionGates,
    system: SystemInfo,
    notifier: N,
    debouncer: Debouncer,
}

impl<N: Notifier> CameraMonitor<N> {
    pub fn new(config: &Config, system: SystemInfo, notifier: N) -> Self {
        Self {
            gates: config.gates(),
            system,
            notifier,
            debouncer: Debouncer::new(config.debounce),
        }
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// 处理一行日志
    ///
    /// 防抖按收到时刻判断，运行时状态按通知尝试结束的时刻记录。
    pub async fn handle_line(&mut self, line: &str) -> EventOutcome {
        self.dispatch_line(line, None).await
    }

    /// 处理一行日志，整个处理过程都以 `now` 作为当前时刻
    pub async fn handle_line_at(&mut self, line: &str, now: Instant) -> EventOutcome {
        self.dispatch_line(line, Some(now)).await
    }

    /// 处理一次摄像头状态变化，整个处理过程都以 `now` 作为当前时刻
    pub async fn handle_event(&mut self, state: CameraState, now: Instant) -> EventOutcome {
        self.process_event(state, Some(now)).await
    }

    async fn dispatch_line(&mut self, line: &str, fixed_now: Option<Instant>) -> EventOutcome {
        if is_log_info_line(line) {
            return EventOutcome::Ignored;
        }

        match parse_camera_state(line) {
            Some(state) => self.process_event(state, fixed_now).await,
            None => EventOutcome::Ignored,
        }
    }

    async fn process_event(
        &mut self,
        state: CameraState,
        fixed_now: Option<Instant>,
    ) -> EventOutcome {
        let received_at = fixed_now.unwrap_or_else(Instant::now);
        if self.debouncer.should_debounce(state, received_at) {
            debug!(%state, "Camera event debounced");
            return EventOutcome::Debounced(state);
        }

        let metadata = self.system.snapshot().await;
        let conditions_ok = self.gates.allows(&metadata);

        info!(
            %state,
            home_network = metadata.home_network,
            ip_addresses = ?metadata.ip_addresses,
            external_monitor = metadata.external_monitor,
            conditions_ok,
            "Camera state changed"
        );

        let outcome = if conditions_ok {
            let delivered = self.notifier.send(state, &metadata).await;
            EventOutcome::Notified {
                state,
                metadata,
                delivered,
            }
        } else {
            EventOutcome::Suppressed { state, metadata }
        };

        // 通知失败也会占用防抖窗口，窗口从通知尝试结束时开始
        let finished_at = fixed_now.unwrap_or_else(Instant::now);
        self.debouncer.record(state, finished_at);
        outcome
    }

    /// 逐行消费日志，直到流结束或 `shutdown` 完成
    pub async fn process_lines<R, F>(&mut self, reader: R, shutdown: F) -> StopReason
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        let mut lines = reader.lines();
        tokio::pin!(shutdown);

        loop {
            let next = tokio::select! {
                _ = &mut shutdown => {
                    info!("Monitoring stopped by user");
                    return StopReason::Interrupted;
                }
                next = lines.next_line() => next,
            };

            match next {
                Ok(Some(line)) => {
                    self.handle_line(&line).await;
                }
                Ok(None) => {
                    warn!("Log stream closed");
                    return StopReason::StreamClosed;
                }
                Err(e) => {
                    error!(error = %e, "Monitoring failed");
                    return StopReason::StreamError;
                }
            }
        }
    }

    /// 启动 `log stream` 并监控，直到流结束或收到中断信号
    pub async fn run(&mut self) -> Result<StopReason> {
        info!("Starting camera monitor...");

        let mut stream = LogStream::spawn()?;
        let reader = stream.take_reader()?;

        let reason = self.process_lines(reader, shutdown_signal()).await;
        stream.shutdown().await;

        Ok(reason)
    }
}

/// Ctrl-C 或 SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
