//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use webcam_light::{
    CameraState, CommandError, CommandRunner, ConditionMetadata, NotificationPayload, Notifier,
    SystemInfo,
};

pub const HOME_PREFIX: &str = "192.168.137.";

pub const IFCONFIG_HOME: &str = "\
lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384
\tinet 127.0.0.1 netmask 0xff000000
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tinet 192.168.137.5 netmask 0xffffff00 broadcast 192.168.137.255
";

pub const IFCONFIG_AWAY: &str = "\
lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384
\tinet 127.0.0.1 netmask 0xff000000
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tinet 10.0.0.5 netmask 0xffffff00 broadcast 10.0.0.255
";

pub const DISPLAYS_EXTERNAL: &str = "\
Graphics/Displays:

    Apple M1 Pro:

      Displays:
        Color LCD:
          Connection Type: Internal
        DELL U2720Q:
          Connection Type: Thunderbolt/DisplayPort
";

pub const DISPLAYS_BUILTIN: &str = "\
Graphics/Displays:

    Apple M1 Pro:

      Displays:
        Color LCD:
          Connection Type: Internal
";

/// 返回固定输出的命令执行器，并记录调用次数
pub struct FakeRunner {
    ifconfig: Option<String>,
    displays: Option<String>,
    pub ifconfig_calls: AtomicUsize,
    pub display_calls: AtomicUsize,
}

impl FakeRunner {
    /// `None` 表示命令失败（超时）
    pub fn new(ifconfig: Option<&str>, displays: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            ifconfig: ifconfig.map(str::to_string),
            displays: displays.map(str::to_string),
            ifconfig_calls: AtomicUsize::new(0),
            display_calls: AtomicUsize::new(0),
        })
    }

    pub fn display_calls(&self) -> usize {
        self.display_calls.load(Ordering::SeqCst)
    }

    pub fn ifconfig_calls(&self) -> usize {
        self.ifconfig_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, _args: &[&str]) -> Result<String, CommandError> {
        let output = if program.ends_with("ifconfig") {
            self.ifconfig_calls.fetch_add(1, Ordering::SeqCst);
            self.ifconfig.clone()
        } else {
            self.display_calls.fetch_add(1, Ordering::SeqCst);
            self.displays.clone()
        };

        output.ok_or_else(|| CommandError::Timeout {
            program: program.to_string(),
            timeout: Duration::from_secs(5),
        })
    }
}

pub fn system_info(runner: Arc<FakeRunner>, cache_ttl: Duration) -> SystemInfo {
    SystemInfo::new(runner, HOME_PREFIX, cache_ttl)
}

/// 记录所有发送的载荷
pub struct RecordingNotifier {
    deliver: bool,
    delay: Duration,
    sent: Mutex<Vec<NotificationPayload>>,
}

impl RecordingNotifier {
    pub fn new(deliver: bool) -> Self {
        Self::with_delay(deliver, Duration::ZERO)
    }

    /// 每次发送前等待 `delay`，模拟慢速 webhook
    pub fn with_delay(deliver: bool, delay: Duration) -> Self {
        Self {
            deliver,
            delay,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, state: CameraState, metadata: &ConditionMetadata) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.sent
            .lock()
            .unwrap()
            .push(NotificationPayload::new(state, metadata.clone()));
        self.deliver
    }
}
