//! 外接显示器探测 - system_profiler 查询 + TTL 缓存

use super::command::CommandRunner;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const SYSTEM_PROFILER: &str = "/usr/sbin/system_profiler";
const DISPLAYS_DATA_TYPE: &str = "SPDisplaysDataType";

fn connection_type_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^\s*Connection Type:\s*(.+)\s*$").expect("valid connection type regex")
    })
}

fn display_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s{8}.+:\s*$").expect("valid display header regex"))
}

/// 解析 `system_profiler SPDisplaysDataType` 输出，判断是否存在外接显示器
///
/// 优先看 `Connection Type`：任一不是 internal 即为外接。
/// 没有该字段时退回到统计显示器标题行，两个及以上视为有外接显示器。
pub fn parse_displays_output(output: &str) -> bool {
    let external_connection = connection_type_regex()
        .captures_iter(output)
        .any(|caps| !caps[1].trim().eq_ignore_ascii_case("internal"));
    if external_connection {
        return true;
    }

    display_header_regex().find_iter(output).count() >= 2
}

/// 缓存条目：值 + 采集时间
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    value: bool,
    captured_at: Instant,
}

/// 显示器探测结果的 TTL 缓存
#[derive(Debug, Clone)]
pub struct DisplayCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl DisplayCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// 在 `now` 时刻仍有效的缓存值
    pub fn get(&self, now: Instant) -> Option<bool> {
        self.entry
            .filter(|entry| now.saturating_duration_since(entry.captured_at) < self.ttl)
            .map(|entry| entry.value)
    }

    /// 覆盖缓存
    pub fn store(&mut self, value: bool, now: Instant) {
        self.entry = Some(CacheEntry {
            value,
            captured_at: now,
        });
    }
}

/// 外接显示器探测器
pub struct DisplayProbe {
    runner: Arc<dyn CommandRunner>,
    cache: DisplayCache,
}

impl DisplayProbe {
    pub fn new(runner: Arc<dyn CommandRunner>, cache_ttl: Duration) -> Self {
        Self {
            runner,
            cache: DisplayCache::new(cache_ttl),
        }
    }

    /// 是否连接了外接显示器（带缓存）
    pub async fn has_external_monitor(&mut self) -> bool {
        self.has_external_monitor_at(Instant::now()).await
    }

    /// 同上，显式指定当前时刻
    pub async fn has_external_monitor_at(&mut self, now: Instant) -> bool {
        if let Some(cached) = self.cache.get(now) {
            debug!(external_monitor = cached, "Using cached display detection");
            return cached;
        }

        let detected = self.detect_external_monitor().await;
        self.cache.store(detected, now);
        detected
    }

    async fn detect_external_monitor(&self) -> bool {
        match self.runner.run(SYSTEM_PROFILER, &[DISPLAYS_DATA_TYPE]).await {
            Ok(output) => parse_displays_output(&output),
            Err(e) => {
                warn!(error = %e, "Failed to detect external monitor");
                false
            }
        }
    }
}
