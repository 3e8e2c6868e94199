//! Tests for network and display probes

mod common;

use common::*;
use std::time::{Duration, Instant};
use webcam_light::{DisplayProbe, NetworkProbe};

#[tokio::test]
async fn test_display_cache_within_ttl_probes_once() {
    // Given: TTL 15 秒的显示器探测
    let runner = FakeRunner::new(None, Some(DISPLAYS_EXTERNAL));
    let mut probe = DisplayProbe::new(runner.clone(), Duration::from_secs(15));
    let t = Instant::now();

    // When: TTL 内调用两次
    let first = probe.has_external_monitor_at(t).await;
    let second = probe.has_external_monitor_at(t + Duration::from_secs(10)).await;

    // Then: 结果相同，只探测一次
    assert!(first);
    assert_eq!(first, second);
    assert_eq!(runner.display_calls(), 1);
}

#[tokio::test]
async fn test_display_cache_reprobes_after_ttl() {
    let runner = FakeRunner::new(None, Some(DISPLAYS_BUILTIN));
    let mut probe = DisplayProbe::new(runner.clone(), Duration::from_secs(15));
    let t = Instant::now();

    assert!(!probe.has_external_monitor_at(t).await);
    assert_eq!(runner.display_calls(), 1);

    // TTL 到期后恰好重新探测一次
    let later = t + Duration::from_secs(15);
    assert!(!probe.has_external_monitor_at(later).await);
    assert_eq!(runner.display_calls(), 2);

    assert!(!probe.has_external_monitor_at(later + Duration::from_secs(1)).await);
    assert_eq!(runner.display_calls(), 2);
}

#[tokio::test]
async fn test_display_failure_is_cached_as_false() {
    let runner = FakeRunner::new(None, None);
    let mut probe = DisplayProbe::new(runner.clone(), Duration::from_secs(15));
    let t = Instant::now();

    assert!(!probe.has_external_monitor_at(t).await);
    assert!(!probe.has_external_monitor_at(t + Duration::from_secs(1)).await);
    assert_eq!(runner.display_calls(), 1);
}

#[tokio::test]
async fn test_home_network_classification() {
    let runner = FakeRunner::new(Some(IFCONFIG_HOME), None);
    let probe = NetworkProbe::new(runner.clone(), HOME_PREFIX);

    let (is_home, ips) = probe.is_on_home_network().await;
    assert!(is_home);
    assert_eq!(ips, vec!["192.168.137.5"]);
}

#[tokio::test]
async fn test_away_network_classification() {
    let runner = FakeRunner::new(Some(IFCONFIG_AWAY), None);
    let probe = NetworkProbe::new(runner.clone(), HOME_PREFIX);

    let (is_home, ips) = probe.is_on_home_network().await;
    assert!(!is_home);
    assert_eq!(ips, vec!["10.0.0.5"]);
    assert!(ips.iter().all(|ip| !ip.starts_with("127.")));
}

#[tokio::test]
async fn test_network_failure_returns_empty() {
    let runner = FakeRunner::new(None, None);
    let probe = NetworkProbe::new(runner.clone(), HOME_PREFIX);

    assert!(probe.active_ipv4_addresses().await.is_empty());
    let (is_home, ips) = probe.is_on_home_network().await;
    assert!(!is_home);
    assert!(ips.is_empty());
}
