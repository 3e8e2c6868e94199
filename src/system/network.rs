//! 网络探测 - 枚举活动 IPv4 地址并判断是否在家庭网络

use super::command::CommandRunner;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::warn;

const IFCONFIG: &str = "/sbin/ifconfig";

fn inet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\binet\s+(\d+\.\d+\.\d+\.\d+)\b").expect("valid inet regex"))
}

/// 从 ifconfig 输出中提取非 loopback 的 IPv4 地址（保持输出顺序）
pub fn parse_ifconfig_output(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| inet_regex().captures(line))
        .map(|caps| caps[1].to_string())
        .filter(|ip| !ip.starts_with("127."))
        .collect()
}

/// 任一地址以家庭网段前缀开头（纯字符串前缀，不做 CIDR 计算）
pub fn matches_home_prefix(ips: &[String], home_ip_prefix: &str) -> bool {
    ips.iter().any(|ip| ip.starts_with(home_ip_prefix))
}

/// 网络探测器
pub struct NetworkProbe {
    runner: Arc<dyn CommandRunner>,
    home_ip_prefix: String,
}

impl NetworkProbe {
    pub fn new(runner: Arc<dyn CommandRunner>, home_ip_prefix: impl Into<String>) -> Self {
        Self {
            runner,
            home_ip_prefix: home_ip_prefix.into(),
        }
    }

    /// 获取活动 IPv4 地址，失败时返回空列表
    pub async fn active_ipv4_addresses(&self) -> Vec<String> {
        match self.runner.run(IFCONFIG, &[]).await {
            Ok(output) => parse_ifconfig_output(&output),
            Err(e) => {
                warn!(error = %e, "Failed to get IP addresses");
                Vec::new()
            }
        }
    }

    /// 是否在家庭网络，同时返回探测到的地址
    pub async fn is_on_home_network(&self) -> (bool, Vec<String>) {
        let ips = self.active_ipv4_addresses().await;
        let is_home = matches_home_prefix(&ips, &self.home_ip_prefix);
        (is_home, ips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IFCONFIG_SAMPLE: &str = "\
lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384
\tinet 127.0.0.1 netmask 0xff000000
\tinet6 ::1 prefixlen 128
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tinet6 fe80::1c2b:3aff:fe4d:5e6f%en0 prefixlen 64 secured scopeid 0xe
\tinet 192.168.137.5 netmask 0xffffff00 broadcast 192.168.137.255
utun3: flags=8051<UP,POINTOPOINT,RUNNING,MULTICAST> mtu 1380
\tinet 10.8.0.2 --> 10.8.0.1 netmask 0xffffff00
";

    #[test]
    fn test_parse_skips_loopback_and_inet6() {
        let ips = parse_ifconfig_output(IFCONFIG_SAMPLE);
        assert_eq!(ips, vec!["192.168.137.5", "10.8.0.2"]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_ifconfig_output("").is_empty());
    }

    #[test]
    fn test_home_prefix_match() {
        let prefix = "192.168.137.";
        assert!(matches_home_prefix(&["192.168.137.5".to_string()], prefix));
        assert!(!matches_home_prefix(&["10.0.0.5".to_string()], prefix));
        assert!(!matches_home_prefix(&[], prefix));
    }

    #[test]
    fn test_home_prefix_is_plain_string_match() {
        // "192.168.1" 也会匹配 192.168.137.x
        assert!(matches_home_prefix(&["192.168.137.5".to_string()], "192.168.1"));
    }
}
