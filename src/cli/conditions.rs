//! Conditions 命令 - 探测一次当前环境

use crate::config::Config;
use crate::notification::ConditionMetadata;
use crate::system::SystemInfo;
use anyhow::Result;
use clap::Args;
use serde::Serialize;

/// Conditions 命令参数
#[derive(Args, Debug)]
pub struct ConditionsArgs {
    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// Conditions 命令输出
#[derive(Debug, Serialize)]
pub struct ConditionsOutput {
    #[serde(flatten)]
    pub metadata: ConditionMetadata,
    pub conditions_ok: bool,
}

/// 处理 conditions 命令
pub async fn handle_conditions(config: Config, args: ConditionsArgs) -> Result<()> {
    let mut system = SystemInfo::from_system(&config.home_ip_prefix, config.displays_cache_ttl);
    let metadata = system.snapshot().await;
    let output = ConditionsOutput {
        conditions_ok: config.gates().allows(&metadata),
        metadata,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("家庭网络: {}", output.metadata.home_network);
        println!("IP 地址: {}", output.metadata.ip_addresses.join(", "));
        println!("外接显示器: {}", output.metadata.external_monitor);
        println!("满足通知条件: {}", output.conditions_ok);
    }

    Ok(())
}
