//! Webcam Light CLI
//!
//! 监听 macOS 摄像头开关，满足条件时调用 webhook（例如 Home Assistant 点亮指示灯）

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use webcam_light::cli::{
    handle_conditions, handle_notify, handle_watch, ConditionsArgs, MonitorArgs, NotifyArgs,
};

#[derive(Parser)]
#[command(name = "webcam-light")]
#[command(about = "Monitor macOS camera usage and send webhook notifications")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    monitor: MonitorArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 监听摄像头事件（默认）
    Watch,
    /// 探测一次网络与显示器状态
    Conditions(ConditionsArgs),
    /// 立即发送一次 webhook
    Notify(NotifyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("webcam_light=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let config = cli.monitor.into_config()?;

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => handle_watch(config).await?,
        Commands::Conditions(args) => handle_conditions(config, args).await?,
        Commands::Notify(args) => handle_notify(config, args).await?,
    }

    Ok(())
}
