//! # Sensor Board CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 设备配置加载与验证
//! - 传感器屏幕生命周期托管
//! - 优雅关闭处理

mod cli;
mod commands;
mod error;
mod host;

use anyhow::Result;
use clap::Parser;
use observability::{init_logging, LoggingConfig};
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_screen, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(LoggingConfig::from(&cli))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Sensor Board CLI starting"
    );

    let result = match &cli.command {
        Commands::Run(args) => run_screen(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}
