//! Loyalty Server
//!
//! 积分服务的命令行入口点。

use anyhow::Context;
use clap::Parser;
use loyalty_service::cli::{Cli, CommandRunner, Commands};
use loyalty_shared::config::AppConfig;
use loyalty_shared::observability;

const SERVICE_NAME: &str = "loyalty-service";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(SERVICE_NAME).context("加载配置失败")?;

    // RUST_LOG 优先，其次命令行参数，最后配置文件
    let mut obs_config = config
        .observability
        .clone()
        .with_service_name(SERVICE_NAME);
    if let Some(level) = cli.log_level.as_deref() {
        obs_config = obs_config.with_log_level(level);
    }
    let _guard = observability::init(&obs_config).await?;

    let runner = CommandRunner::new(config);

    match cli.command {
        Commands::Server { port, populate } => {
            runner.run_server(port, populate).await?;
        }
        Commands::Catalog => {
            runner.run_catalog(&mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
