//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use loyalty_shared::config::AppConfig;

use crate::catalog::{self, COUNTRIES};
use crate::generators::{DataGenerator, GeneratorConfig};
use crate::ledger::Ledger;
use crate::models::{Gift, Reward};
use crate::routes::build_app;
use crate::state::AppState;

/// 命令执行器
pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 创建账本并按配置写入演示数据
    pub fn prepare_ledger(&self, populate: usize) -> Arc<Ledger> {
        let ledger = Ledger::new();

        if self.config.loyalty.seed_demo_customers {
            let seeded = ledger.seed_demo_customers();
            info!(seeded, "演示客户已写入");
        }

        if populate > 0 {
            let generator =
                DataGenerator::new(GeneratorConfig::default().with_customer_count(populate));
            let stats = generator.populate(&ledger);
            if stats.skipped > 0 {
                warn!(skipped = stats.skipped, "部分随机客户因邮箱重复被跳过");
            }
        }

        Arc::new(ledger)
    }

    /// 执行 server 命令
    ///
    /// 命令行端口优先于配置文件端口
    pub async fn run_server(&self, port: Option<u16>, populate: usize) -> Result<()> {
        let ledger = self.prepare_ledger(populate);
        let state = AppState::new(ledger, self.config.loyalty.clone());
        let app = build_app(state);

        let port = port.unwrap_or(self.config.server.port);
        let addr = format!("{}:{}", self.config.server.host, port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("绑定端口失败: {}", addr))?;

        info!("积分服务已启动: http://{}", addr);
        info!("  POST /login - 演示登录");
        info!("  GET  /customers/{{id}}/dashboard - 客户仪表盘");
        info!("  POST /customers/{{id}}/remittances - 汇款得积分");
        info!("  POST /customers/{{id}}/redemptions - 兑换奖励");
        info!("  GET  /leaderboard - 积分排行榜");
        info!("按 Ctrl+C 停止服务");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("积分服务已停止");
        Ok(())
    }

    /// 执行 catalog 命令
    pub fn run_catalog(&self, out: &mut impl std::io::Write) -> Result<()> {
        let listing = CatalogListing {
            rewards: catalog::default_rewards(),
            gifts: catalog::default_gifts(),
            countries: COUNTRIES
                .iter()
                .map(|&(code, name)| CountryEntry { code, name })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&listing).context("序列化目录失败")?;
        writeln!(out, "{}", json).context("写出目录失败")?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CatalogListing {
    rewards: Vec<Reward>,
    gifts: Vec<Gift>,
    countries: Vec<CountryEntry>,
}

#[derive(Debug, Serialize)]
struct CountryEntry {
    code: &'static str,
    name: &'static str,
}

/// 等待 Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "安装 CTRL+C 信号处理器失败");
        std::future::pending::<()>().await;
    }
    info!("收到关闭信号，正在停止服务...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_ledger_seeds_and_populates() {
        let runner = CommandRunner::new(AppConfig::default());
        let ledger = runner.prepare_ledger(5);

        assert!(ledger.get_customer("1").is_some());
        assert!(ledger.customer_count() >= 3);
        assert!(ledger.customer_count() <= 8);
    }

    #[test]
    fn test_prepare_ledger_without_demo_customers() {
        let mut config = AppConfig::default();
        config.loyalty.seed_demo_customers = false;
        let ledger = CommandRunner::new(config).prepare_ledger(0);

        assert_eq!(ledger.customer_count(), 0);
    }

    #[test]
    fn test_run_catalog_outputs_json() {
        let runner = CommandRunner::new(AppConfig::default());
        let mut out = Vec::new();
        runner.run_catalog(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rewards"].as_array().unwrap().len(), 6);
        assert_eq!(value["gifts"].as_array().unwrap().len(), 4);
        assert_eq!(value["countries"][0]["code"], "ZW");
    }
}
