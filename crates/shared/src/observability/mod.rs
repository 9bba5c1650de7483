//! 日志与指标
//!
//! 服务启动时调用一次 [`init`]，日志写 stderr，指标可选地在独立端口导出。

pub mod metrics;
pub mod middleware;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;
use serde::Deserialize;

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// 作为日志字段和指标全局标签
    pub service_name: String,
    /// 未设置 RUST_LOG 时生效
    pub log_level: String,
    pub json_logs: bool,
    pub metrics_enabled: bool,
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "loyalty-service".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    /// 注入服务名（配置文件中通常不重复声明）
    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }

    /// 使用命令行指定的日志级别覆盖配置
    pub fn with_log_level(mut self, log_level: &str) -> Self {
        self.log_level = log_level.to_string();
        self
    }
}

/// 进程级可观测性句柄
///
/// 指标服务器随守卫存活，drop 时记录一条关闭日志。
pub struct ObservabilityGuard {
    metrics_server: Option<metrics::MetricsHandle>,
}

impl ObservabilityGuard {
    /// 不持有任何后台任务的守卫
    pub fn empty() -> Self {
        Self {
            metrics_server: None,
        }
    }

    /// 指标服务器是否在运行
    pub fn serves_metrics(&self) -> bool {
        self.metrics_server.is_some()
    }
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        info!(
            metrics = self.serves_metrics(),
            "observability shutting down"
        );
    }
}

/// 先装日志订阅器，再按配置启动指标导出
///
/// 返回的守卫需要在 `main` 中一直持有。
pub async fn init(config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    tracing::init(config)?;

    let metrics_server = if config.metrics_enabled {
        Some(metrics::init(config).await?)
    } else {
        None
    };

    info!(
        service = %config.service_name,
        level = %config.log_level,
        metrics_port = config.metrics_enabled.then_some(config.metrics_port),
        "observability ready"
    );

    Ok(ObservabilityGuard { metrics_server })
}
