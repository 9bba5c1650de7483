//! Prometheus 指标模块
//!
//! 业务指标通过 `metrics` 门面记录，未安装 recorder 时所有记录都是空操作，
//! 因此账本代码可以无条件调用这里的函数。启用后 `/metrics` 在独立端口暴露。

use anyhow::{Context, Result};
use axum::{Router, extract::State, routing::get};
use metrics::Label;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::OnceLock;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::ObservabilityConfig;

/// 指标名称
pub mod names {
    pub const HTTP_REQUESTS: &str = "loyalty_http_requests_total";
    pub const HTTP_DURATION: &str = "loyalty_http_request_duration_seconds";
    pub const REMITTANCES: &str = "loyalty_remittances_total";
    pub const REMITTANCE_AMOUNT: &str = "loyalty_remittance_amount";
    pub const POINTS_CREDITED: &str = "loyalty_points_credited_total";
    pub const REDEMPTIONS: &str = "loyalty_redemptions_total";
    pub const POINTS_REDEEMED: &str = "loyalty_points_redeemed_total";
    pub const GIFTS: &str = "loyalty_gifts_total";
    pub const CUSTOMERS_REGISTERED: &str = "loyalty_customers_registered_total";
}

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// 指标服务器守卫
pub struct MetricsHandle {
    _server: JoinHandle<()>,
}

/// 安装全局 Prometheus recorder 并启动指标服务器
pub async fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new()
        .add_global_label("service", config.service_name.clone())
        .install_recorder()
        .context("安装 Prometheus recorder 失败")?;
    let _ = PROMETHEUS_HANDLE.set(handle.clone());

    describe_metrics();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("绑定指标端口失败: {}", addr))?;
    info!("Metrics server listening on {}", addr);

    let app = Router::new()
        .route("/metrics", get(render))
        .with_state(handle);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(MetricsHandle { _server: server })
}

async fn render(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

fn describe_metrics() {
    metrics::describe_counter!(names::HTTP_REQUESTS, "Total number of HTTP requests");
    metrics::describe_histogram!(
        names::HTTP_DURATION,
        metrics::Unit::Seconds,
        "HTTP request duration"
    );
    metrics::describe_counter!(names::REMITTANCES, "Remittances recorded");
    metrics::describe_histogram!(names::REMITTANCE_AMOUNT, "Remittance amounts sent");
    metrics::describe_counter!(names::POINTS_CREDITED, "Loyalty points credited");
    metrics::describe_counter!(names::REDEMPTIONS, "Reward redemption attempts by outcome");
    metrics::describe_counter!(names::POINTS_REDEEMED, "Loyalty points spent on rewards and gifts");
    metrics::describe_counter!(names::GIFTS, "Gift sends by outcome");
    metrics::describe_counter!(names::CUSTOMERS_REGISTERED, "Customers registered");
}

/// 当前指标快照（未初始化时为 None）
pub fn get_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

// ============================================================================
// 记录函数
// ============================================================================

/// 记录 HTTP 请求，`route` 应为路由模板
pub fn record_http_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let labels = vec![
        Label::new("method", method.to_string()),
        Label::new("route", route.to_string()),
        Label::new("status", status.to_string()),
    ];
    metrics::counter!(names::HTTP_REQUESTS, labels.clone()).increment(1);
    metrics::histogram!(names::HTTP_DURATION, labels).record(duration_secs);
}

/// 记录一笔汇款
pub fn record_remittance(destination_country: &str, amount: f64, points_earned: u64) {
    let destination = destination_country.to_string();
    metrics::counter!(names::REMITTANCES, "destination" => destination.clone()).increment(1);
    metrics::histogram!(names::REMITTANCE_AMOUNT, "destination" => destination).record(amount);
    metrics::counter!(names::POINTS_CREDITED).increment(points_earned);
}

/// 记录兑换结果
///
/// `outcome` 取值：success / insufficient_points / not_found / unavailable
pub fn record_redemption(reward_id: &str, outcome: &str, points_spent: u64) {
    metrics::counter!(
        names::REDEMPTIONS,
        "reward_id" => reward_id.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    if points_spent > 0 {
        metrics::counter!(names::POINTS_REDEEMED, "kind" => "reward").increment(points_spent);
    }
}

/// 记录送礼结果
pub fn record_gift(gift_id: &str, outcome: &str, points_spent: u64) {
    metrics::counter!(
        names::GIFTS,
        "gift_id" => gift_id.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    if points_spent > 0 {
        metrics::counter!(names::POINTS_REDEEMED, "kind" => "gift").increment(points_spent);
    }
}

/// 记录客户注册及其初始等级
pub fn record_customer_registered(tier: &str) {
    metrics::counter!(names::CUSTOMERS_REGISTERED, "tier" => tier.to_string()).increment(1);
}
