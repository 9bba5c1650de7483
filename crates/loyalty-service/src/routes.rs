//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射，并组装中间件

use axum::{
    Router, middleware,
    routing::{get, post},
};
use loyalty_shared::observability::middleware::{http_tracing, request_id};
use tower_http::cors::CorsLayer;

use crate::{handlers, state::AppState};

/// 健康检查与登录（无需客户上下文）
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/login", post(handlers::auth::login))
}

/// 客户相关路由
///
/// 客户 ID 通过路径传递
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(handlers::customer::list_customers).post(handlers::customer::register_customer),
        )
        .route("/customers/{customer_id}", get(handlers::customer::get_customer))
        .route(
            "/customers/{customer_id}/dashboard",
            get(handlers::customer::dashboard),
        )
        .route(
            "/customers/{customer_id}/points",
            post(handlers::customer::credit_points),
        )
        .route(
            "/customers/{customer_id}/remittances",
            post(handlers::customer::send_remittance),
        )
        .route(
            "/customers/{customer_id}/transactions",
            get(handlers::customer::transaction_history),
        )
        .route(
            "/customers/{customer_id}/redemptions",
            get(handlers::customer::list_redemptions).post(handlers::customer::redeem),
        )
        .route(
            "/customers/{customer_id}/gifts",
            get(handlers::gift::list_sent_gifts).post(handlers::gift::send_gift),
        )
        .route("/leaderboard", get(handlers::customer::leaderboard))
}

/// 奖励与礼品目录路由
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/rewards", get(handlers::reward::list_rewards))
        .route("/rewards/categories", get(handlers::reward::list_categories))
        .route("/rewards/{reward_id}", get(handlers::reward::get_reward))
        .route("/gifts", get(handlers::gift::list_gifts))
}

/// 构建完整的 API 路由（未绑定状态）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(customer_routes())
        .merge(catalog_routes())
}

/// 构建可直接服务的应用
///
/// 请求 ID 中间件包在追踪中间件外层
pub fn build_app(state: AppState) -> Router {
    api_routes()
        .layer(middleware::from_fn(http_tracing))
        .layer(middleware::from_fn(request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
