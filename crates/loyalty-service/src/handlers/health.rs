//! 健康检查

use axum::{Json, extract::State};

use crate::dto::HealthResponse;
use crate::state::AppState;

const SERVICE_NAME: &str = "loyalty-service";

/// 存活检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        customers: None,
    })
}

/// 就绪检查，附带当前客户数
pub async fn ready(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
        service: SERVICE_NAME.to_string(),
        customers: Some(state.ledger.customer_count()),
    })
}
