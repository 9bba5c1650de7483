//! 奖励目录 API

use axum::{
    Json,
    extract::{Path, State},
};

use crate::dto::ApiResponse;
use crate::error::LoyaltyError;
use crate::models::{Reward, RewardCategory};
use crate::state::AppState;

pub async fn list_rewards(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Reward>>>, LoyaltyError> {
    Ok(Json(ApiResponse::success(state.ledger.list_rewards())))
}

/// 按分类分组的奖励目录
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RewardCategory>>>, LoyaltyError> {
    Ok(Json(ApiResponse::success(state.ledger.rewards_by_category())))
}

pub async fn get_reward(
    State(state): State<AppState>,
    Path(reward_id): Path<String>,
) -> Result<Json<ApiResponse<Reward>>, LoyaltyError> {
    let reward = state
        .ledger
        .get_reward(&reward_id)
        .ok_or(LoyaltyError::RewardNotFound(reward_id))?;
    Ok(Json(ApiResponse::success(reward)))
}
