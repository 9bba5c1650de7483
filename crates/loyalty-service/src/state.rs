//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use loyalty_shared::config::LoyaltyConfig;
use std::sync::Arc;

use crate::ledger::Ledger;

/// Axum 应用共享状态
///
/// 账本通过 Arc 在 handler 间共享，克隆成本很低
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub settings: Arc<LoyaltyConfig>,
}

impl AppState {
    pub fn new(ledger: Arc<Ledger>, settings: LoyaltyConfig) -> Self {
        Self {
            ledger,
            settings: Arc::new(settings),
        }
    }
}
