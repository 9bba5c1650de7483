//! 积分账本
//!
//! 持有客户、交易、奖励、兑换与礼品的内存存储，实现积分累积与兑换的全部业务规则。
//!
//! 同一客户的余额变更（加分、兑换、送礼）都在该客户记录的独占锁内完成，
//! 因此"检查余额 -> 写入记录 -> 扣减余额"对其他调用方表现为一个原子步骤；
//! 不同客户之间的操作互不阻塞。

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use loyalty_shared::observability::metrics;

use super::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use super::types::{
    Dashboard, LeaderboardEntry, Page, RedemptionOutcome, RemittanceReceipt, RemittanceRequest,
    SendGiftRequest, TransactionQuery,
};
use crate::catalog;
use crate::error::{LoyaltyError, Result};
use crate::models::{
    Customer, Gift, GiftReceipt, NewCustomer, NewTransaction, Redemption, RedemptionStatus, Reward,
    RewardCategory, Transaction, TransactionKind, Verification,
};
use crate::policy::{PointsDelta, Tier, points_for_amount};
use crate::store::MemoryStore;

/// 兑换成功提示
pub const REDEEM_SUCCESS_MESSAGE: &str = "Reward redeemed successfully";

/// 目录中不存在的 id 在指标里统一记为该值，避免客户端输入撑大标签集合
const UNKNOWN_CATALOG_ID: &str = "unknown";

/// 积分账本
pub struct Ledger {
    customers: MemoryStore<Customer>,
    /// 规范化邮箱 -> 客户 ID
    emails: DashMap<String, String>,
    transactions: MemoryStore<Transaction>,
    rewards: MemoryStore<Reward>,
    redemptions: MemoryStore<Redemption>,
    gifts: MemoryStore<Gift>,
    gift_receipts: MemoryStore<GiftReceipt>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// 使用系统时钟与 UUID 创建账本，加载默认奖励和礼品目录
    pub fn new() -> Self {
        Self::with_capabilities(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// 注入时钟与 ID 生成器
    pub fn with_capabilities(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        let ledger = Self {
            customers: MemoryStore::new(),
            emails: DashMap::new(),
            transactions: MemoryStore::new(),
            rewards: MemoryStore::new(),
            redemptions: MemoryStore::new(),
            gifts: MemoryStore::new(),
            gift_receipts: MemoryStore::new(),
            clock,
            ids,
        };
        ledger.load_catalog(catalog::default_rewards(), catalog::default_gifts());
        ledger
    }

    /// 替换奖励与礼品目录
    pub fn with_catalog(self, rewards: Vec<Reward>, gifts: Vec<Gift>) -> Self {
        let ledger = Self {
            rewards: MemoryStore::new(),
            gifts: MemoryStore::new(),
            ..self
        };
        ledger.load_catalog(rewards, gifts);
        ledger
    }

    fn load_catalog(&self, rewards: Vec<Reward>, gifts: Vec<Gift>) {
        self.rewards.insert_many(rewards, |r| r.id.clone());
        self.gifts.insert_many(gifts, |g| g.id.clone());
    }

    /// 注册三位演示客户
    ///
    /// 已存在的演示客户会被跳过
    pub fn seed_demo_customers(&self) -> usize {
        let mut seeded = 0;
        for customer in catalog::demo_customers() {
            match self.register_customer(customer) {
                Ok(_) => seeded += 1,
                Err(e) => debug!(error = %e, "跳过演示客户"),
            }
        }
        seeded
    }

    // ========================================================================
    // 客户
    // ========================================================================

    pub fn get_customer(&self, customer_id: &str) -> Option<Customer> {
        self.customers.get(customer_id)
    }

    /// 按注册顺序列出所有客户
    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.list()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.count()
    }

    /// 按邮箱查找客户（忽略大小写与首尾空白）
    pub fn find_customer_by_email(&self, email: &str) -> Option<Customer> {
        let customer_id = self
            .emails
            .get(&Customer::email_key(email))
            .map(|id| id.value().clone())?;
        self.customers.get(&customer_id)
    }

    /// 注册新客户
    ///
    /// 邮箱在索引中先占位再写入客户记录，重复邮箱的并发注册只有一个会成功。
    #[instrument(skip(self, new), fields(email = %new.email))]
    pub fn register_customer(&self, new: NewCustomer) -> Result<Customer> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(LoyaltyError::invalid("Name is required"));
        }
        let email = new.email.trim();
        if !is_plausible_email(email) {
            return Err(LoyaltyError::invalid("A valid email address is required"));
        }

        let customer_id = match new.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.ids.next_id(),
        };

        let mut customer = Customer {
            id: customer_id.clone(),
            name: name.to_string(),
            email: email.to_string(),
            phone: new.phone.trim().to_string(),
            points_balance: 0,
            tier: Tier::Bronze,
            joined_at: self.clock.now(),
        };
        customer.set_balance(new.opening_balance);

        match self.emails.entry(Customer::email_key(email)) {
            Entry::Occupied(_) => Err(LoyaltyError::AlreadyExists(email.to_string())),
            Entry::Vacant(slot) => {
                if !self.customers.insert_if_absent(&customer_id, customer.clone()) {
                    return Err(LoyaltyError::invalid(format!(
                        "Customer id already in use: {}",
                        customer_id
                    )));
                }
                slot.insert(customer_id);
                metrics::record_customer_registered(customer.tier.name());
                info!(customer_id = %customer.id, "客户已注册");
                Ok(customer)
            }
        }
    }

    /// 演示登录：邮箱存在且密码等于共享演示密码
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
        shared_password: &str,
    ) -> Result<Customer> {
        match self.find_customer_by_email(email) {
            Some(customer) if password == shared_password => Ok(customer),
            _ => {
                debug!(email = %email, "登录失败");
                Err(LoyaltyError::InvalidCredentials)
            }
        }
    }

    /// 为客户增加积分并重新计算等级
    ///
    /// 增量在构造 [`PointsDelta`] 时已归一化为非负数，余额不会因此减少。
    #[instrument(skip(self))]
    pub fn credit_points(&self, customer_id: &str, delta: PointsDelta) -> Result<Customer> {
        self.customers
            .update(customer_id, |customer| {
                customer.set_balance(customer.points_balance.saturating_add(delta.value()));
                customer.clone()
            })
            .ok_or_else(|| LoyaltyError::CustomerNotFound(customer_id.to_string()))
    }

    /// 积分排行榜
    ///
    /// 按余额降序排名（1..N），余额相同时保持注册顺序
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut customers = self.customers.list();
        customers.sort_by(|a, b| b.points_balance.cmp(&a.points_balance));

        customers
            .into_iter()
            .enumerate()
            .map(|(i, c)| LeaderboardEntry {
                rank: i + 1,
                customer_id: c.id,
                name: c.name,
                points_balance: c.points_balance,
                tier: c.tier,
            })
            .collect()
    }

    // ========================================================================
    // 交易
    // ========================================================================

    /// 追加交易记录
    ///
    /// 不校验客户是否存在，总是成功
    pub fn record_transaction(&self, new: NewTransaction) -> Transaction {
        let transaction = Transaction {
            id: self.ids.next_id(),
            customer_id: new.customer_id,
            amount: new.amount,
            recipient: new.recipient,
            points_earned: new.points_earned,
            destination_country: new.destination_country,
            verification: new.verification,
            kind: TransactionKind::Remittance,
            created_at: self.clock.now(),
        };
        self.transactions.insert(&transaction.id, transaction.clone());
        transaction
    }

    /// 客户的交易记录（按记录顺序）
    pub fn list_transactions(&self, customer_id: &str) -> Vec<Transaction> {
        self.transactions
            .list_by(|t| t.customer_id == customer_id)
    }

    /// 处理一笔汇款：校验、加分、记录交易
    #[instrument(
        skip(self, request),
        fields(amount = %request.amount, destination = %request.destination_country)
    )]
    pub fn send_remittance(
        &self,
        customer_id: &str,
        request: RemittanceRequest,
    ) -> Result<RemittanceReceipt> {
        if request.amount <= Decimal::ZERO {
            return Err(LoyaltyError::invalid("Invalid amount"));
        }
        let recipient = request.recipient.trim();
        if recipient.is_empty() {
            return Err(LoyaltyError::invalid("Recipient name is required"));
        }
        let destination = request.destination_country.trim().to_uppercase();
        if destination.is_empty() {
            return Err(LoyaltyError::invalid("Please select a destination country"));
        }
        if !self.customers.contains(customer_id) {
            return Err(LoyaltyError::CustomerNotFound(customer_id.to_string()));
        }

        let points_earned = points_for_amount(request.amount);
        let customer = self.credit_points(customer_id, PointsDelta::from(points_earned))?;

        let verification = Verification::select(
            request.member_card.as_deref(),
            request.id_number.as_deref(),
        );
        let transaction = self.record_transaction(NewTransaction {
            customer_id: customer_id.to_string(),
            amount: request.amount,
            recipient: recipient.to_string(),
            points_earned,
            destination_country: Some(destination.clone()),
            verification,
        });

        metrics::record_remittance(
            &destination,
            request.amount.to_f64().unwrap_or_default(),
            points_earned,
        );

        let destination_name = catalog::country_name(&destination).to_string();
        info!(
            transaction_id = %transaction.id,
            points_earned,
            new_balance = customer.points_balance,
            "汇款已记录"
        );

        Ok(RemittanceReceipt {
            message: format!(
                "R{:.2} sent successfully to {} in {}!",
                request.amount, recipient, destination_name
            ),
            points_earned,
            new_balance: customer.points_balance,
            tier: customer.tier,
            transaction_id: transaction.id,
            destination_name,
        })
    }

    /// 分页查询交易历史，新的在前
    pub fn transaction_history(
        &self,
        customer_id: &str,
        query: &TransactionQuery,
    ) -> Result<Page<Transaction>> {
        if !self.customers.contains(customer_id) {
            return Err(LoyaltyError::CustomerNotFound(customer_id.to_string()));
        }

        let country = query
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let mut transactions: Vec<Transaction> = self
            .list_transactions(customer_id)
            .into_iter()
            .filter(|t| match country {
                Some(code) => t
                    .destination_country
                    .as_deref()
                    .is_some_and(|d| d.eq_ignore_ascii_case(code)),
                None => true,
            })
            .collect();
        newest_first(&mut transactions);

        Ok(Page::slice(transactions, query))
    }

    /// 仪表盘：客户信息、最近 `limit` 笔交易与交易总数
    pub fn recent_activity(&self, customer_id: &str, limit: usize) -> Result<Dashboard> {
        let customer = self
            .get_customer(customer_id)
            .ok_or_else(|| LoyaltyError::CustomerNotFound(customer_id.to_string()))?;

        let mut transactions = self.list_transactions(customer_id);
        let total_transactions = transactions.len();
        newest_first(&mut transactions);
        transactions.truncate(limit);

        Ok(Dashboard {
            next_tier: customer.tier.next(),
            points_to_next_tier: Tier::points_to_next(customer.points_balance),
            customer,
            recent_transactions: transactions,
            total_transactions,
        })
    }

    // ========================================================================
    // 奖励与兑换
    // ========================================================================

    /// 按目录顺序列出奖励
    pub fn list_rewards(&self) -> Vec<Reward> {
        self.rewards.list()
    }

    pub fn get_reward(&self, reward_id: &str) -> Option<Reward> {
        self.rewards.get(reward_id)
    }

    pub fn rewards_by_category(&self) -> Vec<RewardCategory> {
        RewardCategory::group(self.rewards.list())
    }

    /// 兑换奖励
    ///
    /// 余额检查、兑换记录写入与扣减在客户记录锁内一次完成，
    /// 失败时余额保持不变。
    #[instrument(skip(self))]
    pub fn redeem(&self, customer_id: &str, reward_id: &str) -> Result<RedemptionOutcome> {
        let not_found = || LoyaltyError::RedemptionTargetNotFound {
            customer_id: customer_id.to_string(),
            reward_id: reward_id.to_string(),
        };

        let Some(reward) = self.get_reward(reward_id) else {
            metrics::record_redemption(UNKNOWN_CATALOG_ID, "not_found", 0);
            return Err(not_found());
        };
        if !reward.available {
            metrics::record_redemption(&reward.id, "unavailable", 0);
            return Err(LoyaltyError::invalid("Reward is not available"));
        }

        let result = self
            .customers
            .update(customer_id, |customer| {
                if customer.points_balance < reward.points_cost {
                    return Err(LoyaltyError::InsufficientBalance {
                        required: reward.points_cost,
                        available: customer.points_balance,
                    });
                }

                let redemption = Redemption {
                    id: self.ids.next_id(),
                    customer_id: customer.id.clone(),
                    reward_id: reward.id.clone(),
                    points_spent: reward.points_cost,
                    redeemed_at: self.clock.now(),
                    status: RedemptionStatus::Completed,
                };
                self.redemptions.insert(&redemption.id, redemption.clone());
                customer.set_balance(customer.points_balance - reward.points_cost);

                Ok((redemption, customer.points_balance))
            })
            .unwrap_or_else(|| Err(not_found()));

        match result {
            Ok((redemption, new_balance)) => {
                metrics::record_redemption(&reward.id, "success", reward.points_cost);
                info!(redemption_id = %redemption.id, new_balance, "奖励已兑换");
                Ok(RedemptionOutcome {
                    redemption,
                    message: REDEEM_SUCCESS_MESSAGE.to_string(),
                    new_balance,
                })
            }
            Err(e) => {
                let status = match e {
                    LoyaltyError::InsufficientBalance { .. } => "insufficient_points",
                    _ => "not_found",
                };
                metrics::record_redemption(&reward.id, status, 0);
                warn!(error = %e, "兑换失败");
                Err(e)
            }
        }
    }

    /// 客户的兑换记录（按兑换顺序）
    pub fn list_redemptions(&self, customer_id: &str) -> Vec<Redemption> {
        self.redemptions
            .list_by(|r| r.customer_id == customer_id)
    }

    // ========================================================================
    // 礼品
    // ========================================================================

    pub fn list_gifts(&self) -> Vec<Gift> {
        self.gifts.list()
    }

    /// 用积分为其他会员购买礼品
    #[instrument(skip(self, request), fields(gift_id = %request.gift_id))]
    pub fn send_gift(&self, customer_id: &str, request: SendGiftRequest) -> Result<GiftReceipt> {
        let gift_id = request.gift_id.trim();
        let recipient = request.recipient.trim();
        let member_id = request.recipient_member_id.trim();
        if gift_id.is_empty() || recipient.is_empty() || member_id.is_empty() {
            return Err(LoyaltyError::invalid("All fields are required"));
        }

        let Some(gift) = self.gifts.get(gift_id) else {
            metrics::record_gift(UNKNOWN_CATALOG_ID, "invalid", 0);
            return Err(LoyaltyError::invalid("Invalid gift selected"));
        };

        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from);

        let receipt = self
            .customers
            .update(customer_id, |customer| {
                if customer.points_balance < gift.points_cost {
                    return Err(LoyaltyError::InsufficientBalance {
                        required: gift.points_cost,
                        available: customer.points_balance,
                    });
                }

                let receipt = GiftReceipt {
                    id: self.ids.next_id(),
                    sender_id: customer.id.clone(),
                    gift_id: gift.id.clone(),
                    recipient_name: recipient.to_string(),
                    recipient_member_id: member_id.to_string(),
                    message,
                    points_spent: gift.points_cost,
                    sent_at: self.clock.now(),
                };
                self.gift_receipts.insert(&receipt.id, receipt.clone());
                customer.set_balance(customer.points_balance - gift.points_cost);
                Ok(receipt)
            })
            .unwrap_or_else(|| Err(LoyaltyError::CustomerNotFound(customer_id.to_string())));

        match &receipt {
            Ok(r) => {
                metrics::record_gift(&gift.id, "success", r.points_spent);
                info!(receipt_id = %r.id, recipient = %r.recipient_name, "礼品已送出");
            }
            Err(e) => {
                metrics::record_gift(&gift.id, "rejected", 0);
                warn!(error = %e, "送礼失败");
            }
        }
        receipt
    }

    /// 客户送出的礼品（按时间顺序）
    pub fn list_gift_receipts(&self, customer_id: &str) -> Vec<GiftReceipt> {
        self.gift_receipts.list_by(|r| r.sender_id == customer_id)
    }
}

/// 礼品送出成功提示
pub fn gift_success_message(recipient: &str) -> String {
    format!(
        "Gift sent successfully to {}! They will receive a notification.",
        recipient
    )
}

/// 按时间倒序排列；时间相同时后记录的在前
fn newest_first(transactions: &mut [Transaction]) {
    transactions.reverse();
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
