//! 演示数据生成器
//!
//! 批量生成随机客户及其汇款记录，用于填充排行榜和交易历史。

use crate::catalog::COUNTRIES;
use crate::ledger::{Ledger, RemittanceRequest};
use crate::models::NewCustomer;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use std::ops::Range;
use tracing::{debug, info};

/// 数据生成器配置
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 生成的客户数量
    pub customer_count: usize,
    /// 开户积分范围
    pub opening_balance: Range<u64>,
    /// 每个客户的汇款笔数范围
    pub remittances_per_customer: Range<usize>,
    /// 单笔汇款金额范围（整数货币单位）
    pub remittance_amount: Range<u64>,
}

impl Default for GeneratorConfig {
    /// 默认配置：20 个客户，开户 0-1500 积分，每人 0-5 笔汇款
    fn default() -> Self {
        Self {
            customer_count: 20,
            opening_balance: 0..1500,
            remittances_per_customer: 0..5,
            remittance_amount: 50..5000,
        }
    }
}

impl GeneratorConfig {
    pub fn with_customer_count(mut self, count: usize) -> Self {
        self.customer_count = count;
        self
    }
}

/// 批量数据生成器
pub struct DataGenerator {
    config: GeneratorConfig,
}

impl DataGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// 生成一个随机客户
    ///
    /// 邮箱带随机后缀以降低与已有客户重复的概率
    pub fn random_customer(&self) -> NewCustomer {
        let mut rng = rand::thread_rng();
        let email: String = SafeEmail().fake();
        let (local, domain) = email.split_once('@').unwrap_or(("member", "example.com"));
        let suffix: u32 = rng.gen_range(1000..10000);

        NewCustomer::new(
            Name().fake::<String>(),
            format!("{}{}@{}", local, suffix, domain),
            PhoneNumber().fake::<String>(),
        )
        .with_opening_balance(random_in(&mut rng, &self.config.opening_balance))
    }

    /// 生成指定数量的随机客户
    pub fn generate_customers(&self) -> Vec<NewCustomer> {
        (0..self.config.customer_count)
            .map(|_| self.random_customer())
            .collect()
    }

    /// 生成一笔随机汇款
    pub fn random_remittance(&self) -> RemittanceRequest {
        let mut rng = rand::thread_rng();
        let amount = random_in(&mut rng, &self.config.remittance_amount).max(1);
        let country = COUNTRIES
            .choose(&mut rng)
            .map(|(code, _)| code.to_string())
            .unwrap_or_else(|| "ZA".to_string());

        RemittanceRequest {
            amount: Decimal::from(amount),
            recipient: Name().fake(),
            destination_country: country,
            member_card: None,
            id_number: None,
        }
    }

    /// 批量填充账本
    ///
    /// 注册客户后为每人生成若干笔汇款；注册失败（如邮箱重复）的客户会被跳过
    pub fn populate(&self, ledger: &Ledger) -> GenerationStats {
        let mut rng = rand::thread_rng();
        let mut stats = GenerationStats::default();

        for new_customer in self.generate_customers() {
            let customer = match ledger.register_customer(new_customer) {
                Ok(customer) => customer,
                Err(e) => {
                    debug!(error = %e, "跳过生成的客户");
                    stats.skipped += 1;
                    continue;
                }
            };
            stats.customers += 1;

            let count = if self.config.remittances_per_customer.is_empty() {
                0
            } else {
                rng.gen_range(self.config.remittances_per_customer.clone())
            };
            for _ in 0..count {
                if ledger
                    .send_remittance(&customer.id, self.random_remittance())
                    .is_ok()
                {
                    stats.remittances += 1;
                }
            }
        }

        info!(
            customers = stats.customers,
            remittances = stats.remittances,
            skipped = stats.skipped,
            "演示数据已生成"
        );
        stats
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

fn random_in(rng: &mut impl Rng, range: &Range<u64>) -> u64 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

/// 生成结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub customers: usize,
    pub remittances: usize,
    pub skipped: usize,
}
