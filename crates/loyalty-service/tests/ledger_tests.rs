//! 账本集成测试
//!
//! 覆盖积分累积、等级、兑换与排行榜的端到端行为，以及同一客户上的并发安全。

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use loyalty_service::LoyaltyError;
use loyalty_service::ledger::{Ledger, ManualClock, RemittanceRequest, SequentialIds};
use loyalty_service::models::{NewCustomer, RedemptionStatus};
use loyalty_service::policy::{PointsDelta, Tier};

fn test_ledger() -> Ledger {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Ledger::with_capabilities(
        Arc::new(ManualClock::new(start)),
        Arc::new(SequentialIds::new("t")),
    )
}

fn add_customer(ledger: &Ledger, id: &str, balance: u64) {
    ledger
        .register_customer(
            NewCustomer::new(format!("Customer {}", id), format!("{}@loyalty.test", id), "")
                .with_id(id)
                .with_opening_balance(balance),
        )
        .unwrap();
}

fn remit(amount: rust_decimal::Decimal) -> RemittanceRequest {
    RemittanceRequest {
        amount,
        recipient: "Grace".to_string(),
        destination_country: "KE".to_string(),
        member_card: Some("CARD-001".to_string()),
        id_number: None,
    }
}

#[test]
fn test_first_remittance_earns_points() {
    let ledger = test_ledger();
    add_customer(&ledger, "c1", 0);

    let receipt = ledger.send_remittance("c1", remit(dec!(250))).unwrap();
    assert_eq!(receipt.points_earned, 2);

    let customer = ledger.get_customer("c1").unwrap();
    assert_eq!(customer.points_balance, 2);
    assert_eq!(customer.tier, Tier::Bronze);

    let transactions = ledger.list_transactions("c1");
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].points_earned, 2);
    assert_eq!(transactions[0].amount, dec!(250));
}

#[test]
fn test_redeem_then_insufficient() {
    let ledger = test_ledger();
    add_customer(&ledger, "c1", 600);

    let outcome = ledger.redeem("c1", "5").unwrap();
    assert_eq!(outcome.new_balance, 100);
    assert_eq!(outcome.redemption.status, RedemptionStatus::Completed);

    let err = ledger.redeem("c1", "5").unwrap_err();
    assert!(matches!(err, LoyaltyError::InsufficientBalance { .. }));
    assert_eq!(err.to_string(), "Insufficient points");
    assert_eq!(ledger.get_customer("c1").unwrap().points_balance, 100);
}

#[test]
fn test_tier_follows_balance_after_debit() {
    let ledger = test_ledger();
    add_customer(&ledger, "c1", 1100);
    assert_eq!(ledger.get_customer("c1").unwrap().tier, Tier::Gold);

    // 1100 - 1000 = 100
    ledger.redeem("c1", "6").unwrap();
    let customer = ledger.get_customer("c1").unwrap();
    assert_eq!(customer.points_balance, 100);
    assert_eq!(customer.tier, Tier::Bronze);
}

#[test]
fn test_reading_twice_returns_same_tier() {
    let ledger = test_ledger();
    add_customer(&ledger, "c1", 750);

    let first = ledger.get_customer("c1").unwrap();
    let second = ledger.get_customer("c1").unwrap();
    assert_eq!(first.tier, second.tier);
    assert_eq!(first, second);
}

#[test]
fn test_invalid_credit_is_zero_credit() {
    let ledger = test_ledger();
    add_customer(&ledger, "c1", 10);

    for delta in [
        PointsDelta::from(-100i64),
        PointsDelta::parse("ten"),
        PointsDelta::from_json(&serde_json::json!({"points": 5})),
    ] {
        let customer = ledger.credit_points("c1", delta).unwrap();
        assert_eq!(customer.points_balance, 10);
    }
}

#[test]
fn test_leaderboard_order() {
    let ledger = test_ledger();
    add_customer(&ledger, "low", 0);
    add_customer(&ledger, "mid", 500);
    add_customer(&ledger, "high", 1000);

    let board = ledger.leaderboard();
    let ranked: Vec<(usize, &str, u64)> = board
        .iter()
        .map(|e| (e.rank, e.customer_id.as_str(), e.points_balance))
        .collect();
    assert_eq!(
        ranked,
        vec![(1, "high", 1000), (2, "mid", 500), (3, "low", 0)]
    );
}

#[test]
fn test_transaction_history_pagination() {
    let ledger = test_ledger();
    add_customer(&ledger, "c1", 0);
    for i in 1..=5u32 {
        ledger
            .send_remittance("c1", remit(rust_decimal::Decimal::from(i * 100)))
            .unwrap();
    }

    let query = loyalty_service::ledger::TransactionQuery {
        page: 2,
        page_size: 2,
        country: None,
    };
    let page = ledger.transaction_history("c1", &query).unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    let amounts: Vec<_> = page.items.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(300), dec!(200)]);
}

#[test]
fn test_concurrent_credits_are_not_lost() {
    let ledger = Arc::new(test_ledger());
    add_customer(&ledger, "c1", 0);

    std::thread::scope(|s| {
        for _ in 0..8 {
            let ledger = Arc::clone(&ledger);
            s.spawn(move || {
                for _ in 0..250 {
                    ledger.credit_points("c1", PointsDelta::from(2u64)).unwrap();
                }
            });
        }
    });

    let customer = ledger.get_customer("c1").unwrap();
    assert_eq!(customer.points_balance, 4000);
    assert_eq!(customer.tier, Tier::Gold);
}

#[test]
fn test_concurrent_redeems_never_overdraw() {
    let ledger = Arc::new(test_ledger());
    // 足够兑换 10 次 R50 话费券
    add_customer(&ledger, "c1", 500);

    let successes: usize = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                s.spawn(move || {
                    (0..5)
                        .filter(|_| ledger.redeem("c1", "1").is_ok())
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(successes, 10);
    assert_eq!(ledger.get_customer("c1").unwrap().points_balance, 0);
    assert_eq!(ledger.list_redemptions("c1").len(), 10);
}

#[test]
fn test_concurrent_credit_and_redeem_balance_consistent() {
    let ledger = Arc::new(test_ledger());
    add_customer(&ledger, "c1", 0);

    let redeemed: usize = std::thread::scope(|s| {
        let creditor = {
            let ledger = Arc::clone(&ledger);
            s.spawn(move || {
                for _ in 0..100 {
                    ledger.credit_points("c1", PointsDelta::from(50u64)).unwrap();
                }
            })
        };
        let redeemers: Vec<_> = (0..4)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                s.spawn(move || {
                    (0..50)
                        .filter(|_| ledger.redeem("c1", "1").is_ok())
                        .count()
                })
            })
            .collect();

        creditor.join().unwrap();
        redeemers.into_iter().map(|h| h.join().unwrap()).sum()
    });

    let customer = ledger.get_customer("c1").unwrap();
    assert_eq!(customer.points_balance, 5000 - 50 * redeemed as u64);
    assert_eq!(customer.tier, Tier::from_balance(customer.points_balance));
}

#[test]
fn test_concurrent_registration_same_email() {
    let ledger = Arc::new(test_ledger());

    let created: usize = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                s.spawn(move || {
                    ledger
                        .register_customer(NewCustomer::new("Dup", "dup@loyalty.test", ""))
                        .is_ok() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(created, 1);
    assert_eq!(ledger.customer_count(), 1);
}
