//! 注入式能力：时钟与 ID 生成
//!
//! 账本不直接读取系统时间或生成随机 ID，测试可替换为确定性实现。

use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// 当前时间来源
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 唯一 ID 来源
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// UUID v4 生成器
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// 手动推进的时钟
///
/// 每次读取后自动前进 `step`，保证连续记录的时间戳严格递增
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
    step: chrono::Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, chrono::Duration::seconds(1))
    }

    pub fn with_step(start: DateTime<Utc>, step: chrono::Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }

    /// 调整当前时间
    pub fn set(&self, at: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let now = *current;
        *current = now + self.step;
        now
    }
}

/// 带前缀的顺序 ID 生成器（`{prefix}-1`, `{prefix}-2`, ...）
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + chrono::Duration::seconds(1));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new("tx");
        assert_eq!(ids.next_id(), "tx-1");
        assert_eq!(ids.next_id(), "tx-2");
    }

    #[test]
    fn test_uuid_generator_unique() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
