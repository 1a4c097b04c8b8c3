//! 带时间戳的缓存条目
//!
//! 本地缓存统一包一层写入时间，过期与否是可观察、可判定的，
//! 不再依赖某个页面恰好挂载着去接收失效事件。

use serde::{Deserialize, Serialize};

/// 余额缓存有效期：5 分钟
pub const BALANCE_TTL_MS: i64 = 5 * 60 * 1000;
/// 服务目录与横幅缓存有效期：24 小时
pub const CATALOG_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub saved_at_ms: i64,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, now_ms: i64) -> Self {
        Self {
            value,
            saved_at_ms: now_ms,
        }
    }

    /// 条目写入后经过的时间是否仍在有效期内
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms.saturating_sub(self.saved_at_ms) <= ttl_ms
    }

    /// 取出仍然有效的值，过期则丢弃
    pub fn fresh_value(self, now_ms: i64, ttl_ms: i64) -> Option<T> {
        if self.is_fresh(now_ms, ttl_ms) {
            Some(self.value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_within_ttl_is_fresh() {
        let entry = CacheEntry::new(75_000u64, 1_000);
        assert!(entry.is_fresh(1_000 + BALANCE_TTL_MS, BALANCE_TTL_MS));
        assert_eq!(
            entry.fresh_value(2_000, BALANCE_TTL_MS),
            Some(75_000)
        );
    }

    #[test]
    fn entry_past_ttl_is_discarded() {
        let entry = CacheEntry::new(75_000u64, 1_000);
        assert_eq!(
            entry.fresh_value(1_001 + BALANCE_TTL_MS, BALANCE_TTL_MS),
            None
        );
    }

    #[test]
    fn clock_going_backwards_still_counts_as_fresh() {
        let entry = CacheEntry::new("x", 5_000);
        assert!(entry.is_fresh(1_000, BALANCE_TTL_MS));
    }

    #[test]
    fn entries_round_trip_through_json() {
        let entry = CacheEntry::new(vec![1u64, 2, 3], 42);
        let json = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry<Vec<u64>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
