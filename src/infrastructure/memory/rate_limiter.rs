//! In-Memory Rate Limiter Implementation
//!
//! 固定窗口计数：每个客户端标识一个 (count, window_start)，窗口到期后重新计数。
//! DashMap 的 entry 锁保证同一标识的计数与判定是原子的。

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::application::ports::{RateLimitDecision, RateLimiterPort};

/// 单个客户端的计数窗口
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started_at: Instant,
}

/// 内存限流器
pub struct InMemoryRateLimiter {
    windows: DashMap<String, Window>,
    max_requests: u32,
    window: Duration,
}

impl InMemoryRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    /// 当前跟踪的客户端数量
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });

        if now.duration_since(entry.started_at) >= self.window {
            *entry = Window {
                count: 0,
                started_at: now,
            };
        }

        entry.count = entry.count.saturating_add(1);

        let allowed = entry.count <= self.max_requests;
        let reset_after = self
            .window
            .saturating_sub(now.duration_since(entry.started_at));

        RateLimitDecision {
            allowed,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_after,
        }
    }

    fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.duration_since(w.started_at) < self.window);
        before.saturating_sub(self.windows.len())
    }
}

impl RateLimiterPort for InMemoryRateLimiter {
    fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    fn purge_expired(&self) -> usize {
        let purged = self.purge_expired_at(Instant::now());
        if purged > 0 {
            tracing::debug!(purged = purged, "Expired rate limit windows purged");
        }
        purged
    }
}
