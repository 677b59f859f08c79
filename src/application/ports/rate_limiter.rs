//! Rate Limiter Port - 请求限流
//!
//! 按客户端标识（网络地址）计数的固定窗口限流，具体实现在 infrastructure/memory 层

use std::time::Duration;

/// 限流判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// 是否放行
    pub allowed: bool,
    /// 窗口内最大请求数
    pub limit: u32,
    /// 当前窗口剩余可用次数
    pub remaining: u32,
    /// 距离窗口重置的时间
    pub reset_after: Duration,
}

/// Rate Limiter Port
pub trait RateLimiterPort: Send + Sync {
    /// 记录一次请求并判定是否放行
    ///
    /// 计数与判定必须是原子的
    fn check(&self, key: &str) -> RateLimitDecision;

    /// 清理已过期的窗口，返回清理数量
    fn purge_expired(&self) -> usize;
}
