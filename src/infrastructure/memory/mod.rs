//! Memory Layer - In-Memory State Management
//!
//! 实现 RateLimiter，限流计数只存在于进程内存中

mod rate_limiter;

pub use rate_limiter::InMemoryRateLimiter;
