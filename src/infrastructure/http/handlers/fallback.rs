//! Fallback Handler

use crate::infrastructure::http::error::ApiError;

/// 未匹配的路由
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
