//! # API レスポンスエンベロープ
//!
//! 統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 統一レスポンス型
///
/// 本文を返すエンドポイントは `{ "data": T }` 形式でレスポンスを返す。
///
/// ```
/// use billable_shared::ApiResponse;
///
/// let response = ApiResponse::new("inv1");
/// assert_eq!(response.data, "inv1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
