//! # ユーザー
//!
//! 請求書の所有者と、リクエストごとの呼び出し元コンテキストを定義する。
//!
//! ユーザーの認証・登録は上流のゲートウェイが担当する。
//! このサービスが受け取るのは認証済みユーザーの ID のみ。

use serde::{Deserialize, Serialize};

define_validated_string! {
    /// ユーザー ID（値オブジェクト）
    ///
    /// 認証基盤が払い出す不透明な文字列。請求書の所有者フィールドに格納される。
    pub struct UserId {
        label: "ユーザー ID",
        max_length: 255,
    }
}

/// 呼び出し元コンテキスト
///
/// 1 リクエスト分の認証済みユーザーを表す。
/// 所有権チェックに使う `user_id` 以外は保持しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    user_id: UserId,
}

impl CallerContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// 認証済みユーザーの ID
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
