//! # ビジネスイベントログ
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、JSON ログを `jq 'select(.["event.kind"] == "business_event")'` で
//! フィルタできる。
//!
//! フィールド名はドット記法（`event.category`、`event.action`）を使用する。
//! tracing の `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `tracing::info!` レベルで出力する。呼び出し側クレートは `tracing` に依存すること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: [`event::category`] の定数
/// - `event.action`: [`event::action`] の定数
/// - `event.result`: [`event::result`] の定数
///
/// ## 推奨フィールド
///
/// - `event.entity_type` / `event.entity_id`: 対象エンティティ
/// - `event.actor_id`: 操作者 ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const INVOICE: &str = "invoice";
    }

    /// イベントアクション
    pub mod action {
        pub const INVOICE_CREATED: &str = "invoice.created";
        pub const INVOICE_SAVED: &str = "invoice.saved";
        pub const LOGO_DELETED: &str = "invoice.logo_deleted";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const INVOICE: &str = "invoice";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
    }
}
