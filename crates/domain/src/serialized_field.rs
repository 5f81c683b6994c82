//! # 構造化フィールドの直列化
//!
//! 請求書の `items` / `taxes` / `labels` は、DB 上ではテキストカラムに
//! JSON 文字列として格納し、アプリケーション内では構造化された値として扱う。
//!
//! 符号化と復元は必ずこのモジュールの対になった関数を通す。
//!
//! ```rust
//! use billable_domain::serialized_field::{self, LABELS};
//!
//! let labels = vec!["vip".to_string(), "late".to_string()];
//! let text = serialized_field::encode(LABELS, &labels).unwrap();
//! let decoded: Vec<String> = serialized_field::decode(LABELS, &text).unwrap();
//! assert_eq!(decoded, labels);
//! ```

use serde::{Serialize, de::DeserializeOwned};

use crate::DomainError;

/// 明細フィールド名
pub const ITEMS: &str = "items";
/// 税フィールド名
pub const TAXES: &str = "taxes";
/// ラベルフィールド名
pub const LABELS: &str = "labels";

/// 空リストの直列化表現（DB カラムのデフォルト値と一致させる）
pub const EMPTY_LIST: &str = "[]";

/// 構造化された値をテキストに符号化する
pub fn encode<T>(field: &'static str, value: &T) -> Result<String, DomainError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(|source| DomainError::Serialization { field, source })
}

/// テキストから構造化された値を復元する
///
/// 空文字列（空白のみを含む）は空リストとして扱う。
pub fn decode<T>(field: &'static str, text: &str) -> Result<T, DomainError>
where
    T: DeserializeOwned,
{
    let text = if text.trim().is_empty() {
        EMPTY_LIST
    } else {
        text
    };
    serde_json::from_str(text).map_err(|source| DomainError::Serialization { field, source })
}
