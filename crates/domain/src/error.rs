//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない、または所有者が異なる |
//! | `Serialization` | 500 Internal Server Error | 構造化フィールドの直列化・復元失敗 |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// 所有者が一致しない場合も同じバリアントを使う。
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Invoice" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 構造化フィールドの直列化・復元エラー
    #[error("{field} の直列化に失敗しました: {source}")]
    Serialization {
        /// 対象フィールド名（"items", "taxes", "labels"）
        field:  &'static str,
        #[source]
        source: serde_json::Error,
    },
}
