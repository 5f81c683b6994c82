//! # Billable ドメイン層
//!
//! 請求書の保存・ロゴ削除を支えるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`invoice::Invoice`]）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（[`invoice::InvoiceId`],
//!   [`user::UserId`]）
//! - **永続化形式**: 構造化フィールドをテキストへ直列化した
//!   [`invoice::InvoiceRecord`]
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`invoice`] - 請求書エンティティと永続化レコード
//! - [`serialized_field`] - 構造化フィールドのテキスト直列化
//! - [`user`] - 呼び出し元ユーザーの識別子
//!
//! ## 使用例
//!
//! ```rust
//! use billable_domain::{DomainError, user::UserId};
//!
//! let user_id = UserId::new("u1").unwrap();
//! assert_eq!(user_id.as_str(), "u1");
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Invoice",
//!     id:          "inv1".to_string(),
//! };
//! assert_eq!(error.to_string(), "Invoice が見つかりません: inv1");
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod invoice;
pub mod serialized_field;
pub mod user;

pub use error::DomainError;
