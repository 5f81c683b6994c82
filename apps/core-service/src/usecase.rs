//! # ユースケース層
//!
//! Core Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと Clock を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入力の変換のみ行い、ロジックはユースケースに集約

pub mod invoice;

pub use invoice::InvoiceUseCaseImpl;
