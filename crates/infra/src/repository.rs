//! # リポジトリ実装
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でフェイクに差し替え可能

pub mod invoice_repository;

pub use invoice_repository::{InvoiceRepository, PostgresInvoiceRepository};
