//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲

pub mod health;
pub mod invoice;

pub use health::{ReadinessState, health_check, readiness_check};
pub use invoice::{InvoiceState, create_invoice, delete_logo, get_invoice, save_invoice};
