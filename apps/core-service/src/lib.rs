//! # Core Service ライブラリ
//!
//! 請求書の内部 API を構成するユースケース・ハンドラ・ルーターを公開する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
