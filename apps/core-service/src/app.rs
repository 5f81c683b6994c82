//! # アプリケーション構築
//!
//! 依存コンポーネント（リポジトリ・Clock・State）の初期化とルーター構築を担当する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use billable_domain::clock::SystemClock;
use billable_infra::repository::PostgresInvoiceRepository;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        InvoiceState,
        ReadinessState,
        create_invoice,
        delete_logo,
        get_invoice,
        health_check,
        readiness_check,
        save_invoice,
    },
    usecase::InvoiceUseCaseImpl,
};

/// PostgreSQL を使う本番構成の State を組み立てる
pub fn build_states(pool: PgPool) -> (Arc<InvoiceState>, Arc<ReadinessState>) {
    let usecase = InvoiceUseCaseImpl::new(
        Arc::new(PostgresInvoiceRepository::new(pool.clone())),
        Arc::new(SystemClock),
    );

    (
        Arc::new(InvoiceState { usecase }),
        Arc::new(ReadinessState { pool }),
    )
}

/// ルーターを構築する
pub fn build_router(
    invoice_state: Arc<InvoiceState>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    let health = Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state);

    let invoices = Router::new()
        .route("/internal/invoices", post(create_invoice))
        .route(
            "/internal/invoices/{id}",
            get(get_invoice).put(save_invoice),
        )
        .route("/internal/invoices/{id}/logo", delete(delete_logo))
        .with_state(invoice_state);

    health.merge(invoices).layer(TraceLayer::new_for_http())
}
