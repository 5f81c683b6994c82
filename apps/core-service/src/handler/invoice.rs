//! # 請求書ハンドラ
//!
//! 請求書の内部 API を提供する。呼び出し元ユーザーは上流のゲートウェイが認証済みで、
//! 書き込みはリクエストボディ、読み取りと削除はクエリの `user_id` で渡される。
//!
//! ## エンドポイント
//!
//! - `POST /internal/invoices` - 空の下書きを作成
//! - `GET /internal/invoices/{id}` - 請求書を取得
//! - `PUT /internal/invoices/{id}` - 請求書を保存（upsert）
//! - `DELETE /internal/invoices/{id}/logo` - 仕入先ロゴを削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use billable_domain::{
    invoice::{Invoice, InvoiceFields, InvoiceId, InvoiceItem, InvoiceTaxes},
    user::{CallerContext, UserId},
};
use billable_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, usecase::InvoiceUseCaseImpl};

/// 請求書 API の共有状態
pub struct InvoiceState {
    pub usecase: InvoiceUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 呼び出し元ユーザー ID クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct CallerQuery {
    pub user_id: String,
}

/// 請求書作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub user_id: String,
}

/// 請求書保存リクエスト
#[derive(Debug, Deserialize)]
pub struct SaveInvoiceRequest {
    pub user_id: String,
    pub invoice: InvoiceFields,
    #[serde(default)]
    pub items:   Vec<InvoiceItem>,
    #[serde(default)]
    pub taxes:   Vec<InvoiceTaxes>,
}

/// 請求書 DTO
///
/// スカラーフィールドはトップレベルに展開する。
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct InvoiceDto {
    pub id:      String,
    pub user_id: String,
    #[serde(flatten)]
    pub fields:  InvoiceFields,
    pub items:   Vec<InvoiceItem>,
    pub taxes:   Vec<InvoiceTaxes>,
}

impl From<Invoice> for InvoiceDto {
    fn from(invoice: Invoice) -> Self {
        Self {
            id:      invoice.id().to_string(),
            user_id: invoice.user_id().to_string(),
            fields:  invoice.fields().clone(),
            items:   invoice.items().to_vec(),
            taxes:   invoice.taxes().to_vec(),
        }
    }
}

fn caller_from(user_id: String) -> Result<CallerContext, CoreError> {
    Ok(CallerContext::new(UserId::new(user_id)?))
}

// --- ハンドラ ---

/// POST /internal/invoices
///
/// - `201 Created`: 作成された請求書
/// - `400 Bad Request`: `user_id` が不正
#[tracing::instrument(skip_all)]
pub async fn create_invoice(
    State(state): State<Arc<InvoiceState>>,
    Json(req): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let caller = caller_from(req.user_id)?;

    let invoice = state.usecase.create_invoice(&caller).await?;

    let response = ApiResponse::new(InvoiceDto::from(invoice));
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /internal/invoices/{id}
///
/// - `200 OK`: 請求書
/// - `404 Not Found`: 存在しない、または呼び出し元の所有ではない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_invoice(
    State(state): State<Arc<InvoiceState>>,
    Path(id): Path<String>,
    Query(query): Query<CallerQuery>,
) -> Result<impl IntoResponse, CoreError> {
    let id = InvoiceId::new(id)?;
    let caller = caller_from(query.user_id)?;

    let invoice = state.usecase.get_invoice(&id, &caller).await?;

    let response = ApiResponse::new(InvoiceDto::from(invoice));
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /internal/invoices/{id}
///
/// 明細・税・ラベルを含めて請求書全体を保存する。
///
/// - `204 No Content`: 保存成功
/// - `400 Bad Request`: ID が不正
/// - `404 Not Found`: 存在しない、または呼び出し元の所有ではない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn save_invoice(
    State(state): State<Arc<InvoiceState>>,
    Path(id): Path<String>,
    Json(req): Json<SaveInvoiceRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let id = InvoiceId::new(id)?;
    let caller = caller_from(req.user_id)?;

    state
        .usecase
        .save_invoice(&id, req.invoice, req.items, req.taxes, &caller)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /internal/invoices/{id}/logo
///
/// - `204 No Content`: 削除成功（ロゴ未設定でも成功）
/// - `404 Not Found`: 存在しない、または呼び出し元の所有ではない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_logo(
    State(state): State<Arc<InvoiceState>>,
    Path(id): Path<String>,
    Query(query): Query<CallerQuery>,
) -> Result<impl IntoResponse, CoreError> {
    let id = InvoiceId::new(id)?;
    let caller = caller_from(query.user_id)?;

    state.usecase.delete_logo(&id, &caller).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::{delete, get, post},
    };
    use billable_domain::clock::FixedClock;
    use billable_infra::fake::FakeInvoiceRepository;
    use chrono::{DateTime, NaiveDate};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    // --- ヘルパー ---

    fn seeded_repo() -> FakeInvoiceRepository {
        let fields = InvoiceFields {
            supplier_logo: Some("http://x/logo.png".to_string()),
            labels: vec!["vip".to_string()],
            ..InvoiceFields::blank(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
        };
        let record = Invoice::new(
            InvoiceId::new("inv1").unwrap(),
            UserId::new("u1").unwrap(),
            fields,
            Vec::new(),
            Vec::new(),
        )
        .to_record()
        .unwrap();
        FakeInvoiceRepository::with_records([record])
    }

    fn create_test_app(repo: &FakeInvoiceRepository) -> Router {
        let now = DateTime::from_timestamp(1_792_368_000, 0).unwrap();
        let usecase =
            InvoiceUseCaseImpl::new(Arc::new(repo.clone()), Arc::new(FixedClock::new(now)));
        let state = Arc::new(InvoiceState { usecase });

        Router::new()
            .route("/internal/invoices", post(create_invoice))
            .route(
                "/internal/invoices/{id}",
                get(get_invoice).put(save_invoice),
            )
            .route("/internal/invoices/{id}/logo", delete(delete_logo))
            .with_state(state)
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn save_body(user_id: &str, labels: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "user_id": user_id,
            "invoice": {
                "number": "2026-042",
                "date": "2026-10-19",
                "status": "final",
                "supplier_name": "Acme",
                "customer": "Globex",
                "currency": "EUR",
                "labels": labels,
            },
            "items": [{ "description": "設計", "price": 1200.5, "quantity": 3.0 }],
            "taxes": [{ "description": "VAT", "amount": 20.0 }],
        })
    }

    // --- テストケース ---

    #[tokio::test]
    async fn test_put_所有者が保存すると204が返り取得結果に反映される() {
        // Given
        let repo = seeded_repo();
        let sut = create_test_app(&repo);

        // When
        let response = sut
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/internal/invoices/inv1",
                save_body("u1", &["vip", "late"]),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = sut
            .oneshot(empty_request(Method::GET, "/internal/invoices/inv1?user_id=u1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<InvoiceDto> = response_body(response).await;
        assert_eq!(body.data.id, "inv1");
        assert_eq!(body.data.user_id, "u1");
        assert_eq!(body.data.fields.number, "2026-042");
        assert_eq!(body.data.fields.currency, "EUR");
        assert_eq!(body.data.fields.labels, vec!["vip", "late"]);
        // 省略された supplier_logo は未設定として保存される
        assert_eq!(body.data.fields.supplier_logo, None);
        assert_eq!(
            body.data.items,
            vec![InvoiceItem {
                description: "設計".to_string(),
                price:       1200.5,
                quantity:    3.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_put_他人の請求書は404が返り書き込まれない() {
        let repo = seeded_repo();
        let sut = create_test_app(&repo);

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/internal/invoices/inv1",
                save_body("u2", &["vip", "late"]),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = response_body(response).await;
        assert_eq!(body["type"], "https://billable.example.com/errors/not-found");
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_put_user_idが空白なら400が返る() {
        let repo = seeded_repo();
        let sut = create_test_app(&repo);

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/internal/invoices/inv1",
                save_body("   ", &[]),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_logo_所有者が削除すると204が返りロゴが消える() {
        let repo = seeded_repo();
        let sut = create_test_app(&repo);

        let response = sut
            .oneshot(empty_request(
                Method::DELETE,
                "/internal/invoices/inv1/logo?user_id=u1",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let record = repo.get(&InvoiceId::new("inv1").unwrap()).unwrap();
        assert_eq!(record.supplier_logo, None);
    }

    #[tokio::test]
    async fn test_delete_logo_他人の請求書は404が返る() {
        let repo = seeded_repo();
        let sut = create_test_app(&repo);

        let response = sut
            .oneshot(empty_request(
                Method::DELETE,
                "/internal/invoices/inv1/logo?user_id=u2",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let record = repo.get(&InvoiceId::new("inv1").unwrap()).unwrap();
        assert_eq!(record.supplier_logo.as_deref(), Some("http://x/logo.png"));
    }

    #[tokio::test]
    async fn test_post_空の下書きを作成すると201が返る() {
        let repo = FakeInvoiceRepository::new();
        let sut = create_test_app(&repo);

        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/internal/invoices",
                serde_json::json!({ "user_id": "u1" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: ApiResponse<InvoiceDto> = response_body(response).await;
        assert_eq!(body.data.user_id, "u1");
        assert_eq!(
            body.data.fields,
            InvoiceFields::blank(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
        );
        assert!(repo.get(&InvoiceId::new(body.data.id).unwrap()).is_some());
    }

    #[tokio::test]
    async fn test_get_存在しない請求書は404が返る() {
        let repo = seeded_repo();
        let sut = create_test_app(&repo);

        let response = sut
            .oneshot(empty_request(
                Method::GET,
                "/internal/invoices/missing?user_id=u1",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
