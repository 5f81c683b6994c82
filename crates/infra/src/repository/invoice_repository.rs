//! # InvoiceRepository
//!
//! 請求書の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **所有権付き検索**: 読み取りは常に `id` と `user_id` の両方で絞り込む
//! - **upsert**: 作成・更新を `INSERT ... ON CONFLICT (id) DO UPDATE` の 1 文で行う。
//!   同一 id への同時保存は DB の行単位の原子性により後勝ちになる
//! - **直列化済みの値のみ扱う**: `items` / `taxes` / `labels` はドメイン層で
//!   テキスト化された [`InvoiceRecord`] として受け渡す

use async_trait::async_trait;
use billable_domain::{
    invoice::{InvoiceId, InvoicePatch, InvoiceRecord, InvoiceStatus},
    user::UserId,
};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::InfraError;

/// 請求書リポジトリトレイト
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// 指定ユーザーが所有する請求書を検索する
    ///
    /// 存在しない場合と所有者が異なる場合はどちらも `Ok(None)` を返す。
    async fn find_owned(
        &self,
        id: &InvoiceId,
        owner: &UserId,
    ) -> Result<Option<InvoiceRecord>, InfraError>;

    /// 請求書を作成または全フィールド上書きする
    async fn upsert(&self, record: &InvoiceRecord) -> Result<(), InfraError>;

    /// 請求書の一部フィールドを更新する
    ///
    /// 更新対象の行が存在しない場合も成功として扱う（所有権チェックは呼び出し側の責務）。
    async fn update_fields(&self, id: &InvoiceId, patch: &InvoicePatch) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の InvoiceRepository
#[derive(Debug, Clone)]
pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `invoices` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id:               String,
    user_id:          String,
    number:           String,
    date:             NaiveDate,
    status:           String,
    supplier_logo:    Option<String>,
    supplier_name:    String,
    supplier_contact: String,
    customer:         String,
    notes_a:          String,
    notes_b:          String,
    currency:         String,
    items:            String,
    taxes:            String,
    labels:           String,
}

impl TryFrom<InvoiceRow> for InvoiceRecord {
    type Error = InfraError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        Ok(InvoiceRecord {
            id:               InvoiceId::new(row.id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            user_id:          UserId::new(row.user_id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            number:           row.number,
            date:             row.date,
            status:           row
                .status
                .parse::<InvoiceStatus>()
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            supplier_logo:    row.supplier_logo,
            supplier_name:    row.supplier_name,
            supplier_contact: row.supplier_contact,
            customer:         row.customer,
            notes_a:          row.notes_a,
            notes_b:          row.notes_b,
            currency:         row.currency,
            items:            row.items,
            taxes:            row.taxes,
            labels:           row.labels,
        })
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id, %owner))]
    async fn find_owned(
        &self,
        id: &InvoiceId,
        owner: &UserId,
    ) -> Result<Option<InvoiceRecord>, InfraError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT
                id, user_id, number, date, status,
                supplier_logo, supplier_name, supplier_contact,
                customer, notes_a, notes_b, currency,
                items, taxes, labels
            FROM invoices
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_str())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(InvoiceRecord::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %record.id))]
    async fn upsert(&self, record: &InvoiceRecord) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, user_id, number, date, status,
                supplier_logo, supplier_name, supplier_contact,
                customer, notes_a, notes_b, currency,
                items, taxes, labels
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                number = EXCLUDED.number,
                date = EXCLUDED.date,
                status = EXCLUDED.status,
                supplier_logo = EXCLUDED.supplier_logo,
                supplier_name = EXCLUDED.supplier_name,
                supplier_contact = EXCLUDED.supplier_contact,
                customer = EXCLUDED.customer,
                notes_a = EXCLUDED.notes_a,
                notes_b = EXCLUDED.notes_b,
                currency = EXCLUDED.currency,
                items = EXCLUDED.items,
                taxes = EXCLUDED.taxes,
                labels = EXCLUDED.labels
            "#,
        )
        .bind(record.id.as_str())
        .bind(record.user_id.as_str())
        .bind(&record.number)
        .bind(record.date)
        .bind(record.status.as_str())
        .bind(record.supplier_logo.as_deref())
        .bind(&record.supplier_name)
        .bind(&record.supplier_contact)
        .bind(&record.customer)
        .bind(&record.notes_a)
        .bind(&record.notes_b)
        .bind(&record.currency)
        .bind(&record.items)
        .bind(&record.taxes)
        .bind(&record.labels)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_fields(&self, id: &InvoiceId, patch: &InvoicePatch) -> Result<(), InfraError> {
        let Some(supplier_logo) = &patch.supplier_logo else {
            return Ok(());
        };

        sqlx::query(
            r#"
            UPDATE invoices
            SET supplier_logo = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(supplier_logo.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
