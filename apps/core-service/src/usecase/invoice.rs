//! 請求書ユースケース
//!
//! すべての操作は「所有者確認 → 変換 → 1 回の書き込み」の順で進む。
//! 所有者確認に失敗した場合は書き込みを一切行わない。

use std::sync::Arc;

use billable_domain::{
    DomainError,
    clock::Clock,
    invoice::{
        Invoice,
        InvoiceFields,
        InvoiceId,
        InvoiceItem,
        InvoicePatch,
        InvoiceRecord,
        InvoiceTaxes,
    },
    user::CallerContext,
};
use billable_infra::repository::InvoiceRepository;
use billable_shared::{event_log::event, log_business_event};

use crate::error::CoreError;

/// 請求書ユースケース
pub struct InvoiceUseCaseImpl {
    invoice_repository: Arc<dyn InvoiceRepository>,
    clock: Arc<dyn Clock>,
}

impl InvoiceUseCaseImpl {
    pub fn new(invoice_repository: Arc<dyn InvoiceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            invoice_repository,
            clock,
        }
    }

    /// 空の下書き請求書を作成する
    ///
    /// ID は新規に払い出し、発行日は Clock の今日の日付とする。
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id()))]
    pub async fn create_invoice(&self, caller: &CallerContext) -> Result<Invoice, CoreError> {
        let invoice = Invoice::blank(
            InvoiceId::generate(),
            caller.user_id().clone(),
            self.clock.today(),
        );

        self.invoice_repository.upsert(&invoice.to_record()?).await?;

        log_business_event!(
            event.category = event::category::INVOICE,
            event.action = event::action::INVOICE_CREATED,
            event.entity_type = event::entity_type::INVOICE,
            event.entity_id = %invoice.id(),
            event.actor_id = %caller.user_id(),
            event.result = event::result::SUCCESS,
            "請求書を作成"
        );

        Ok(invoice)
    }

    /// 所有者確認付きで請求書を取得する
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn get_invoice(
        &self,
        id: &InvoiceId,
        caller: &CallerContext,
    ) -> Result<Invoice, CoreError> {
        let record = self.find_owned_or_fail(id, caller).await?;
        Ok(Invoice::from_record(record)?)
    }

    /// 請求書を保存する
    ///
    /// 1. 所有者確認（存在しない・他人の請求書は NotFound、書き込みなし）
    /// 2. 明細・税・ラベルを直列化してレコードを組み立てる
    /// 3. ID をキーに upsert する
    ///
    /// `user_id` は呼び出し元から取るため、この操作で所有者が変わることはない。
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn save_invoice(
        &self,
        id: &InvoiceId,
        fields: InvoiceFields,
        items: Vec<InvoiceItem>,
        taxes: Vec<InvoiceTaxes>,
        caller: &CallerContext,
    ) -> Result<(), CoreError> {
        self.find_owned_or_fail(id, caller).await?;

        let record = Invoice::new(id.clone(), caller.user_id().clone(), fields, items, taxes)
            .to_record()?;
        self.invoice_repository.upsert(&record).await?;

        log_business_event!(
            event.category = event::category::INVOICE,
            event.action = event::action::INVOICE_SAVED,
            event.entity_type = event::entity_type::INVOICE,
            event.entity_id = %id,
            event.actor_id = %caller.user_id(),
            event.result = event::result::SUCCESS,
            "請求書を保存"
        );

        Ok(())
    }

    /// 仕入先ロゴの参照を削除する
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn delete_logo(&self, id: &InvoiceId, caller: &CallerContext) -> Result<(), CoreError> {
        self.find_owned_or_fail(id, caller).await?;

        self.invoice_repository
            .update_fields(id, &InvoicePatch::clear_supplier_logo())
            .await?;

        log_business_event!(
            event.category = event::category::INVOICE,
            event.action = event::action::LOGO_DELETED,
            event.entity_type = event::entity_type::INVOICE,
            event.entity_id = %id,
            event.actor_id = %caller.user_id(),
            event.result = event::result::SUCCESS,
            "仕入先ロゴを削除"
        );

        Ok(())
    }

    async fn find_owned_or_fail(
        &self,
        id: &InvoiceId,
        caller: &CallerContext,
    ) -> Result<InvoiceRecord, CoreError> {
        self.invoice_repository
            .find_owned(id, caller.user_id())
            .await?
            .ok_or_else(|| {
                DomainError::NotFound {
                    entity_type: "Invoice",
                    id:          id.to_string(),
                }
                .into()
            })
    }
}
