//! # テスト用フェイクリポジトリ
//!
//! ユースケーステスト・ハンドラテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! billable-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use billable_domain::{
    invoice::{InvoiceId, InvoicePatch, InvoiceRecord},
    user::UserId,
};

use crate::{error::InfraError, repository::InvoiceRepository};

/// インメモリの請求書リポジトリ
///
/// 書き込み回数を数えるため、「書き込みが発生しないこと」を検証できる。
/// [`fail_writes`](Self::fail_writes) で書き込みを失敗させられる。
#[derive(Clone, Default)]
pub struct FakeInvoiceRepository {
    records:     Arc<Mutex<HashMap<InvoiceId, InvoiceRecord>>>,
    writes:      Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl FakeInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期データを投入する（書き込み回数には含めない）
    pub fn with_records(records: impl IntoIterator<Item = InvoiceRecord>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.records.lock().unwrap();
            for record in records {
                map.insert(record.id.clone(), record);
            }
        }
        repo
    }

    /// 格納されているレコードを所有者に関係なく取得する
    pub fn get(&self, id: &InvoiceId) -> Option<InvoiceRecord> {
        self.records.lock().unwrap().get(id).cloned()
    }

    /// これまでに成功した書き込み回数
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// 以降の書き込みをすべて失敗させる
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), InfraError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("書き込みが拒否されました"));
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceRepository for FakeInvoiceRepository {
    async fn find_owned(
        &self,
        id: &InvoiceId,
        owner: &UserId,
    ) -> Result<Option<InvoiceRecord>, InfraError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(id)
            .filter(|r| r.is_owned_by(owner))
            .cloned())
    }

    async fn upsert(&self, record: &InvoiceRecord) -> Result<(), InfraError> {
        self.check_writable()?;
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update_fields(&self, id: &InvoiceId, patch: &InvoicePatch) -> Result<(), InfraError> {
        self.check_writable()?;
        if let Some(record) = self.records.lock().unwrap().get_mut(id) {
            record.apply(patch);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
