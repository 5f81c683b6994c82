//! # 請求書
//!
//! 請求書エンティティと、その永続化形式を定義する。
//!
//! ## 2 つの表現
//!
//! | 型 | 用途 | `items` / `taxes` / `labels` |
//! |---|------|------------------------------|
//! | [`Invoice`] | アプリケーション内の操作対象 | 構造化された値（`Vec`） |
//! | [`InvoiceRecord`] | DB の 1 行 | 直列化されたテキスト |
//!
//! 変換は [`Invoice::to_record`] と [`Invoice::from_record`] の対で行い、
//! どちらも [`serialized_field`](crate::serialized_field) を経由する。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use billable_domain::{
//!     invoice::{Invoice, InvoiceId, InvoiceItem},
//!     user::UserId,
//! };
//! use chrono::NaiveDate;
//!
//! let invoice = Invoice::blank(
//!     InvoiceId::new("inv1")?,
//!     UserId::new("u1")?,
//!     NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
//! );
//! let record = invoice.to_record()?;
//! assert_eq!(record.items, "[]");
//! assert_eq!(Invoice::from_record(record)?, invoice);
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
    DomainError,
    serialized_field::{self, ITEMS, LABELS, TAXES},
    user::UserId,
};

// =========================================================================
// InvoiceId
// =========================================================================

define_validated_string! {
    /// 請求書 ID（値オブジェクト）
    ///
    /// 不透明な文字列。新規作成時は UUID v7 の文字列表現を払い出す。
    pub struct InvoiceId {
        label: "請求書 ID",
        max_length: 255,
    }
}

impl InvoiceId {
    /// 新しい請求書 ID を払い出す
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }
}

// =========================================================================
// InvoiceStatus
// =========================================================================

/// 請求書のステータス
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "snake_case")]
pub enum InvoiceStatus {
    /// 作成中
    #[default]
    Draft,
    /// 確定済み
    Final,
}

impl InvoiceStatus {
    /// DB 格納用の文字列表現
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "final" => Ok(Self::Final),
            _ => Err(DomainError::Validation(format!(
                "不正な請求書ステータス: {}",
                s
            ))),
        }
    }
}

// =========================================================================
// 明細・税
// =========================================================================

/// 請求書の明細行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub price:       f64,
    pub quantity:    f64,
}

impl InvoiceItem {
    /// 単価と数量が有限値であることを検証する
    ///
    /// NaN・無限大は JSON で `null` になり、復元できなくなる。
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_finite("明細の単価", self.price)?;
        ensure_finite("明細の数量", self.quantity)
    }
}

/// 請求書に適用する税
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTaxes {
    pub description: String,
    pub amount:      f64,
}

impl InvoiceTaxes {
    /// 税額が有限値であることを検証する
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_finite("税額", self.amount)
    }
}

fn ensure_finite(label: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "{label}は有限の数値である必要があります: {value}"
        )))
    }
}

// =========================================================================
// InvoiceFields
// =========================================================================

/// 請求書のスカラーフィールド
///
/// `id` と所有者は含まない。前者はパス、後者は呼び出し元コンテキストから決まる。
/// 明細と税は別引数で受け取る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFields {
    pub number:           String,
    pub date:             NaiveDate,
    #[serde(default)]
    pub status:           InvoiceStatus,
    #[serde(default)]
    pub supplier_logo:    Option<String>,
    #[serde(default)]
    pub supplier_name:    String,
    #[serde(default)]
    pub supplier_contact: String,
    #[serde(default)]
    pub customer:         String,
    #[serde(default)]
    pub notes_a:          String,
    #[serde(default)]
    pub notes_b:          String,
    pub currency:         String,
    #[serde(default)]
    pub labels:           Vec<String>,
}

impl InvoiceFields {
    /// 新規作成時の既定値
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            number: String::new(),
            date,
            status: InvoiceStatus::Draft,
            supplier_logo: None,
            supplier_name: String::new(),
            supplier_contact: String::new(),
            customer: String::new(),
            notes_a: String::new(),
            notes_b: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            labels: Vec::new(),
        }
    }
}

/// 新規請求書の通貨
pub const DEFAULT_CURRENCY: &str = "USD";

// =========================================================================
// Invoice
// =========================================================================

/// 請求書エンティティ
///
/// # 不変条件
///
/// - 所有者（`user_id`）は生成後に変わらない
/// - [`to_record`](Self::to_record) で得たレコードは
///   [`from_record`](Self::from_record) で元の値に戻る
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    id:      InvoiceId,
    user_id: UserId,
    fields:  InvoiceFields,
    items:   Vec<InvoiceItem>,
    taxes:   Vec<InvoiceTaxes>,
}

impl Invoice {
    pub fn new(
        id: InvoiceId,
        user_id: UserId,
        fields: InvoiceFields,
        items: Vec<InvoiceItem>,
        taxes: Vec<InvoiceTaxes>,
    ) -> Self {
        Self {
            id,
            user_id,
            fields,
            items,
            taxes,
        }
    }

    /// 明細・税・ラベルが空の下書き請求書を作成する
    pub fn blank(id: InvoiceId, user_id: UserId, date: NaiveDate) -> Self {
        Self::new(
            id,
            user_id,
            InvoiceFields::blank(date),
            Vec::new(),
            Vec::new(),
        )
    }

    /// 永続化レコードから復元する
    pub fn from_record(record: InvoiceRecord) -> Result<Self, DomainError> {
        let items = serialized_field::decode(ITEMS, &record.items)?;
        let taxes = serialized_field::decode(TAXES, &record.taxes)?;
        let labels = serialized_field::decode(LABELS, &record.labels)?;

        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            fields: InvoiceFields {
                number: record.number,
                date: record.date,
                status: record.status,
                supplier_logo: record.supplier_logo,
                supplier_name: record.supplier_name,
                supplier_contact: record.supplier_contact,
                customer: record.customer,
                notes_a: record.notes_a,
                notes_b: record.notes_b,
                currency: record.currency,
                labels,
            },
            items,
            taxes,
        })
    }

    /// 構造化フィールドを直列化した永続化レコードを作成する
    ///
    /// 明細・税に有限でない数値が含まれる場合は `Validation` エラー。
    pub fn to_record(&self) -> Result<InvoiceRecord, DomainError> {
        self.items.iter().try_for_each(InvoiceItem::validate)?;
        self.taxes.iter().try_for_each(InvoiceTaxes::validate)?;
        let fields = &self.fields;

        Ok(InvoiceRecord {
            id:               self.id.clone(),
            user_id:          self.user_id.clone(),
            number:           fields.number.clone(),
            date:             fields.date,
            status:           fields.status,
            supplier_logo:    fields.supplier_logo.clone(),
            supplier_name:    fields.supplier_name.clone(),
            supplier_contact: fields.supplier_contact.clone(),
            customer:         fields.customer.clone(),
            notes_a:          fields.notes_a.clone(),
            notes_b:          fields.notes_b.clone(),
            currency:         fields.currency.clone(),
            items:            serialized_field::encode(ITEMS, &self.items)?,
            taxes:            serialized_field::encode(TAXES, &self.taxes)?,
            labels:           serialized_field::encode(LABELS, &fields.labels)?,
        })
    }

    // Getter メソッド

    pub fn id(&self) -> &InvoiceId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn fields(&self) -> &InvoiceFields {
        &self.fields
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn taxes(&self) -> &[InvoiceTaxes] {
        &self.taxes
    }

    pub fn labels(&self) -> &[String] {
        &self.fields.labels
    }

    pub fn supplier_logo(&self) -> Option<&str> {
        self.fields.supplier_logo.as_deref()
    }
}

// =========================================================================
// InvoiceRecord
// =========================================================================

/// 請求書の永続化レコード（DB の 1 行）
///
/// `items` / `taxes` / `labels` は直列化済みのテキスト。
/// upsert の作成・更新どちらの分岐でも同じレコードをそのまま書き込む。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub id:               InvoiceId,
    pub user_id:          UserId,
    pub number:           String,
    pub date:             NaiveDate,
    pub status:           InvoiceStatus,
    pub supplier_logo:    Option<String>,
    pub supplier_name:    String,
    pub supplier_contact: String,
    pub customer:         String,
    pub notes_a:          String,
    pub notes_b:          String,
    pub currency:         String,
    pub items:            String,
    pub taxes:            String,
    pub labels:           String,
}

impl InvoiceRecord {
    /// 指定ユーザーが所有しているか
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// 部分更新を適用する
    pub fn apply(&mut self, patch: &InvoicePatch) {
        if let Some(logo) = &patch.supplier_logo {
            self.supplier_logo.clone_from(logo);
        }
    }
}

// =========================================================================
// InvoicePatch
// =========================================================================

/// 請求書の部分更新
///
/// - `supplier_logo`: 変更なしは `None`、削除は `Some(None)`、
///   差し替えは `Some(Some(url))`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoicePatch {
    pub supplier_logo: Option<Option<String>>,
}

impl InvoicePatch {
    /// ロゴ参照を削除する部分更新
    pub fn clear_supplier_logo() -> Self {
        Self {
            supplier_logo: Some(None),
        }
    }

    /// 更新対象のフィールドが 1 つもないか
    pub fn is_empty(&self) -> bool {
        self.supplier_logo.is_none()
    }
}
