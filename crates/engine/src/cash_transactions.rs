//! The cash and bank ledger.
//!
//! Every money movement in or out of the business lands here: customer
//! receipts, vendor payments, loan disbursements and cash/bank transfers.
//! `is_cash` distinguishes the cash drawer from bank accounts. Rows are
//! append-only; an amendment posts a reversal row and a replacement row
//! rather than editing in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Direction of a cash ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashTransactionKind {
    /// Money coming in (customer receipt, loan disbursement).
    Received,
    /// Money going out (vendor payment, expense settlement).
    Payment,
    /// Transfer between the cash drawer and a bank account.
    Contra,
}

impl CashTransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Payment => "payment",
            Self::Contra => "contra",
        }
    }

    /// The kind that reverses this one in an amendment.
    pub fn opposite(self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::Payment),
            Self::Payment => Some(Self::Received),
            Self::Contra => None,
        }
    }
}

impl TryFrom<&str> for CashTransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "received" => Ok(Self::Received),
            "payment" => Ok(Self::Payment),
            "contra" => Ok(Self::Contra),
            other => Err(EngineError::Validation(format!(
                "invalid cash transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub transaction_id: i32,
    pub transaction_date: Date,
    /// One of `received`, `payment`, `contra`.
    pub transaction_type: String,
    pub amount: Decimal,
    /// True for the cash drawer, false for a bank account leg.
    pub is_cash: bool,
    pub bank_account_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub account_head_id: Option<i32>,
    pub narration: Option<String>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_accounts::Entity",
        from = "Column::BankAccountId",
        to = "super::bank_accounts::Column::BankAccountId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    BankAccounts,
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::CustomerId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorId",
        to = "super::vendors::Column::VendorId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Vendors,
    #[sea_orm(
        belongs_to = "super::account_heads::Entity",
        from = "Column::AccountHeadId",
        to = "super::account_heads::Column::AccountHeadId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    AccountHeads,
}

impl Related<super::bank_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccounts.def()
    }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
