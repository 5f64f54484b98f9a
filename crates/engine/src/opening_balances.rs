//! Opening balances for the cash drawer, bank accounts and parties.
//!
//! One row per scope (cash, a bank account, a customer or a vendor), laid
//! down once when the books are opened. `balance_type` records which side
//! the balance sits on: debit adds to the computed balance, credit
//! subtracts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceKind {
    Debit,
    Credit,
}

impl BalanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl TryFrom<&str> for BalanceKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            other => Err(EngineError::Validation(format!(
                "invalid balance kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "opening_balance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub opening_balance_id: i32,
    pub amount: Decimal,
    /// `debit` or `credit`.
    pub balance_type: String,
    pub as_of_date: Date,
    /// Exactly one of the following scope columns is set.
    pub is_cash: bool,
    pub bank_account_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub vendor_id: Option<i32>,
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
}

impl ActiveModelBehavior for ActiveModel {}
