//! Expense records.
//!
//! Expenses are recorded against an account head for reporting only; money
//! actually leaving the till is a separate `payment` row in the cash ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub expense_id: i32,
    pub account_head_id: i32,
    pub amount: Decimal,
    pub expense_date: Date,
    pub narration: Option<String>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_heads::Entity",
        from = "Column::AccountHeadId",
        to = "super::account_heads::Column::AccountHeadId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    AccountHeads,
}

impl Related<super::account_heads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountHeads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
