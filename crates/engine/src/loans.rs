//! Loan records.
//!
//! A loan taken by the business. Disbursement posts a `received` row to the
//! cash ledger; repayments are expense rows whose account head carries the
//! loan's `unique_name`, which is how the loan report ties the two together.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub loan_id: i32,
    pub lender_name: String,
    #[sea_orm(unique)]
    pub unique_name: String,
    pub amount: Decimal,
    pub loan_date: Date,
    pub narration: Option<String>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
