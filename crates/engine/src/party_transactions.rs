//! The party (customer/vendor) subledger.
//!
//! Tracks what each customer owes and each vendor is owed. Sales post
//! positive amounts against a customer, receipts and returns post negative
//! amounts. A party's balance is the signed fold of its rows plus any
//! opening balance.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// What a party ledger entry traces back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyReference {
    Sales,
    Payment,
}

impl PartyReference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Payment => "payment",
        }
    }
}

impl TryFrom<&str> for PartyReference {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "sales" => Ok(Self::Sales),
            "payment" => Ok(Self::Payment),
            other => Err(EngineError::Validation(format!(
                "invalid party reference: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "party_transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub entry_id: i32,
    pub transaction_date: Date,
    /// Signed amount: positive increases what the party owes us.
    pub amount: Decimal,
    pub reference_type: String,
    pub reference_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub narration: Option<String>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
