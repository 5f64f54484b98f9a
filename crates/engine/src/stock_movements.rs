//! The stock movement ledger.
//!
//! One row is a single signed-quantity journal entry tied to a business
//! event: positive quantities are inbound, negative are outbound.
//! `unit_price` is the cost snapshot taken when the movement was posted, not
//! the item's current price. Rows are never updated or deleted; corrections
//! are new offsetting movements.
//!
//! The signed sum of an item's movements dated `<= T` is the physical stock
//! on hand at `T`. The stock-ledger report replays this ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// The business document a movement traces back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Purchase,
    Sorting,
    Sales,
    SalesReturn,
    PurchaseReturn,
    Wastage,
    Adjustment,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Sorting => "sorting",
            Self::Sales => "sales",
            Self::SalesReturn => "sales return",
            Self::PurchaseReturn => "purchase return",
            Self::Wastage => "wastage",
            Self::Adjustment => "adjustment",
        }
    }
}

impl TryFrom<&str> for ReferenceKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "purchase" => Ok(Self::Purchase),
            "sorting" => Ok(Self::Sorting),
            "sales" => Ok(Self::Sales),
            "sales return" => Ok(Self::SalesReturn),
            "purchase return" => Ok(Self::PurchaseReturn),
            "wastage" => Ok(Self::Wastage),
            "adjustment" => Ok(Self::Adjustment),
            other => Err(EngineError::Validation(format!(
                "invalid reference kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub movement_id: i32,
    pub item_id: i32,
    /// Signed quantity: positive = inbound, negative = outbound.
    pub quantity: i32,
    /// Unit-cost snapshot at the time of the movement.
    pub unit_price: Decimal,
    pub transaction_date: Date,
    pub reference_type: String,
    /// Primary key of the originating master record, when one exists.
    pub reference_id: Option<i32>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::ItemId",
        to = "super::items::Column::ItemId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Items,
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
