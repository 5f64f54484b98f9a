//! Wastage records.
//!
//! Stock written off as spoiled or damaged. `net_loss` values the write-off
//! at the item's sell price, the figure the business tracks as lost revenue.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wastage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub wastage_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub net_loss: Decimal,
    pub wastage_date: Date,
    pub narration: Option<String>,
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
