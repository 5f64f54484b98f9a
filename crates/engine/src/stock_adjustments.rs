//! Stock adjustment records.
//!
//! An adjustment converts stock of one item into another outside the normal
//! sorting flow, with each leg valued at its own item's weighted-average
//! cost.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_adjustment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub adjustment_id: i32,
    pub previous_item_id: i32,
    pub new_item_id: i32,
    pub quantity: i32,
    pub adjustment_date: Date,
    pub narration: Option<String>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::PreviousItemId",
        to = "super::items::Column::ItemId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    PreviousItems,
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::NewItemId",
        to = "super::items::Column::ItemId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    NewItems,
}

impl ActiveModelBehavior for ActiveModel {}
