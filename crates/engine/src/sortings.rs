//! Sorting records.
//!
//! A sorting reclassifies stock bought in bulk into a graded item. The source
//! batch is consumed by `source_quantity` while the target gains
//! `target_quantity`; any difference is trim loss. Both legs are valued at
//! the source item's weighted-average cost at the time of sorting, which
//! `unit_price` snapshots.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sorting")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sorting_id: i32,
    pub purchase_id: i32,
    pub source_item_id: i32,
    pub target_item_id: i32,
    pub source_quantity: i32,
    pub target_quantity: i32,
    pub unit_price: Decimal,
    pub sorting_date: Date,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_masters::Entity",
        from = "Column::PurchaseId",
        to = "super::purchase_masters::Column::PurchaseId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    PurchaseMasters,
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::SourceItemId",
        to = "super::items::Column::ItemId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    SourceItems,
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::TargetItemId",
        to = "super::items::Column::ItemId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    TargetItems,
}

impl Related<super::purchase_masters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseMasters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
