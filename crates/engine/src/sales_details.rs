//! Sales invoice lines.
//!
//! `quantity` is the quantity still standing after returns; a sales return
//! reduces it. `cost_price` is the weighted-average cost snapshot taken when
//! the line was sold, used to value the return leg.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub detail_id: i32,
    pub sale_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub line_total: Decimal,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_masters::Entity",
        from = "Column::SaleId",
        to = "super::sales_masters::Column::SaleId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SalesMasters,
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::ItemId",
        to = "super::items::Column::ItemId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Items,
}

impl Related<super::sales_masters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesMasters.def()
    }
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
