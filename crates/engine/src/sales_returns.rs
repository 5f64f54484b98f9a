//! Sales return records.
//!
//! A return points at the invoice line it reverses. The returned quantity is
//! also subtracted from the line itself, so the line always reflects what the
//! customer kept.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_return")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub return_id: i32,
    pub sale_id: i32,
    pub detail_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub return_amount: Decimal,
    pub return_date: Date,
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
        on_delete = "NoAction"
    )]
    SalesMasters,
    #[sea_orm(
        belongs_to = "super::sales_details::Entity",
        from = "Column::DetailId",
        to = "super::sales_details::Column::DetailId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    SalesDetails,
}

impl Related<super::sales_masters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesMasters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
