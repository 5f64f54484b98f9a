//! Stock items and their moving weighted-average cost.
//!
//! `avg_price` is the perpetual weighted-average unit cost. It starts as
//! `None` and is recomputed by inbound (+) stock movements only; outbound
//! movements snapshot the current value onto the movement row and never
//! touch it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub item_id: i32,
    pub item_name: String,
    /// Weighted-average unit cost; `None` until the first inbound movement.
    pub avg_price: Option<Decimal>,
    pub sell_price: Decimal,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_movements::Entity")]
    StockMovements,
}

impl Related<super::stock_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
