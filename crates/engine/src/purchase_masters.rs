//! Purchase document headers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_master")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub purchase_id: i32,
    pub vendor_id: i32,
    pub purchase_date: Date,
    pub total_amount: Decimal,
    /// Set once every line of this purchase has been sorted.
    pub is_sorted: bool,
    pub narration: Option<String>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorId",
        to = "super::vendors::Column::VendorId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Vendors,
    #[sea_orm(has_many = "super::purchase_details::Entity")]
    PurchaseDetails,
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl Related<super::purchase_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
