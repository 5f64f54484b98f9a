//! Customer master records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub customer_id: i32,
    pub customer_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_masters::Entity")]
    SalesMasters,
    #[sea_orm(has_many = "super::party_transactions::Entity")]
    PartyTransactions,
}

impl Related<super::sales_masters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesMasters.def()
    }
}

impl Related<super::party_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
