//! Weighted-average cost maintenance for the item cost ledger.
//!
//! Every inbound movement priced differently from the running average shifts
//! it: the new average is the total value on hand (old average times old
//! quantity, plus the inbound value) divided by the new quantity. An item
//! with no stock or no average yet simply takes the inbound price.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ConnectionTrait, prelude::*};

use crate::{EngineError, ResultEngine, items};

use super::{Engine, stock};

/// Load an item or fail with `NotFound`.
pub(super) async fn require_item<C: ConnectionTrait>(
    db: &C,
    item_id: i32,
) -> ResultEngine<items::Model> {
    items::Entity::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("item {item_id}")))
}

/// An item's running average, or `MissingCostBasis` if it has never had one.
pub(super) fn require_cost_basis(item: &items::Model) -> ResultEngine<Decimal> {
    item.avg_price.ok_or_else(|| {
        EngineError::MissingCostBasis(format!(
            "item {} ({}) has no average cost",
            item.item_id, item.item_name
        ))
    })
}

/// Fold an inbound lot into the item's weighted-average cost and persist the
/// new average. Returns the average the item carries after absorption.
///
/// Must be called before the inbound movement itself is posted: the on-hand
/// quantity read here is the pre-arrival quantity.
pub(super) async fn absorb_inbound<C: ConnectionTrait>(
    db: &C,
    item: &items::Model,
    quantity: i32,
    unit_price: Decimal,
    actor: i32,
) -> ResultEngine<Decimal> {
    let on_hand = stock::on_hand_total(db, item.item_id).await?;

    let new_avg = match item.avg_price {
        Some(avg) if on_hand > 0 => {
            (avg * Decimal::from(on_hand) + unit_price * Decimal::from(quantity))
                / Decimal::from(on_hand + quantity)
        }
        // No stock or no cost history: the lot sets the average outright.
        _ => unit_price,
    };

    let active = items::ActiveModel {
        item_id: ActiveValue::Set(item.item_id),
        avg_price: ActiveValue::Set(Some(new_avg)),
        updated_by: ActiveValue::Set(Some(actor)),
        updated_at: ActiveValue::Set(Some(Utc::now())),
        ..Default::default()
    };
    active.update(db).await?;

    Ok(new_avg)
}

impl Engine {
    /// Current weighted-average cost of an item, if it has one.
    pub async fn average_cost(&self, item_id: i32) -> ResultEngine<Option<Decimal>> {
        let item = require_item(&self.database, item_id).await?;
        Ok(item.avg_price)
    }
}
