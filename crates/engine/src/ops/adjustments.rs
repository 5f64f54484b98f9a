//! Stock adjustments: converting quantity of one item into another.
//!
//! Unlike sorting, each leg is valued at its own item's weighted-average
//! cost: the outbound leg leaves at the previous item's cost and the inbound
//! leg arrives at the new item's, so a conversion between items of unequal
//! value shows up as a valuation difference rather than repricing either
//! average.

use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::commands::NewStockAdjustment;
use crate::stock_movements::ReferenceKind;
use crate::{EngineError, ResultEngine, stock_adjustments};

use super::{Engine, costing, normalize_optional_text, stock, with_tx};

impl Engine {
    /// Convert stock of one item into another. Both items must already have
    /// a cost basis.
    pub async fn create_stock_adjustment(
        &self,
        cmd: NewStockAdjustment,
    ) -> ResultEngine<stock_adjustments::Model> {
        let NewStockAdjustment {
            previous_item_id,
            new_item_id,
            quantity,
            adjustment_date,
            narration,
            created_by,
        } = cmd;
        if previous_item_id == new_item_id {
            return Err(EngineError::Validation(format!(
                "cannot adjust item {previous_item_id} into itself"
            )));
        }
        if quantity <= 0 {
            return Err(EngineError::InvalidQuantity(format!(
                "adjustment quantity must be positive, got {quantity}"
            )));
        }

        with_tx!(self, |db_tx| {
            let previous = costing::require_item(&db_tx, previous_item_id).await?;
            let new = costing::require_item(&db_tx, new_item_id).await?;
            let previous_cost = costing::require_cost_basis(&previous)?;
            let new_cost = costing::require_cost_basis(&new)?;

            let on_hand = stock::on_hand_total(&db_tx, previous_item_id).await?;
            if on_hand < quantity {
                return Err(EngineError::InvalidQuantity(format!(
                    "item {previous_item_id} has {on_hand} on hand, cannot adjust {quantity}"
                )));
            }

            let row = stock_adjustments::ActiveModel {
                previous_item_id: ActiveValue::Set(previous_item_id),
                new_item_id: ActiveValue::Set(new_item_id),
                quantity: ActiveValue::Set(quantity),
                adjustment_date: ActiveValue::Set(adjustment_date),
                narration: ActiveValue::Set(normalize_optional_text(narration)),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let row = row.insert(&db_tx).await?;

            stock::append_movement(
                &db_tx,
                previous_item_id,
                -quantity,
                previous_cost,
                adjustment_date,
                ReferenceKind::Adjustment,
                Some(row.adjustment_id),
                created_by,
            )
            .await?;
            stock::append_movement(
                &db_tx,
                new_item_id,
                quantity,
                new_cost,
                adjustment_date,
                ReferenceKind::Adjustment,
                Some(row.adjustment_id),
                created_by,
            )
            .await?;

            tracing::info!(
                adjustment_id = row.adjustment_id,
                previous_item_id,
                new_item_id,
                quantity,
                "stock adjustment recorded"
            );
            Ok(row)
        })
    }
}
