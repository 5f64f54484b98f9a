//! Wastage: writing spoiled or damaged stock off the ledger.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::commands::NewWastage;
use crate::stock_movements::ReferenceKind;
use crate::{EngineError, ResultEngine, wastages};

use super::{Engine, costing, normalize_optional_text, stock, with_tx};

impl Engine {
    /// Write stock off as wastage. The outbound movement is valued at the
    /// item's weighted-average cost; `net_loss` records the foregone revenue
    /// at sell price. No money moves.
    pub async fn create_wastage(&self, cmd: NewWastage) -> ResultEngine<wastages::Model> {
        let NewWastage {
            item_id,
            quantity,
            wastage_date,
            narration,
            created_by,
        } = cmd;
        if quantity <= 0 {
            return Err(EngineError::InvalidQuantity(format!(
                "wastage quantity must be positive, got {quantity}"
            )));
        }

        with_tx!(self, |db_tx| {
            let item = costing::require_item(&db_tx, item_id).await?;
            let cost = costing::require_cost_basis(&item)?;

            let on_hand = stock::on_hand_total(&db_tx, item_id).await?;
            if on_hand < quantity {
                return Err(EngineError::InvalidQuantity(format!(
                    "item {item_id} has {on_hand} on hand, cannot waste {quantity}"
                )));
            }

            let net_loss = item.sell_price * Decimal::from(quantity);
            let row = wastages::ActiveModel {
                item_id: ActiveValue::Set(item_id),
                quantity: ActiveValue::Set(quantity),
                net_loss: ActiveValue::Set(net_loss),
                wastage_date: ActiveValue::Set(wastage_date),
                narration: ActiveValue::Set(normalize_optional_text(narration)),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let row = row.insert(&db_tx).await?;

            stock::append_movement(
                &db_tx,
                item_id,
                -quantity,
                cost,
                wastage_date,
                ReferenceKind::Wastage,
                Some(row.wastage_id),
                created_by,
            )
            .await?;

            tracing::info!(
                wastage_id = row.wastage_id,
                item_id,
                quantity,
                %net_loss,
                "wastage recorded"
            );
            Ok(row)
        })
    }
}
