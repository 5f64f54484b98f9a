//! The append-only stock movement ledger and its replay queries.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::report::StockLedgerRow;
use crate::stock_movements::{self, ReferenceKind};
use crate::{EngineError, ResultEngine};

use super::{Engine, costing};

/// Post one movement row. The only write path into the stock ledger.
pub(super) async fn append_movement<C: ConnectionTrait>(
    db: &C,
    item_id: i32,
    quantity: i32,
    unit_price: Decimal,
    transaction_date: Date,
    reference: ReferenceKind,
    reference_id: Option<i32>,
    actor: i32,
) -> ResultEngine<stock_movements::Model> {
    let row = stock_movements::ActiveModel {
        item_id: ActiveValue::Set(item_id),
        quantity: ActiveValue::Set(quantity),
        unit_price: ActiveValue::Set(unit_price),
        transaction_date: ActiveValue::Set(transaction_date),
        reference_type: ActiveValue::Set(reference.as_str().to_string()),
        reference_id: ActiveValue::Set(reference_id),
        created_by: ActiveValue::Set(actor),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

/// Signed sum of every movement for an item, regardless of date.
pub(super) async fn on_hand_total<C: ConnectionTrait>(db: &C, item_id: i32) -> ResultEngine<i32> {
    let rows = stock_movements::Entity::find()
        .filter(stock_movements::Column::ItemId.eq(item_id))
        .all(db)
        .await?;
    Ok(rows.iter().map(|m| m.quantity).sum())
}

/// Signed sum of movements dated on or before `as_of`.
pub(super) async fn on_hand_as_of<C: ConnectionTrait>(
    db: &C,
    item_id: i32,
    as_of: Date,
) -> ResultEngine<i32> {
    let rows = stock_movements::Entity::find()
        .filter(stock_movements::Column::ItemId.eq(item_id))
        .filter(stock_movements::Column::TransactionDate.lte(as_of))
        .all(db)
        .await?;
    Ok(rows.iter().map(|m| m.quantity).sum())
}

impl Engine {
    /// Quantity of an item on hand at the end of `as_of`.
    pub async fn quantity_on_hand(&self, item_id: i32, as_of: Date) -> ResultEngine<i32> {
        costing::require_item(&self.database, item_id).await?;
        on_hand_as_of(&self.database, item_id, as_of).await
    }

    /// Replay an item's stock ledger over a date range: an opening row, every
    /// movement in the range with its running quantity, and a closing row.
    ///
    /// Movements are replayed in `(transaction_date, movement_id)` order, so
    /// same-day entries keep their insertion order.
    pub async fn stock_ledger(
        &self,
        item_id: i32,
        from_date: Date,
        to_date: Date,
    ) -> ResultEngine<Vec<StockLedgerRow>> {
        if from_date > to_date {
            return Err(EngineError::Validation(format!(
                "from_date {from_date} is after to_date {to_date}"
            )));
        }
        costing::require_item(&self.database, item_id).await?;

        let opening: i32 = stock_movements::Entity::find()
            .filter(stock_movements::Column::ItemId.eq(item_id))
            .filter(stock_movements::Column::TransactionDate.lt(from_date))
            .all(&self.database)
            .await?
            .iter()
            .map(|m| m.quantity)
            .sum();

        let movements = stock_movements::Entity::find()
            .filter(stock_movements::Column::ItemId.eq(item_id))
            .filter(stock_movements::Column::TransactionDate.gte(from_date))
            .filter(stock_movements::Column::TransactionDate.lte(to_date))
            .order_by_asc(stock_movements::Column::TransactionDate)
            .order_by_asc(stock_movements::Column::MovementId)
            .all(&self.database)
            .await?;

        let mut rows = Vec::with_capacity(movements.len() + 2);
        rows.push(StockLedgerRow::Opening {
            date: from_date,
            quantity: opening,
        });

        let mut running = opening;
        for movement in movements {
            running += movement.quantity;
            rows.push(StockLedgerRow::Movement {
                date: movement.transaction_date,
                movement_id: movement.movement_id,
                reference: ReferenceKind::try_from(movement.reference_type.as_str())?,
                quantity: movement.quantity,
                unit_price: movement.unit_price,
                running,
            });
        }

        rows.push(StockLedgerRow::Closing {
            date: to_date,
            quantity: running,
        });
        Ok(rows)
    }
}
