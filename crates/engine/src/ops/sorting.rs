//! Sorting: reclassifying purchased bulk stock into graded items.
//!
//! Every line consumes `source_quantity` of the purchased batch and produces
//! `target_quantity` of the graded item; the shortfall is trim loss. The
//! outbound leg is tagged against the purchase it consumes, the inbound leg
//! against the sorting row. Both legs are valued at the source item's
//! weighted-average cost at the time of sorting, and the target item absorbs
//! that cost into its own average.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::commands::NewSorting;
use crate::stock_movements::ReferenceKind;
use crate::{EngineError, ResultEngine, purchase_details, purchase_masters, sortings};

use super::{Engine, costing, stock, with_tx};

impl Engine {
    /// Sort a purchase into graded items. Every line consumes source
    /// quantity from an item named on the purchase and produces target
    /// quantity of a graded item, then the purchase is marked sorted.
    pub async fn create_sorting(&self, cmd: NewSorting) -> ResultEngine<Vec<sortings::Model>> {
        let NewSorting {
            purchase_id,
            sorting_date,
            lines,
            created_by,
        } = cmd;

        if lines.is_empty() {
            return Err(EngineError::Validation(
                "a sorting needs at least one line".to_string(),
            ));
        }
        for line in &lines {
            if line.source_quantity <= 0 || line.target_quantity <= 0 {
                return Err(EngineError::InvalidQuantity(format!(
                    "sorting quantities must be positive, got {} consumed and {} produced for item {}",
                    line.source_quantity, line.target_quantity, line.source_item_id
                )));
            }
            if line.target_quantity > line.source_quantity {
                return Err(EngineError::InvalidQuantity(format!(
                    "cannot produce {} from {} consumed for item {}",
                    line.target_quantity, line.source_quantity, line.source_item_id
                )));
            }
            if line.source_item_id == line.target_item_id {
                return Err(EngineError::Validation(format!(
                    "cannot sort item {} into itself",
                    line.source_item_id
                )));
            }
        }

        with_tx!(self, |db_tx| {
            let master = purchase_masters::Entity::find_by_id(purchase_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("purchase {purchase_id}")))?;
            if master.is_sorted {
                return Err(EngineError::Validation(format!(
                    "purchase {purchase_id} is already sorted"
                )));
            }

            let purchased_items: HashSet<i32> = purchase_details::Entity::find()
                .filter(purchase_details::Column::PurchaseId.eq(purchase_id))
                .all(&db_tx)
                .await?
                .iter()
                .map(|d| d.item_id)
                .collect();

            // Track what each source item still has, so a batch of lines
            // cannot collectively overdraw it.
            let mut remaining: HashMap<i32, i32> = HashMap::new();
            for line in &lines {
                if !purchased_items.contains(&line.source_item_id) {
                    return Err(EngineError::Validation(format!(
                        "item {} is not on purchase {purchase_id}",
                        line.source_item_id
                    )));
                }
                let on_hand = match remaining.get(&line.source_item_id) {
                    Some(q) => *q,
                    None => stock::on_hand_total(&db_tx, line.source_item_id).await?,
                };
                if on_hand < line.source_quantity {
                    return Err(EngineError::InvalidQuantity(format!(
                        "item {} has {on_hand} on hand, cannot sort {}",
                        line.source_item_id, line.source_quantity
                    )));
                }
                remaining.insert(line.source_item_id, on_hand - line.source_quantity);
            }

            let mut created = Vec::with_capacity(lines.len());
            for line in &lines {
                let source = costing::require_item(&db_tx, line.source_item_id).await?;
                let target = costing::require_item(&db_tx, line.target_item_id).await?;
                let unit_price = costing::require_cost_basis(&source)?;

                let row = sortings::ActiveModel {
                    purchase_id: ActiveValue::Set(purchase_id),
                    source_item_id: ActiveValue::Set(line.source_item_id),
                    target_item_id: ActiveValue::Set(line.target_item_id),
                    source_quantity: ActiveValue::Set(line.source_quantity),
                    target_quantity: ActiveValue::Set(line.target_quantity),
                    unit_price: ActiveValue::Set(unit_price),
                    sorting_date: ActiveValue::Set(sorting_date),
                    created_by: ActiveValue::Set(created_by),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                };
                let row = row.insert(&db_tx).await?;

                // The outbound leg consumes the purchased batch, so it is
                // tagged against the purchase, not the sorting row.
                stock::append_movement(
                    &db_tx,
                    line.source_item_id,
                    -line.source_quantity,
                    unit_price,
                    sorting_date,
                    ReferenceKind::Purchase,
                    Some(purchase_id),
                    created_by,
                )
                .await?;

                costing::absorb_inbound(
                    &db_tx,
                    &target,
                    line.target_quantity,
                    unit_price,
                    created_by,
                )
                .await?;
                stock::append_movement(
                    &db_tx,
                    line.target_item_id,
                    line.target_quantity,
                    unit_price,
                    sorting_date,
                    ReferenceKind::Sorting,
                    Some(row.sorting_id),
                    created_by,
                )
                .await?;

                created.push(row);
            }

            let mark = purchase_masters::ActiveModel {
                purchase_id: ActiveValue::Set(purchase_id),
                is_sorted: ActiveValue::Set(true),
                ..Default::default()
            };
            mark.update(&db_tx).await?;

            tracing::info!(purchase_id, lines = created.len(), "purchase sorted");
            Ok(created)
        })
    }

    /// Undo one sorting line. The ledger stays append-only: offsetting
    /// movements put the quantity back on the source item and take it off
    /// the target, then the sorting row is removed and the purchase reopens
    /// for sorting.
    pub async fn delete_sorting(&self, sorting_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let row = sortings::Entity::find_by_id(sorting_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("sorting {sorting_id}")))?;

            stock::append_movement(
                &db_tx,
                row.target_item_id,
                -row.target_quantity,
                row.unit_price,
                row.sorting_date,
                ReferenceKind::Sorting,
                Some(sorting_id),
                row.created_by,
            )
            .await?;
            stock::append_movement(
                &db_tx,
                row.source_item_id,
                row.source_quantity,
                row.unit_price,
                row.sorting_date,
                ReferenceKind::Purchase,
                Some(row.purchase_id),
                row.created_by,
            )
            .await?;

            let reopen = purchase_masters::ActiveModel {
                purchase_id: ActiveValue::Set(row.purchase_id),
                is_sorted: ActiveValue::Set(false),
                ..Default::default()
            };
            reopen.update(&db_tx).await?;

            sortings::Entity::delete_by_id(sorting_id).exec(&db_tx).await?;
            tracing::info!(sorting_id, purchase_id = row.purchase_id, "sorting undone");
            Ok(())
        })
    }
}
