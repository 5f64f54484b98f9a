//! Purchase recording: document rows, inbound stock and cost absorption.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::commands::NewPurchase;
use crate::stock_movements::ReferenceKind;
use crate::{EngineError, ResultEngine, purchase_details, purchase_masters};

use super::{Engine, costing, finance, normalize_optional_text, stock, with_tx};

impl Engine {
    /// Record a purchase. Every line posts an inbound stock movement at its
    /// purchase price and folds that price into the item's weighted-average
    /// cost. No money moves here; vendor settlement is a separate cash
    /// ledger entry.
    pub async fn create_purchase(
        &self,
        cmd: NewPurchase,
    ) -> ResultEngine<purchase_masters::Model> {
        let NewPurchase {
            vendor_id,
            purchase_date,
            lines,
            narration,
            created_by,
        } = cmd;

        if lines.is_empty() {
            return Err(EngineError::Validation(
                "a purchase needs at least one line".to_string(),
            ));
        }
        let mut total_amount = Decimal::ZERO;
        for line in &lines {
            if line.quantity <= 0 {
                return Err(EngineError::InvalidQuantity(format!(
                    "purchase quantity must be positive, got {} for item {}",
                    line.quantity, line.item_id
                )));
            }
            if line.unit_price < Decimal::ZERO {
                return Err(EngineError::Validation(format!(
                    "unit price must not be negative, got {} for item {}",
                    line.unit_price, line.item_id
                )));
            }
            total_amount += line.unit_price * Decimal::from(line.quantity);
        }

        with_tx!(self, |db_tx| {
            finance::require_vendor(&db_tx, vendor_id).await?;

            let master = purchase_masters::ActiveModel {
                vendor_id: ActiveValue::Set(vendor_id),
                purchase_date: ActiveValue::Set(purchase_date),
                total_amount: ActiveValue::Set(total_amount),
                is_sorted: ActiveValue::Set(false),
                narration: ActiveValue::Set(normalize_optional_text(narration)),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let master = master.insert(&db_tx).await?;

            for line in &lines {
                let item = costing::require_item(&db_tx, line.item_id).await?;
                costing::absorb_inbound(&db_tx, &item, line.quantity, line.unit_price, created_by)
                    .await?;

                let detail = purchase_details::ActiveModel {
                    purchase_id: ActiveValue::Set(master.purchase_id),
                    item_id: ActiveValue::Set(line.item_id),
                    quantity: ActiveValue::Set(line.quantity),
                    unit_price: ActiveValue::Set(line.unit_price),
                    line_total: ActiveValue::Set(line.unit_price * Decimal::from(line.quantity)),
                    created_by: ActiveValue::Set(created_by),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                };
                detail.insert(&db_tx).await?;

                stock::append_movement(
                    &db_tx,
                    line.item_id,
                    line.quantity,
                    line.unit_price,
                    purchase_date,
                    ReferenceKind::Purchase,
                    Some(master.purchase_id),
                    created_by,
                )
                .await?;
            }

            tracing::info!(
                purchase_id = master.purchase_id,
                vendor_id,
                lines = lines.len(),
                %total_amount,
                "purchase recorded"
            );
            Ok(master)
        })
    }
}
