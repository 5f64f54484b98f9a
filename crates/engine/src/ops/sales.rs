//! Sales, sales returns and invoice line voiding.
//!
//! A sale posts three things atomically: the invoice rows, an outbound stock
//! movement per line valued at the item's current weighted-average cost, and
//! the receivable against the customer. Cash and bank sales settle the
//! receivable immediately with a receipt in the same transaction.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::cash_transactions::CashTransactionKind;
use crate::commands::{NewSale, NewSalesReturn};
use crate::party_transactions::PartyReference;
use crate::sales_masters::PaymentKind;
use crate::stock_movements::ReferenceKind;
use crate::{EngineError, ResultEngine, sales_details, sales_masters, sales_returns};

use super::{Engine, costing, finance, normalize_optional_text, stock, with_tx};

impl Engine {
    /// Record a sale. Fails without writing anything if any line's item has
    /// no cost basis or not enough stock on hand.
    pub async fn create_sale(&self, cmd: NewSale) -> ResultEngine<sales_masters::Model> {
        let NewSale {
            customer_id,
            sale_date,
            payment_type,
            bank_account_id,
            lines,
            narration,
            created_by,
        } = cmd;

        if lines.is_empty() {
            return Err(EngineError::Validation(
                "a sale needs at least one line".to_string(),
            ));
        }
        if payment_type == PaymentKind::Bank && bank_account_id.is_none() {
            return Err(EngineError::Validation(
                "bank sales require a bank account".to_string(),
            ));
        }
        let mut total_amount = Decimal::ZERO;
        for line in &lines {
            if line.quantity <= 0 {
                return Err(EngineError::InvalidQuantity(format!(
                    "sale quantity must be positive, got {} for item {}",
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
            finance::require_customer(&db_tx, customer_id).await?;

            // Cost and availability for every line before any write, so a
            // failing line aborts the whole sale.
            let mut cost_prices = Vec::with_capacity(lines.len());
            let mut remaining: HashMap<i32, i32> = HashMap::new();
            for line in &lines {
                let item = costing::require_item(&db_tx, line.item_id).await?;
                let cost = costing::require_cost_basis(&item)?;

                let on_hand = match remaining.get(&line.item_id) {
                    Some(q) => *q,
                    None => stock::on_hand_total(&db_tx, line.item_id).await?,
                };
                if on_hand < line.quantity {
                    return Err(EngineError::InvalidQuantity(format!(
                        "item {} has {on_hand} on hand, cannot sell {}",
                        line.item_id, line.quantity
                    )));
                }
                remaining.insert(line.item_id, on_hand - line.quantity);
                cost_prices.push(cost);
            }

            let master = sales_masters::ActiveModel {
                customer_id: ActiveValue::Set(customer_id),
                sale_date: ActiveValue::Set(sale_date),
                total_amount: ActiveValue::Set(total_amount),
                payment_type: ActiveValue::Set(payment_type.as_str().to_string()),
                bank_account_id: ActiveValue::Set(bank_account_id),
                narration: ActiveValue::Set(normalize_optional_text(narration)),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let master = master.insert(&db_tx).await?;

            for (line, cost_price) in lines.iter().zip(&cost_prices) {
                let detail = sales_details::ActiveModel {
                    sale_id: ActiveValue::Set(master.sale_id),
                    item_id: ActiveValue::Set(line.item_id),
                    quantity: ActiveValue::Set(line.quantity),
                    unit_price: ActiveValue::Set(line.unit_price),
                    cost_price: ActiveValue::Set(*cost_price),
                    line_total: ActiveValue::Set(line.unit_price * Decimal::from(line.quantity)),
                    created_by: ActiveValue::Set(created_by),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                };
                detail.insert(&db_tx).await?;

                stock::append_movement(
                    &db_tx,
                    line.item_id,
                    -line.quantity,
                    *cost_price,
                    sale_date,
                    ReferenceKind::Sales,
                    Some(master.sale_id),
                    created_by,
                )
                .await?;
            }

            finance::append_party_movement(
                &db_tx,
                sale_date,
                total_amount,
                PartyReference::Sales,
                Some(master.sale_id),
                Some(customer_id),
                None,
                None,
                created_by,
            )
            .await?;

            // Cash and bank sales settle on the spot: the receipt cancels
            // the receivable just posted.
            if payment_type != PaymentKind::Credit {
                finance::post_cash_entry(
                    &db_tx,
                    CashTransactionKind::Received,
                    total_amount,
                    sale_date,
                    payment_type == PaymentKind::Cash,
                    bank_account_id,
                    Some(customer_id),
                    None,
                    None,
                    Some(format!("sale {}", master.sale_id)),
                    created_by,
                )
                .await?;
            }

            tracing::info!(
                sale_id = master.sale_id,
                customer_id,
                lines = lines.len(),
                %total_amount,
                payment = payment_type.as_str(),
                "sale recorded"
            );
            Ok(master)
        })
    }

    /// Return part of an invoice line: the line shrinks, stock comes back at
    /// the item's current weighted-average cost, and the customer's
    /// receivable drops by the returned value. Returning more than the line
    /// still carries is an error.
    pub async fn create_sales_return(
        &self,
        cmd: NewSalesReturn,
    ) -> ResultEngine<sales_returns::Model> {
        let NewSalesReturn {
            detail_id,
            quantity,
            created_by,
        } = cmd;
        if quantity <= 0 {
            return Err(EngineError::InvalidQuantity(format!(
                "return quantity must be positive, got {quantity}"
            )));
        }

        with_tx!(self, |db_tx| {
            let detail = sales_details::Entity::find_by_id(detail_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("sales detail {detail_id}")))?;
            let master = sales_masters::Entity::find_by_id(detail.sale_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("sale {}", detail.sale_id)))?;

            if quantity > detail.quantity {
                return Err(EngineError::InvalidQuantity(format!(
                    "cannot return {quantity} of {} sold",
                    detail.quantity
                )));
            }

            let item = costing::require_item(&db_tx, detail.item_id).await?;
            let current_cost = costing::require_cost_basis(&item)?;
            let return_amount = detail.unit_price * Decimal::from(quantity);

            let shrink = sales_details::ActiveModel {
                detail_id: ActiveValue::Set(detail_id),
                quantity: ActiveValue::Set(detail.quantity - quantity),
                line_total: ActiveValue::Set(detail.line_total - return_amount),
                ..Default::default()
            };
            shrink.update(&db_tx).await?;

            let adjust_master = sales_masters::ActiveModel {
                sale_id: ActiveValue::Set(master.sale_id),
                total_amount: ActiveValue::Set(master.total_amount - return_amount),
                ..Default::default()
            };
            adjust_master.update(&db_tx).await?;

            let row = sales_returns::ActiveModel {
                sale_id: ActiveValue::Set(detail.sale_id),
                detail_id: ActiveValue::Set(detail_id),
                item_id: ActiveValue::Set(detail.item_id),
                quantity: ActiveValue::Set(quantity),
                unit_price: ActiveValue::Set(detail.unit_price),
                return_amount: ActiveValue::Set(return_amount),
                return_date: ActiveValue::Set(master.sale_date),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let row = row.insert(&db_tx).await?;

            // Ledger entries carry the invoice date so the return lands in
            // the same reporting period as the sale it unwinds.
            stock::append_movement(
                &db_tx,
                detail.item_id,
                quantity,
                current_cost,
                master.sale_date,
                ReferenceKind::SalesReturn,
                Some(row.return_id),
                created_by,
            )
            .await?;

            finance::append_party_movement(
                &db_tx,
                master.sale_date,
                -return_amount,
                PartyReference::Sales,
                Some(master.sale_id),
                Some(master.customer_id),
                None,
                Some(format!("return against sale {}", master.sale_id)),
                created_by,
            )
            .await?;

            tracing::info!(
                return_id = row.return_id,
                sale_id = master.sale_id,
                quantity,
                %return_amount,
                "sales return recorded"
            );
            Ok(row)
        })
    }

    /// Void what remains of an invoice line. Offsetting entries bring the
    /// stock back and cancel the receivable; the line itself is zeroed, not
    /// deleted, so the invoice keeps its shape.
    pub async fn delete_sale_line(&self, detail_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let detail = sales_details::Entity::find_by_id(detail_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("sales detail {detail_id}")))?;
            let master = sales_masters::Entity::find_by_id(detail.sale_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("sale {}", detail.sale_id)))?;

            if detail.quantity > 0 {
                stock::append_movement(
                    &db_tx,
                    detail.item_id,
                    detail.quantity,
                    detail.cost_price,
                    master.sale_date,
                    ReferenceKind::Sales,
                    Some(master.sale_id),
                    detail.created_by,
                )
                .await?;
            }
            if detail.line_total != Decimal::ZERO {
                finance::append_party_movement(
                    &db_tx,
                    master.sale_date,
                    -detail.line_total,
                    PartyReference::Sales,
                    Some(master.sale_id),
                    Some(master.customer_id),
                    None,
                    Some(format!("voided line {detail_id} of sale {}", master.sale_id)),
                    detail.created_by,
                )
                .await?;
            }

            let adjust_master = sales_masters::ActiveModel {
                sale_id: ActiveValue::Set(master.sale_id),
                total_amount: ActiveValue::Set(master.total_amount - detail.line_total),
                ..Default::default()
            };
            adjust_master.update(&db_tx).await?;

            let zero = sales_details::ActiveModel {
                detail_id: ActiveValue::Set(detail_id),
                quantity: ActiveValue::Set(0),
                line_total: ActiveValue::Set(Decimal::ZERO),
                ..Default::default()
            };
            zero.update(&db_tx).await?;

            tracing::info!(detail_id, sale_id = master.sale_id, "sale line voided");
            Ok(())
        })
    }
}
