//! Loans and expenses.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::cash_transactions::CashTransactionKind;
use crate::commands::{NewExpense, NewLoan};
use crate::{EngineError, ResultEngine, account_heads, expenses, loans};

use super::{Engine, finance, normalize_optional_text, with_tx};

impl Engine {
    /// Register a loan. The disbursement lands in the cash drawer as a
    /// receipt. `unique_name` must be unused; repayments recorded as
    /// expenses under an account head of that name roll up into the loan
    /// report.
    pub async fn create_loan(&self, cmd: NewLoan) -> ResultEngine<loans::Model> {
        let NewLoan {
            lender_name,
            unique_name,
            amount,
            loan_date,
            narration,
            created_by,
        } = cmd;
        if amount <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "loan amount must be positive, got {amount}"
            )));
        }
        let unique_name = unique_name.trim().to_string();
        if unique_name.is_empty() {
            return Err(EngineError::Validation(
                "loan unique name must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let clash = loans::Entity::find()
                .filter(loans::Column::UniqueName.eq(unique_name.clone()))
                .one(&db_tx)
                .await?;
            if clash.is_some() {
                return Err(EngineError::ExistingKey(unique_name));
            }

            let row = loans::ActiveModel {
                lender_name: ActiveValue::Set(lender_name.clone()),
                unique_name: ActiveValue::Set(unique_name.clone()),
                amount: ActiveValue::Set(amount),
                loan_date: ActiveValue::Set(loan_date),
                narration: ActiveValue::Set(normalize_optional_text(narration)),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let row = row.insert(&db_tx).await?;

            finance::post_cash_entry(
                &db_tx,
                CashTransactionKind::Received,
                amount,
                loan_date,
                true,
                None,
                None,
                None,
                None,
                Some(format!("loan received: {unique_name}")),
                created_by,
            )
            .await?;

            tracing::info!(loan_id = row.loan_id, %amount, lender = %lender_name, "loan recorded");
            Ok(row)
        })
    }

    /// Record an expense against an account head. This is a book entry
    /// only; the cash leaving the till is posted separately as a payment.
    pub async fn record_expense(&self, cmd: NewExpense) -> ResultEngine<expenses::Model> {
        let NewExpense {
            account_head_id,
            amount,
            expense_date,
            narration,
            created_by,
        } = cmd;
        if amount <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "expense amount must be positive, got {amount}"
            )));
        }

        with_tx!(self, |db_tx| {
            account_heads::Entity::find_by_id(account_head_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::NotFound(format!("account head {account_head_id}"))
                })?;

            let row = expenses::ActiveModel {
                account_head_id: ActiveValue::Set(account_head_id),
                amount: ActiveValue::Set(amount),
                expense_date: ActiveValue::Set(expense_date),
                narration: ActiveValue::Set(normalize_optional_text(narration)),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let row = row.insert(&db_tx).await?;
            tracing::info!(expense_id = row.expense_id, account_head_id, %amount, "expense recorded");
            Ok(row)
        })
    }
}
