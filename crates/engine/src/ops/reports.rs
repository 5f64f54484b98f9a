//! Report reconstruction: cash book, party statements and the loan report.
//!
//! Nothing here is denormalized. Every figure is folded from the ledgers at
//! query time, so a report can always be re-derived after the fact.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::cash_transactions::{self, CashTransactionKind};
use crate::commands::Party;
use crate::party_transactions::{self, PartyReference};
use crate::report::{CashReport, LoanReport, PartyReport, ReportRow};
use crate::{
    EngineError, ResultEngine, account_heads, customers, expenses, loans, vendors,
};

use super::{Engine, finance};

fn check_range(from_date: Date, to_date: Date) -> ResultEngine<()> {
    if from_date > to_date {
        return Err(EngineError::Validation(format!(
            "from_date {from_date} is after to_date {to_date}"
        )));
    }
    Ok(())
}

async fn customer_names<C: sea_orm::ConnectionTrait>(
    db: &C,
    ids: Vec<i32>,
) -> ResultEngine<HashMap<i32, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = customers::Entity::find()
        .filter(customers::Column::CustomerId.is_in(ids))
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|c| (c.customer_id, c.customer_name))
        .collect())
}

async fn vendor_names<C: sea_orm::ConnectionTrait>(
    db: &C,
    ids: Vec<i32>,
) -> ResultEngine<HashMap<i32, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = vendors::Entity::find()
        .filter(vendors::Column::VendorId.is_in(ids))
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|v| (v.vendor_id, v.vendor_name))
        .collect())
}

async fn head_names<C: sea_orm::ConnectionTrait>(
    db: &C,
    ids: Vec<i32>,
) -> ResultEngine<HashMap<i32, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = account_heads::Entity::find()
        .filter(account_heads::Column::AccountHeadId.is_in(ids))
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|h| (h.account_head_id, h.head_name))
        .collect())
}

fn cash_particular(
    row: &cash_transactions::Model,
    kind: CashTransactionKind,
    customer_names: &HashMap<i32, String>,
    vendor_names: &HashMap<i32, String>,
    head_names: &HashMap<i32, String>,
) -> String {
    let party_name = row
        .customer_id
        .and_then(|id| customer_names.get(&id))
        .or_else(|| row.vendor_id.and_then(|id| vendor_names.get(&id)));
    match kind {
        CashTransactionKind::Received => match party_name {
            Some(name) => format!("Received From {name}"),
            None => row.narration.clone().unwrap_or_else(|| "Received".to_string()),
        },
        CashTransactionKind::Payment => {
            if let Some(name) = party_name {
                format!("Payment To {name}")
            } else if let Some(head) = row.account_head_id.and_then(|id| head_names.get(&id)) {
                format!("Payment: {head}")
            } else {
                row.narration.clone().unwrap_or_else(|| "Payment".to_string())
            }
        }
        CashTransactionKind::Contra => "Contra".to_string(),
    }
}

impl Engine {
    /// Cash book over a date range. Receipts and payments inside the range,
    /// bracketed by the drawer balance entering and leaving it. Contra rows
    /// appear on the side money moved, shown positive.
    pub async fn cash_report(&self, from_date: Date, to_date: Date) -> ResultEngine<CashReport> {
        check_range(from_date, to_date)?;
        let db = &self.database;

        let opening_balance = finance::cash_balance_fold(db, from_date, false).await?;
        let closing_balance = finance::cash_balance_fold(db, to_date, true).await?;

        let rows = cash_transactions::Entity::find()
            .filter(cash_transactions::Column::IsCash.eq(true))
            .filter(cash_transactions::Column::TransactionDate.gte(from_date))
            .filter(cash_transactions::Column::TransactionDate.lte(to_date))
            .order_by_asc(cash_transactions::Column::TransactionDate)
            .order_by_asc(cash_transactions::Column::TransactionId)
            .all(db)
            .await?;

        let customer_ids: Vec<i32> = rows.iter().filter_map(|r| r.customer_id).collect();
        let vendor_ids: Vec<i32> = rows.iter().filter_map(|r| r.vendor_id).collect();
        let head_ids: Vec<i32> = rows.iter().filter_map(|r| r.account_head_id).collect();
        let customer_names = customer_names(db, customer_ids).await?;
        let vendor_names = vendor_names(db, vendor_ids).await?;
        let head_names = head_names(db, head_ids).await?;

        let mut receipts = Vec::new();
        let mut payments = Vec::new();
        for row in &rows {
            let kind = CashTransactionKind::try_from(row.transaction_type.as_str())?;
            let particular =
                cash_particular(row, kind, &customer_names, &vendor_names, &head_names);
            let report_row = |amount: Decimal| ReportRow {
                date: row.transaction_date,
                particular: particular.clone(),
                amount,
            };
            match kind {
                CashTransactionKind::Received => receipts.push(report_row(row.amount)),
                CashTransactionKind::Payment => payments.push(report_row(row.amount)),
                CashTransactionKind::Contra => {
                    if row.amount >= Decimal::ZERO {
                        receipts.push(report_row(row.amount));
                    } else {
                        payments.push(report_row(-row.amount));
                    }
                }
            }
        }

        Ok(CashReport {
            from_date,
            to_date,
            opening_balance,
            receipts,
            payments,
            closing_balance,
        })
    }

    /// Statement for one customer or vendor: what they owed entering the
    /// range, every subledger row inside it, and the balance leaving it.
    pub async fn party_report(
        &self,
        party: Party,
        from_date: Date,
        to_date: Date,
    ) -> ResultEngine<PartyReport> {
        check_range(from_date, to_date)?;
        let db = &self.database;
        match party {
            Party::Customer(id) => {
                finance::require_customer(db, id).await?;
            }
            Party::Vendor(id) => {
                finance::require_vendor(db, id).await?;
            }
        }

        let opening_balance = finance::party_balance_fold(db, party, from_date, false).await?;

        let mut query = party_transactions::Entity::find();
        query = match party {
            Party::Customer(id) => query.filter(party_transactions::Column::CustomerId.eq(id)),
            Party::Vendor(id) => query.filter(party_transactions::Column::VendorId.eq(id)),
        };
        let entries = query
            .filter(party_transactions::Column::TransactionDate.gte(from_date))
            .filter(party_transactions::Column::TransactionDate.lte(to_date))
            .order_by_asc(party_transactions::Column::TransactionDate)
            .order_by_asc(party_transactions::Column::EntryId)
            .all(db)
            .await?;

        let mut rows = Vec::with_capacity(entries.len());
        let mut in_range = Decimal::ZERO;
        for entry in entries {
            let particular = match PartyReference::try_from(entry.reference_type.as_str())? {
                PartyReference::Sales => entry
                    .narration
                    .clone()
                    .unwrap_or_else(|| "Sales".to_string()),
                PartyReference::Payment => "Payment".to_string(),
            };
            in_range += entry.amount;
            rows.push(ReportRow {
                date: entry.transaction_date,
                particular,
                amount: entry.amount,
            });
        }

        Ok(PartyReport {
            from_date,
            to_date,
            opening_balance,
            rows,
            closing_balance: opening_balance + in_range,
        })
    }

    /// Loan report: one disbursement row per loan plus every repayment
    /// expense recorded under an account head carrying the loan's unique
    /// name, in date order. `outstanding` is disbursed minus repaid.
    pub async fn loan_report(&self) -> ResultEngine<LoanReport> {
        let db = &self.database;
        let loan_rows = loans::Entity::find()
            .order_by_asc(loans::Column::LoanDate)
            .order_by_asc(loans::Column::LoanId)
            .all(db)
            .await?;

        let heads = account_heads::Entity::find().all(db).await?;
        let head_by_name: HashMap<&str, i32> = heads
            .iter()
            .map(|h| (h.head_name.as_str(), h.account_head_id))
            .collect();

        let mut head_to_loan: HashMap<i32, String> = HashMap::new();
        let mut rows = Vec::new();
        for loan in &loan_rows {
            rows.push(ReportRow {
                date: loan.loan_date,
                particular: format!("Loan from {} ({})", loan.lender_name, loan.unique_name),
                amount: loan.amount,
            });
            if let Some(head_id) = head_by_name.get(loan.unique_name.as_str()) {
                head_to_loan.insert(*head_id, loan.unique_name.clone());
            }
        }

        if !head_to_loan.is_empty() {
            let repayments = expenses::Entity::find()
                .filter(
                    expenses::Column::AccountHeadId
                        .is_in(head_to_loan.keys().copied().collect::<Vec<_>>()),
                )
                .order_by_asc(expenses::Column::ExpenseDate)
                .order_by_asc(expenses::Column::ExpenseId)
                .all(db)
                .await?;
            for repayment in repayments {
                let unique_name = head_to_loan
                    .get(&repayment.account_head_id)
                    .cloned()
                    .unwrap_or_default();
                rows.push(ReportRow {
                    date: repayment.expense_date,
                    particular: format!("Repayment: {unique_name}"),
                    amount: -repayment.amount,
                });
            }
        }

        rows.sort_by(|a, b| a.date.cmp(&b.date));
        let outstanding = rows.iter().map(|r| r.amount).sum();
        Ok(LoanReport { rows, outstanding })
    }
}
