//! Read-model types returned by the reporting operations.
//!
//! Reports are reconstructed from the ledgers at query time; nothing here is
//! stored.

use rust_decimal::Decimal;
use sea_orm::prelude::Date;
use serde::Serialize;

use crate::stock_movements::ReferenceKind;

/// One dated line of a money report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: Date,
    pub particular: String,
    pub amount: Decimal,
}

/// Cash book for a date range: receipts on one side, payments on the other,
/// bracketed by opening and closing balances.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CashReport {
    pub from_date: Date,
    pub to_date: Date,
    pub opening_balance: Decimal,
    pub receipts: Vec<ReportRow>,
    pub payments: Vec<ReportRow>,
    pub closing_balance: Decimal,
}

/// Statement for one customer or vendor over a date range. Positive amounts
/// increase what the party owes, negative amounts settle it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PartyReport {
    pub from_date: Date,
    pub to_date: Date,
    pub opening_balance: Decimal,
    pub rows: Vec<ReportRow>,
    pub closing_balance: Decimal,
}

/// One row of an item's stock ledger.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockLedgerRow {
    /// Quantity on hand entering the range.
    Opening { date: Date, quantity: i32 },
    /// One ledger movement inside the range, with the running quantity
    /// after it.
    Movement {
        date: Date,
        movement_id: i32,
        reference: ReferenceKind,
        quantity: i32,
        unit_price: Decimal,
        running: i32,
    },
    /// Quantity on hand leaving the range.
    Closing { date: Date, quantity: i32 },
}

/// Disbursements and repayments for the business's loans, in date order.
/// Positive amounts are money received, negative amounts repaid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoanReport {
    pub rows: Vec<ReportRow>,
    pub outstanding: Decimal,
}
