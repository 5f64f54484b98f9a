//! Inventory valuation and multi-ledger bookkeeping for a small trading
//! business.
//!
//! The engine keeps three ledgers consistent under one transaction
//! boundary: the item cost ledger (weighted-average cost per item), the
//! append-only stock movement ledger, and the financial ledger (cash/bank
//! entries plus the customer/vendor subledger). Business operations
//! (purchase, sorting, sale, return, wastage, adjustment, loan) post to all
//! affected ledgers atomically, and reports are reconstructed from the
//! ledgers at query time.

pub use commands::{
    NewCashTransaction, NewContra, NewExpense, NewLoan, NewOpeningBalance, NewPurchase, NewSale,
    NewSalesReturn, NewSorting, NewStockAdjustment, NewWastage, Party, PurchaseLine, SaleLine,
    SortingLine,
};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use report::{CashReport, LoanReport, PartyReport, ReportRow, StockLedgerRow};

pub use cash_transactions::CashTransactionKind;
pub use opening_balances::BalanceKind;
pub use party_transactions::PartyReference;
pub use sales_masters::PaymentKind;
pub use stock_movements::ReferenceKind;

pub mod account_heads;
pub mod bank_accounts;
pub mod cash_transactions;
pub mod commands;
pub mod customers;
mod error;
pub mod expenses;
pub mod items;
pub mod loans;
pub mod opening_balances;
mod ops;
pub mod party_transactions;
pub mod purchase_details;
pub mod purchase_masters;
pub mod report;
pub mod sales_details;
pub mod sales_masters;
pub mod sales_returns;
pub mod sortings;
pub mod stock_adjustments;
pub mod stock_movements;
pub mod vendors;
pub mod wastages;

pub type ResultEngine<T> = Result<T, EngineError>;
