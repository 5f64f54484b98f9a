//! Command structs for engine operations.
//!
//! These types group parameters for the business write operations (purchase,
//! sorting, sale, return, wastage, adjustment, loan, expense, cash entry),
//! keeping call sites readable and avoiding long argument lists.

use rust_decimal::Decimal;
use sea_orm::prelude::Date;

use crate::cash_transactions::CashTransactionKind;
use crate::opening_balances::BalanceKind;
use crate::sales_masters::PaymentKind;

/// A customer or vendor, for balance and statement queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Party {
    Customer(i32),
    Vendor(i32),
}

/// One line of a purchase document.
#[derive(Clone, Debug)]
pub struct PurchaseLine {
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Record a purchase: inbound stock for every line.
#[derive(Clone, Debug)]
pub struct NewPurchase {
    pub vendor_id: i32,
    pub purchase_date: Date,
    pub lines: Vec<PurchaseLine>,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewPurchase {
    #[must_use]
    pub fn new(vendor_id: i32, purchase_date: Date, created_by: i32) -> Self {
        Self {
            vendor_id,
            purchase_date,
            lines: Vec::new(),
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn line(mut self, item_id: i32, quantity: i32, unit_price: Decimal) -> Self {
        self.lines.push(PurchaseLine {
            item_id,
            quantity,
            unit_price,
        });
        self
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// One grading of a sorting run. `source_quantity` leaves the purchased
/// batch, `target_quantity` arrives on the graded item; the difference, if
/// any, is trim loss.
#[derive(Clone, Debug)]
pub struct SortingLine {
    pub source_item_id: i32,
    pub target_item_id: i32,
    pub source_quantity: i32,
    pub target_quantity: i32,
}

/// Sort a purchase into graded items.
#[derive(Clone, Debug)]
pub struct NewSorting {
    pub purchase_id: i32,
    pub sorting_date: Date,
    pub lines: Vec<SortingLine>,
    pub created_by: i32,
}

impl NewSorting {
    #[must_use]
    pub fn new(purchase_id: i32, sorting_date: Date, created_by: i32) -> Self {
        Self {
            purchase_id,
            sorting_date,
            lines: Vec::new(),
            created_by,
        }
    }

    #[must_use]
    pub fn line(
        mut self,
        source_item_id: i32,
        target_item_id: i32,
        source_quantity: i32,
        target_quantity: i32,
    ) -> Self {
        self.lines.push(SortingLine {
            source_item_id,
            target_item_id,
            source_quantity,
            target_quantity,
        });
        self
    }
}

/// One line of a sales invoice.
#[derive(Clone, Debug)]
pub struct SaleLine {
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Record a sale: outbound stock plus a receivable against the customer.
#[derive(Clone, Debug)]
pub struct NewSale {
    pub customer_id: i32,
    pub sale_date: Date,
    pub payment_type: PaymentKind,
    pub bank_account_id: Option<i32>,
    pub lines: Vec<SaleLine>,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewSale {
    #[must_use]
    pub fn new(
        customer_id: i32,
        sale_date: Date,
        payment_type: PaymentKind,
        created_by: i32,
    ) -> Self {
        Self {
            customer_id,
            sale_date,
            payment_type,
            bank_account_id: None,
            lines: Vec::new(),
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn line(mut self, item_id: i32, quantity: i32, unit_price: Decimal) -> Self {
        self.lines.push(SaleLine {
            item_id,
            quantity,
            unit_price,
        });
        self
    }

    #[must_use]
    pub fn bank_account_id(mut self, bank_account_id: i32) -> Self {
        self.bank_account_id = Some(bank_account_id);
        self
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Return part or all of one invoice line.
#[derive(Clone, Debug)]
pub struct NewSalesReturn {
    pub detail_id: i32,
    pub quantity: i32,
    pub created_by: i32,
}

impl NewSalesReturn {
    #[must_use]
    pub fn new(detail_id: i32, quantity: i32, created_by: i32) -> Self {
        Self {
            detail_id,
            quantity,
            created_by,
        }
    }
}

/// Write stock off as wastage.
#[derive(Clone, Debug)]
pub struct NewWastage {
    pub item_id: i32,
    pub quantity: i32,
    pub wastage_date: Date,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewWastage {
    #[must_use]
    pub fn new(item_id: i32, quantity: i32, wastage_date: Date, created_by: i32) -> Self {
        Self {
            item_id,
            quantity,
            wastage_date,
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Convert stock of one item into another.
#[derive(Clone, Debug)]
pub struct NewStockAdjustment {
    pub previous_item_id: i32,
    pub new_item_id: i32,
    pub quantity: i32,
    pub adjustment_date: Date,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewStockAdjustment {
    #[must_use]
    pub fn new(
        previous_item_id: i32,
        new_item_id: i32,
        quantity: i32,
        adjustment_date: Date,
        created_by: i32,
    ) -> Self {
        Self {
            previous_item_id,
            new_item_id,
            quantity,
            adjustment_date,
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Register a loan and its disbursement into the till.
#[derive(Clone, Debug)]
pub struct NewLoan {
    pub lender_name: String,
    pub unique_name: String,
    pub amount: Decimal,
    pub loan_date: Date,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewLoan {
    #[must_use]
    pub fn new(
        lender_name: impl Into<String>,
        unique_name: impl Into<String>,
        amount: Decimal,
        loan_date: Date,
        created_by: i32,
    ) -> Self {
        Self {
            lender_name: lender_name.into(),
            unique_name: unique_name.into(),
            amount,
            loan_date,
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Record an expense against an account head.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub account_head_id: i32,
    pub amount: Decimal,
    pub expense_date: Date,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewExpense {
    #[must_use]
    pub fn new(account_head_id: i32, amount: Decimal, expense_date: Date, created_by: i32) -> Self {
        Self {
            account_head_id,
            amount,
            expense_date,
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Post one cash/bank ledger entry.
#[derive(Clone, Debug)]
pub struct NewCashTransaction {
    pub kind: CashTransactionKind,
    pub amount: Decimal,
    pub transaction_date: Date,
    pub is_cash: bool,
    pub bank_account_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub account_head_id: Option<i32>,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewCashTransaction {
    #[must_use]
    pub fn new(
        kind: CashTransactionKind,
        amount: Decimal,
        transaction_date: Date,
        created_by: i32,
    ) -> Self {
        Self {
            kind,
            amount,
            transaction_date,
            is_cash: true,
            bank_account_id: None,
            customer_id: None,
            vendor_id: None,
            account_head_id: None,
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn bank_account_id(mut self, bank_account_id: i32) -> Self {
        self.is_cash = false;
        self.bank_account_id = Some(bank_account_id);
        self
    }

    #[must_use]
    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    #[must_use]
    pub fn vendor_id(mut self, vendor_id: i32) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    #[must_use]
    pub fn account_head_id(mut self, account_head_id: i32) -> Self {
        self.account_head_id = Some(account_head_id);
        self
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Move money between the cash drawer and a bank account. Posts one signed
/// contra row per side.
#[derive(Clone, Debug)]
pub struct NewContra {
    pub amount: Decimal,
    pub transaction_date: Date,
    pub bank_account_id: i32,
    /// True moves cash into the bank, false withdraws from it.
    pub to_bank: bool,
    pub narration: Option<String>,
    pub created_by: i32,
}

impl NewContra {
    #[must_use]
    pub fn new(
        amount: Decimal,
        transaction_date: Date,
        bank_account_id: i32,
        to_bank: bool,
        created_by: i32,
    ) -> Self {
        Self {
            amount,
            transaction_date,
            bank_account_id,
            to_bank,
            narration: None,
            created_by,
        }
    }

    #[must_use]
    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Lay down an opening balance for the cash drawer, a bank account or a
/// party.
#[derive(Clone, Debug)]
pub struct NewOpeningBalance {
    pub amount: Decimal,
    pub balance_type: BalanceKind,
    pub as_of_date: Date,
    pub is_cash: bool,
    pub bank_account_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub created_by: i32,
}

impl NewOpeningBalance {
    /// Opening balance for the cash drawer. Retarget with one of the scope
    /// setters below.
    #[must_use]
    pub fn cash(amount: Decimal, balance_type: BalanceKind, as_of_date: Date, created_by: i32) -> Self {
        Self {
            amount,
            balance_type,
            as_of_date,
            is_cash: true,
            bank_account_id: None,
            customer_id: None,
            vendor_id: None,
            created_by,
        }
    }

    #[must_use]
    pub fn bank_account_id(mut self, bank_account_id: i32) -> Self {
        self.is_cash = false;
        self.bank_account_id = Some(bank_account_id);
        self
    }

    #[must_use]
    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.is_cash = false;
        self.customer_id = Some(customer_id);
        self
    }

    #[must_use]
    pub fn vendor_id(mut self, vendor_id: i32) -> Self {
        self.is_cash = false;
        self.vendor_id = Some(vendor_id);
        self
    }
}
