//! Initial schema migration - creates all tables from scratch.
//!
//! Master data:
//!
//! - `item`: stock items, each carrying its weighted-average cost
//! - `customer`, `vendor`, `bank_account`, `account_head`
//!
//! Ledgers:
//!
//! - `stock_movement`: append-only signed stock quantities
//! - `cash_transaction`: cash drawer and bank entries
//! - `party_transaction`: customer/vendor subledger
//! - `opening_balance`: one row per scope when the books open
//!
//! Business documents:
//!
//! - `purchase_master`/`purchase_detail`, `sales_master`/`sales_detail`,
//!   `sales_return`, `sorting`, `wastage`, `stock_adjustment`, `loan`,
//!   `expense`

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Item {
    Table,
    ItemId,
    ItemName,
    AvgPrice,
    SellPrice,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}

#[derive(Iden)]
enum Customer {
    Table,
    CustomerId,
    CustomerName,
    Phone,
    Address,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Vendor {
    Table,
    VendorId,
    VendorName,
    Phone,
    Address,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum BankAccount {
    Table,
    BankAccountId,
    BankName,
    AccountNumber,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum AccountHead {
    Table,
    AccountHeadId,
    HeadName,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum StockMovement {
    Table,
    MovementId,
    ItemId,
    Quantity,
    UnitPrice,
    TransactionDate,
    ReferenceType,
    ReferenceId,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum CashTransaction {
    Table,
    TransactionId,
    TransactionDate,
    TransactionType,
    Amount,
    IsCash,
    BankAccountId,
    CustomerId,
    VendorId,
    AccountHeadId,
    Narration,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum PartyTransaction {
    Table,
    EntryId,
    TransactionDate,
    Amount,
    ReferenceType,
    ReferenceId,
    CustomerId,
    VendorId,
    Narration,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum OpeningBalance {
    Table,
    OpeningBalanceId,
    Amount,
    BalanceType,
    AsOfDate,
    IsCash,
    BankAccountId,
    CustomerId,
    VendorId,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum PurchaseMaster {
    Table,
    PurchaseId,
    VendorId,
    PurchaseDate,
    TotalAmount,
    IsSorted,
    Narration,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum PurchaseDetail {
    Table,
    DetailId,
    PurchaseId,
    ItemId,
    Quantity,
    UnitPrice,
    LineTotal,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum SalesMaster {
    Table,
    SaleId,
    CustomerId,
    SaleDate,
    TotalAmount,
    PaymentType,
    BankAccountId,
    Narration,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum SalesDetail {
    Table,
    DetailId,
    SaleId,
    ItemId,
    Quantity,
    UnitPrice,
    CostPrice,
    LineTotal,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum SalesReturn {
    Table,
    ReturnId,
    SaleId,
    DetailId,
    ItemId,
    Quantity,
    UnitPrice,
    ReturnAmount,
    ReturnDate,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Sorting {
    Table,
    SortingId,
    PurchaseId,
    SourceItemId,
    TargetItemId,
    SourceQuantity,
    TargetQuantity,
    UnitPrice,
    SortingDate,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Wastage {
    Table,
    WastageId,
    ItemId,
    Quantity,
    NetLoss,
    WastageDate,
    Narration,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum StockAdjustment {
    Table,
    AdjustmentId,
    PreviousItemId,
    NewItemId,
    Quantity,
    AdjustmentDate,
    Narration,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Loan {
    Table,
    LoanId,
    LenderName,
    UniqueName,
    Amount,
    LoanDate,
    Narration,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Expense {
    Table,
    ExpenseId,
    AccountHeadId,
    Amount,
    ExpenseDate,
    Narration,
    CreatedBy,
    CreatedAt,
}

fn pk(col: impl IntoIden) -> ColumnDef {
    let mut def = ColumnDef::new(col);
    def.integer().not_null().auto_increment().primary_key();
    def
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Master data
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(pk(Item::ItemId))
                    .col(ColumnDef::new(Item::ItemName).string().not_null())
                    .col(ColumnDef::new(Item::AvgPrice).decimal())
                    .col(ColumnDef::new(Item::SellPrice).decimal().not_null())
                    .col(ColumnDef::new(Item::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Item::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Item::UpdatedBy).integer())
                    .col(ColumnDef::new(Item::UpdatedAt).timestamp())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(pk(Customer::CustomerId))
                    .col(ColumnDef::new(Customer::CustomerName).string().not_null())
                    .col(ColumnDef::new(Customer::Phone).string())
                    .col(ColumnDef::new(Customer::Address).string())
                    .col(ColumnDef::new(Customer::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Customer::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vendor::Table)
                    .if_not_exists()
                    .col(pk(Vendor::VendorId))
                    .col(ColumnDef::new(Vendor::VendorName).string().not_null())
                    .col(ColumnDef::new(Vendor::Phone).string())
                    .col(ColumnDef::new(Vendor::Address).string())
                    .col(ColumnDef::new(Vendor::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Vendor::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BankAccount::Table)
                    .if_not_exists()
                    .col(pk(BankAccount::BankAccountId))
                    .col(ColumnDef::new(BankAccount::BankName).string().not_null())
                    .col(
                        ColumnDef::new(BankAccount::AccountNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BankAccount::CreatedBy).integer().not_null())
                    .col(
                        ColumnDef::new(BankAccount::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountHead::Table)
                    .if_not_exists()
                    .col(pk(AccountHead::AccountHeadId))
                    .col(ColumnDef::new(AccountHead::HeadName).string().not_null())
                    .col(ColumnDef::new(AccountHead::CreatedBy).integer().not_null())
                    .col(
                        ColumnDef::new(AccountHead::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-account_head-head_name-unique")
                    .table(AccountHead::Table)
                    .col(AccountHead::HeadName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Purchases
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PurchaseMaster::Table)
                    .if_not_exists()
                    .col(pk(PurchaseMaster::PurchaseId))
                    .col(ColumnDef::new(PurchaseMaster::VendorId).integer().not_null())
                    .col(ColumnDef::new(PurchaseMaster::PurchaseDate).date().not_null())
                    .col(
                        ColumnDef::new(PurchaseMaster::TotalAmount)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseMaster::IsSorted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PurchaseMaster::Narration).string())
                    .col(ColumnDef::new(PurchaseMaster::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(PurchaseMaster::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_master-vendor_id")
                            .from(PurchaseMaster::Table, PurchaseMaster::VendorId)
                            .to(Vendor::Table, Vendor::VendorId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseDetail::Table)
                    .if_not_exists()
                    .col(pk(PurchaseDetail::DetailId))
                    .col(ColumnDef::new(PurchaseDetail::PurchaseId).integer().not_null())
                    .col(ColumnDef::new(PurchaseDetail::ItemId).integer().not_null())
                    .col(ColumnDef::new(PurchaseDetail::Quantity).integer().not_null())
                    .col(ColumnDef::new(PurchaseDetail::UnitPrice).decimal().not_null())
                    .col(ColumnDef::new(PurchaseDetail::LineTotal).decimal().not_null())
                    .col(ColumnDef::new(PurchaseDetail::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(PurchaseDetail::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_detail-purchase_id")
                            .from(PurchaseDetail::Table, PurchaseDetail::PurchaseId)
                            .to(PurchaseMaster::Table, PurchaseMaster::PurchaseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_detail-item_id")
                            .from(PurchaseDetail::Table, PurchaseDetail::ItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase_detail-purchase_id")
                    .table(PurchaseDetail::Table)
                    .col(PurchaseDetail::PurchaseId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Sales
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SalesMaster::Table)
                    .if_not_exists()
                    .col(pk(SalesMaster::SaleId))
                    .col(ColumnDef::new(SalesMaster::CustomerId).integer().not_null())
                    .col(ColumnDef::new(SalesMaster::SaleDate).date().not_null())
                    .col(ColumnDef::new(SalesMaster::TotalAmount).decimal().not_null())
                    .col(ColumnDef::new(SalesMaster::PaymentType).string().not_null())
                    .col(ColumnDef::new(SalesMaster::BankAccountId).integer())
                    .col(ColumnDef::new(SalesMaster::Narration).string())
                    .col(ColumnDef::new(SalesMaster::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(SalesMaster::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales_master-customer_id")
                            .from(SalesMaster::Table, SalesMaster::CustomerId)
                            .to(Customer::Table, Customer::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales_master-bank_account_id")
                            .from(SalesMaster::Table, SalesMaster::BankAccountId)
                            .to(BankAccount::Table, BankAccount::BankAccountId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SalesDetail::Table)
                    .if_not_exists()
                    .col(pk(SalesDetail::DetailId))
                    .col(ColumnDef::new(SalesDetail::SaleId).integer().not_null())
                    .col(ColumnDef::new(SalesDetail::ItemId).integer().not_null())
                    .col(ColumnDef::new(SalesDetail::Quantity).integer().not_null())
                    .col(ColumnDef::new(SalesDetail::UnitPrice).decimal().not_null())
                    .col(ColumnDef::new(SalesDetail::CostPrice).decimal().not_null())
                    .col(ColumnDef::new(SalesDetail::LineTotal).decimal().not_null())
                    .col(ColumnDef::new(SalesDetail::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(SalesDetail::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales_detail-sale_id")
                            .from(SalesDetail::Table, SalesDetail::SaleId)
                            .to(SalesMaster::Table, SalesMaster::SaleId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales_detail-item_id")
                            .from(SalesDetail::Table, SalesDetail::ItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sales_detail-sale_id")
                    .table(SalesDetail::Table)
                    .col(SalesDetail::SaleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SalesReturn::Table)
                    .if_not_exists()
                    .col(pk(SalesReturn::ReturnId))
                    .col(ColumnDef::new(SalesReturn::SaleId).integer().not_null())
                    .col(ColumnDef::new(SalesReturn::DetailId).integer().not_null())
                    .col(ColumnDef::new(SalesReturn::ItemId).integer().not_null())
                    .col(ColumnDef::new(SalesReturn::Quantity).integer().not_null())
                    .col(ColumnDef::new(SalesReturn::UnitPrice).decimal().not_null())
                    .col(ColumnDef::new(SalesReturn::ReturnAmount).decimal().not_null())
                    .col(ColumnDef::new(SalesReturn::ReturnDate).date().not_null())
                    .col(ColumnDef::new(SalesReturn::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(SalesReturn::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales_return-sale_id")
                            .from(SalesReturn::Table, SalesReturn::SaleId)
                            .to(SalesMaster::Table, SalesMaster::SaleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales_return-detail_id")
                            .from(SalesReturn::Table, SalesReturn::DetailId)
                            .to(SalesDetail::Table, SalesDetail::DetailId),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Sorting, wastage, adjustment
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Sorting::Table)
                    .if_not_exists()
                    .col(pk(Sorting::SortingId))
                    .col(ColumnDef::new(Sorting::PurchaseId).integer().not_null())
                    .col(ColumnDef::new(Sorting::SourceItemId).integer().not_null())
                    .col(ColumnDef::new(Sorting::TargetItemId).integer().not_null())
                    .col(ColumnDef::new(Sorting::SourceQuantity).integer().not_null())
                    .col(ColumnDef::new(Sorting::TargetQuantity).integer().not_null())
                    .col(ColumnDef::new(Sorting::UnitPrice).decimal().not_null())
                    .col(ColumnDef::new(Sorting::SortingDate).date().not_null())
                    .col(ColumnDef::new(Sorting::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Sorting::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sorting-purchase_id")
                            .from(Sorting::Table, Sorting::PurchaseId)
                            .to(PurchaseMaster::Table, PurchaseMaster::PurchaseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sorting-source_item_id")
                            .from(Sorting::Table, Sorting::SourceItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sorting-target_item_id")
                            .from(Sorting::Table, Sorting::TargetItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Wastage::Table)
                    .if_not_exists()
                    .col(pk(Wastage::WastageId))
                    .col(ColumnDef::new(Wastage::ItemId).integer().not_null())
                    .col(ColumnDef::new(Wastage::Quantity).integer().not_null())
                    .col(ColumnDef::new(Wastage::NetLoss).decimal().not_null())
                    .col(ColumnDef::new(Wastage::WastageDate).date().not_null())
                    .col(ColumnDef::new(Wastage::Narration).string())
                    .col(ColumnDef::new(Wastage::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Wastage::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wastage-item_id")
                            .from(Wastage::Table, Wastage::ItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockAdjustment::Table)
                    .if_not_exists()
                    .col(pk(StockAdjustment::AdjustmentId))
                    .col(
                        ColumnDef::new(StockAdjustment::PreviousItemId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockAdjustment::NewItemId).integer().not_null())
                    .col(ColumnDef::new(StockAdjustment::Quantity).integer().not_null())
                    .col(ColumnDef::new(StockAdjustment::AdjustmentDate).date().not_null())
                    .col(ColumnDef::new(StockAdjustment::Narration).string())
                    .col(ColumnDef::new(StockAdjustment::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(StockAdjustment::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-stock_adjustment-previous_item_id")
                            .from(StockAdjustment::Table, StockAdjustment::PreviousItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-stock_adjustment-new_item_id")
                            .from(StockAdjustment::Table, StockAdjustment::NewItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Loans and expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Loan::Table)
                    .if_not_exists()
                    .col(pk(Loan::LoanId))
                    .col(ColumnDef::new(Loan::LenderName).string().not_null())
                    .col(ColumnDef::new(Loan::UniqueName).string().not_null())
                    .col(ColumnDef::new(Loan::Amount).decimal().not_null())
                    .col(ColumnDef::new(Loan::LoanDate).date().not_null())
                    .col(ColumnDef::new(Loan::Narration).string())
                    .col(ColumnDef::new(Loan::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Loan::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-loan-unique_name-unique")
                    .table(Loan::Table)
                    .col(Loan::UniqueName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(pk(Expense::ExpenseId))
                    .col(ColumnDef::new(Expense::AccountHeadId).integer().not_null())
                    .col(ColumnDef::new(Expense::Amount).decimal().not_null())
                    .col(ColumnDef::new(Expense::ExpenseDate).date().not_null())
                    .col(ColumnDef::new(Expense::Narration).string())
                    .col(ColumnDef::new(Expense::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Expense::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense-account_head_id")
                            .from(Expense::Table, Expense::AccountHeadId)
                            .to(AccountHead::Table, AccountHead::AccountHeadId),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Ledgers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(StockMovement::Table)
                    .if_not_exists()
                    .col(pk(StockMovement::MovementId))
                    .col(ColumnDef::new(StockMovement::ItemId).integer().not_null())
                    .col(ColumnDef::new(StockMovement::Quantity).integer().not_null())
                    .col(ColumnDef::new(StockMovement::UnitPrice).decimal().not_null())
                    .col(
                        ColumnDef::new(StockMovement::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockMovement::ReferenceType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockMovement::ReferenceId).integer())
                    .col(ColumnDef::new(StockMovement::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(StockMovement::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-stock_movement-item_id")
                            .from(StockMovement::Table, StockMovement::ItemId)
                            .to(Item::Table, Item::ItemId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-stock_movement-item_id-transaction_date")
                    .table(StockMovement::Table)
                    .col(StockMovement::ItemId)
                    .col(StockMovement::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CashTransaction::Table)
                    .if_not_exists()
                    .col(pk(CashTransaction::TransactionId))
                    .col(
                        ColumnDef::new(CashTransaction::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashTransaction::TransactionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CashTransaction::Amount).decimal().not_null())
                    .col(ColumnDef::new(CashTransaction::IsCash).boolean().not_null())
                    .col(ColumnDef::new(CashTransaction::BankAccountId).integer())
                    .col(ColumnDef::new(CashTransaction::CustomerId).integer())
                    .col(ColumnDef::new(CashTransaction::VendorId).integer())
                    .col(ColumnDef::new(CashTransaction::AccountHeadId).integer())
                    .col(ColumnDef::new(CashTransaction::Narration).string())
                    .col(ColumnDef::new(CashTransaction::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(CashTransaction::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_transaction-bank_account_id")
                            .from(CashTransaction::Table, CashTransaction::BankAccountId)
                            .to(BankAccount::Table, BankAccount::BankAccountId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_transaction-customer_id")
                            .from(CashTransaction::Table, CashTransaction::CustomerId)
                            .to(Customer::Table, Customer::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_transaction-vendor_id")
                            .from(CashTransaction::Table, CashTransaction::VendorId)
                            .to(Vendor::Table, Vendor::VendorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_transaction-account_head_id")
                            .from(CashTransaction::Table, CashTransaction::AccountHeadId)
                            .to(AccountHead::Table, AccountHead::AccountHeadId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cash_transaction-transaction_date")
                    .table(CashTransaction::Table)
                    .col(CashTransaction::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PartyTransaction::Table)
                    .if_not_exists()
                    .col(pk(PartyTransaction::EntryId))
                    .col(
                        ColumnDef::new(PartyTransaction::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyTransaction::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(PartyTransaction::ReferenceType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyTransaction::ReferenceId).integer())
                    .col(ColumnDef::new(PartyTransaction::CustomerId).integer())
                    .col(ColumnDef::new(PartyTransaction::VendorId).integer())
                    .col(ColumnDef::new(PartyTransaction::Narration).string())
                    .col(ColumnDef::new(PartyTransaction::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(PartyTransaction::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-party_transaction-customer_id")
                            .from(PartyTransaction::Table, PartyTransaction::CustomerId)
                            .to(Customer::Table, Customer::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-party_transaction-vendor_id")
                            .from(PartyTransaction::Table, PartyTransaction::VendorId)
                            .to(Vendor::Table, Vendor::VendorId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-party_transaction-customer_id")
                    .table(PartyTransaction::Table)
                    .col(PartyTransaction::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-party_transaction-vendor_id")
                    .table(PartyTransaction::Table)
                    .col(PartyTransaction::VendorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OpeningBalance::Table)
                    .if_not_exists()
                    .col(pk(OpeningBalance::OpeningBalanceId))
                    .col(ColumnDef::new(OpeningBalance::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(OpeningBalance::BalanceType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OpeningBalance::AsOfDate).date().not_null())
                    .col(
                        ColumnDef::new(OpeningBalance::IsCash)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(OpeningBalance::BankAccountId).integer())
                    .col(ColumnDef::new(OpeningBalance::CustomerId).integer())
                    .col(ColumnDef::new(OpeningBalance::VendorId).integer())
                    .col(ColumnDef::new(OpeningBalance::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(OpeningBalance::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-opening_balance-bank_account_id")
                            .from(OpeningBalance::Table, OpeningBalance::BankAccountId)
                            .to(BankAccount::Table, BankAccount::BankAccountId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-opening_balance-customer_id")
                            .from(OpeningBalance::Table, OpeningBalance::CustomerId)
                            .to(Customer::Table, Customer::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-opening_balance-vendor_id")
                            .from(OpeningBalance::Table, OpeningBalance::VendorId)
                            .to(Vendor::Table, Vendor::VendorId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(OpeningBalance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PartyTransaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CashTransaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockMovement::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expense::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Loan::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockAdjustment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wastage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sorting::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalesReturn::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalesDetail::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalesMaster::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseDetail::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseMaster::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountHead::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankAccount::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vendor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await?;
        Ok(())
    }
}
