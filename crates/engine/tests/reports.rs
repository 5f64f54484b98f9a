use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

use engine::{
    BalanceKind, CashTransactionKind, Engine, EngineError, NewCashTransaction, NewExpense,
    NewLoan, NewOpeningBalance, NewPurchase, NewSale, Party, PaymentKind, ReferenceKind,
    StockLedgerRow,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn create_item(db: &DatabaseConnection, name: &str, sell_price: Decimal) -> i32 {
    let item = engine::items::ActiveModel {
        item_name: Set(name.to_string()),
        avg_price: Set(None),
        sell_price: Set(sell_price),
        created_by: Set(1),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    engine::items::Entity::insert(item)
        .exec_with_returning(db)
        .await
        .unwrap()
        .item_id
}

async fn create_customer(db: &DatabaseConnection, name: &str) -> i32 {
    let customer = engine::customers::ActiveModel {
        customer_name: Set(name.to_string()),
        created_by: Set(1),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    engine::customers::Entity::insert(customer)
        .exec_with_returning(db)
        .await
        .unwrap()
        .customer_id
}

async fn create_vendor(db: &DatabaseConnection, name: &str) -> i32 {
    let vendor = engine::vendors::ActiveModel {
        vendor_name: Set(name.to_string()),
        created_by: Set(1),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    engine::vendors::Entity::insert(vendor)
        .exec_with_returning(db)
        .await
        .unwrap()
        .vendor_id
}

async fn create_account_head(db: &DatabaseConnection, name: &str) -> i32 {
    let head = engine::account_heads::ActiveModel {
        head_name: Set(name.to_string()),
        created_by: Set(1),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    engine::account_heads::Entity::insert(head)
        .exec_with_returning(db)
        .await
        .unwrap()
        .account_head_id
}

#[tokio::test]
async fn cash_report_brackets_the_range() {
    let (engine, db) = engine_with_db().await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_opening_balance(NewOpeningBalance::cash(
            dec!(500),
            BalanceKind::Debit,
            d("2026-01-01"),
            1,
        ))
        .await
        .unwrap();
    engine
        .record_cash_transaction(
            NewCashTransaction::new(
                CashTransactionKind::Received,
                dec!(200),
                d("2026-02-01"),
                1,
            )
            .customer_id(customer),
        )
        .await
        .unwrap();
    engine
        .record_cash_transaction(
            NewCashTransaction::new(
                CashTransactionKind::Payment,
                dec!(100),
                d("2026-02-02"),
                1,
            )
            .vendor_id(vendor),
        )
        .await
        .unwrap();

    let report = engine
        .cash_report(d("2026-02-01"), d("2026-02-01"))
        .await
        .unwrap();
    assert_eq!(report.opening_balance, dec!(500));
    assert_eq!(report.receipts.len(), 1);
    assert_eq!(report.receipts[0].particular, "Received From Corner Shop");
    assert_eq!(report.receipts[0].amount, dec!(200));
    assert!(report.payments.is_empty());
    assert_eq!(report.closing_balance, dec!(700));

    let report = engine
        .cash_report(d("2026-02-02"), d("2026-02-02"))
        .await
        .unwrap();
    assert_eq!(report.opening_balance, dec!(700));
    assert_eq!(report.payments.len(), 1);
    assert_eq!(report.payments[0].particular, "Payment To Field Co");
    assert_eq!(report.closing_balance, dec!(600));

    let err = engine
        .cash_report(d("2026-02-02"), d("2026-02-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn cash_report_is_reproducible() {
    let (engine, db) = engine_with_db().await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_opening_balance(NewOpeningBalance::cash(
            dec!(250),
            BalanceKind::Debit,
            d("2026-01-01"),
            1,
        ))
        .await
        .unwrap();
    engine
        .record_cash_transaction(
            NewCashTransaction::new(
                CashTransactionKind::Received,
                dec!(120),
                d("2026-02-01"),
                1,
            )
            .customer_id(customer),
        )
        .await
        .unwrap();
    engine
        .record_cash_transaction(
            NewCashTransaction::new(CashTransactionKind::Payment, dec!(40), d("2026-02-03"), 1)
                .vendor_id(vendor),
        )
        .await
        .unwrap();

    // Reports are folded from the ledgers, so rerunning one with no writes
    // in between reproduces it exactly.
    let first = engine
        .cash_report(d("2026-02-01"), d("2026-02-28"))
        .await
        .unwrap();
    let second = engine
        .cash_report(d("2026-02-01"), d("2026-02-28"))
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.opening_balance, dec!(250));
    assert_eq!(first.closing_balance, dec!(330));
}

#[tokio::test]
async fn party_report_is_a_running_statement() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_opening_balance(
            NewOpeningBalance::cash(dec!(100), BalanceKind::Debit, d("2026-01-01"), 1)
                .customer_id(customer),
        )
        .await
        .unwrap();
    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 100, dec!(10)))
        .await
        .unwrap();
    engine
        .create_sale(
            NewSale::new(customer, d("2026-02-02"), PaymentKind::Credit, 1).line(
                item,
                18,
                dec!(25),
            ),
        )
        .await
        .unwrap();
    engine
        .record_cash_transaction(
            NewCashTransaction::new(
                CashTransactionKind::Received,
                dec!(200),
                d("2026-02-03"),
                1,
            )
            .customer_id(customer),
        )
        .await
        .unwrap();

    let report = engine
        .party_report(Party::Customer(customer), d("2026-02-01"), d("2026-02-28"))
        .await
        .unwrap();
    assert_eq!(report.opening_balance, dec!(100));
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].particular, "Sales");
    assert_eq!(report.rows[0].amount, dec!(450));
    assert_eq!(report.rows[1].particular, "Payment");
    assert_eq!(report.rows[1].amount, dec!(-200));
    assert_eq!(report.closing_balance, dec!(350));

    let err = engine
        .party_report(Party::Customer(customer + 99), d("2026-02-01"), d("2026-02-28"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn stock_ledger_carries_a_running_balance() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 100, dec!(10)))
        .await
        .unwrap();
    engine
        .create_sale(
            NewSale::new(customer, d("2026-02-02"), PaymentKind::Credit, 1).line(
                item,
                30,
                dec!(25),
            ),
        )
        .await
        .unwrap();
    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-02-02"), 1).line(item, 20, dec!(10)))
        .await
        .unwrap();

    let ledger = engine
        .stock_ledger(item, d("2026-02-01"), d("2026-02-28"))
        .await
        .unwrap();
    assert_eq!(ledger.len(), 4);
    assert_eq!(
        ledger[0],
        StockLedgerRow::Opening {
            date: d("2026-02-01"),
            quantity: 100
        }
    );
    // Same-day rows keep posting order.
    match &ledger[1] {
        StockLedgerRow::Movement {
            reference,
            quantity,
            running,
            ..
        } => {
            assert_eq!(*reference, ReferenceKind::Sales);
            assert_eq!(*quantity, -30);
            assert_eq!(*running, 70);
        }
        row => panic!("expected a movement, got {row:?}"),
    }
    match &ledger[2] {
        StockLedgerRow::Movement {
            reference,
            quantity,
            running,
            ..
        } => {
            assert_eq!(*reference, ReferenceKind::Purchase);
            assert_eq!(*quantity, 20);
            assert_eq!(*running, 90);
        }
        row => panic!("expected a movement, got {row:?}"),
    }
    assert_eq!(
        ledger[3],
        StockLedgerRow::Closing {
            date: d("2026-02-28"),
            quantity: 90
        }
    );
}

#[tokio::test]
async fn loan_report_nets_repayments_by_head() {
    let (engine, db) = engine_with_db().await;

    engine
        .create_loan(NewLoan::new(
            "Uncle Ravi",
            "ravi-2026",
            dec!(1000),
            d("2026-01-03"),
            1,
        ))
        .await
        .unwrap();
    let loan_head = create_account_head(&db, "ravi-2026").await;
    let other_head = create_account_head(&db, "Electricity").await;

    engine
        .record_expense(NewExpense::new(loan_head, dec!(300), d("2026-02-01"), 1))
        .await
        .unwrap();
    // Unrelated expenses stay off the loan report.
    engine
        .record_expense(NewExpense::new(other_head, dec!(55), d("2026-02-05"), 1))
        .await
        .unwrap();

    let report = engine.loan_report().await.unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].particular, "Loan from Uncle Ravi (ravi-2026)");
    assert_eq!(report.rows[0].amount, dec!(1000));
    assert_eq!(report.rows[1].particular, "Repayment: ravi-2026");
    assert_eq!(report.rows[1].amount, dec!(-300));
    assert_eq!(report.outstanding, dec!(700));
}
