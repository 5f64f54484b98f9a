use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection, EntityTrait, QueryFilter, Set};

use engine::{
    BalanceKind, CashTransactionKind, Engine, EngineError, NewCashTransaction, NewContra,
    NewExpense, NewLoan, NewOpeningBalance, NewPurchase, NewSale, NewSalesReturn, NewSorting,
    NewStockAdjustment, NewWastage, Party, PaymentKind,
};
use migration::MigratorTrait;
use sea_orm::ColumnTrait;

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

async fn create_bank_account(db: &DatabaseConnection, name: &str) -> i32 {
    let account = engine::bank_accounts::ActiveModel {
        bank_name: Set(name.to_string()),
        account_number: Set("0001".to_string()),
        created_by: Set(1),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    engine::bank_accounts::Entity::insert(account)
        .exec_with_returning(db)
        .await
        .unwrap()
        .bank_account_id
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
async fn purchase_sets_average_cost_and_stock() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Bulk", dec!(15)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 100, dec!(10)))
        .await
        .unwrap();

    assert_eq!(engine.average_cost(item).await.unwrap(), Some(dec!(10)));
    assert_eq!(
        engine.quantity_on_hand(item, d("2026-01-05")).await.unwrap(),
        100
    );

    // A second lot at a different price shifts the weighted average.
    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-10"), 1).line(item, 100, dec!(20)))
        .await
        .unwrap();

    assert_eq!(engine.average_cost(item).await.unwrap(), Some(dec!(15)));
    assert_eq!(
        engine.quantity_on_hand(item, d("2026-01-10")).await.unwrap(),
        200
    );
}

#[tokio::test]
async fn purchase_rejects_bad_lines() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Bulk", dec!(15)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    let err = engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 0, dec!(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));

    let err = engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn sorting_moves_stock_at_source_cost() {
    let (engine, db) = engine_with_db().await;
    let bulk = create_item(&db, "Potato Bulk", dec!(15)).await;
    let grade_a = create_item(&db, "Potato Grade A", dec!(25)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    let purchase = engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(bulk, 100, dec!(10)))
        .await
        .unwrap();

    engine
        .create_sorting(
            NewSorting::new(purchase.purchase_id, d("2026-01-06"), 1).line(bulk, grade_a, 60, 60),
        )
        .await
        .unwrap();

    assert_eq!(
        engine.quantity_on_hand(bulk, d("2026-01-06")).await.unwrap(),
        40
    );
    assert_eq!(
        engine
            .quantity_on_hand(grade_a, d("2026-01-06"))
            .await
            .unwrap(),
        60
    );
    // The graded item inherits the source's average, not its sell price.
    assert_eq!(engine.average_cost(grade_a).await.unwrap(), Some(dec!(10)));

    let master = engine::purchase_masters::Entity::find_by_id(purchase.purchase_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(master.is_sorted);

    // A sorted purchase cannot be sorted again.
    let err = engine
        .create_sorting(
            NewSorting::new(purchase.purchase_id, d("2026-01-07"), 1).line(bulk, grade_a, 10, 10),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn sorting_records_trim_loss() {
    let (engine, db) = engine_with_db().await;
    let bulk = create_item(&db, "Potato Bulk", dec!(15)).await;
    let grade_a = create_item(&db, "Potato Grade A", dec!(25)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    let purchase = engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(bulk, 50, dec!(10)))
        .await
        .unwrap();

    // 50 consumed, 45 produced: 5 lost to trimming.
    engine
        .create_sorting(
            NewSorting::new(purchase.purchase_id, d("2026-01-06"), 1).line(bulk, grade_a, 50, 45),
        )
        .await
        .unwrap();

    assert_eq!(
        engine.quantity_on_hand(bulk, d("2026-01-06")).await.unwrap(),
        0
    );
    assert_eq!(
        engine
            .quantity_on_hand(grade_a, d("2026-01-06"))
            .await
            .unwrap(),
        45
    );

    // The outbound leg consumes the purchased batch and is tagged against
    // the purchase; the inbound leg traces back to the sorting row.
    let outbound = engine::stock_movements::Entity::find()
        .filter(engine::stock_movements::Column::ItemId.eq(bulk))
        .filter(engine::stock_movements::Column::Quantity.eq(-50))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outbound.reference_type, "purchase");
    assert_eq!(outbound.reference_id, Some(purchase.purchase_id));
    let inbound = engine::stock_movements::Entity::find()
        .filter(engine::stock_movements::Column::ItemId.eq(grade_a))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(inbound.reference_type, "sorting");
    assert_eq!(inbound.quantity, 45);

    // Producing more than was consumed is not a thing.
    let purchase = engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-07"), 1).line(bulk, 20, dec!(10)))
        .await
        .unwrap();
    let err = engine
        .create_sorting(
            NewSorting::new(purchase.purchase_id, d("2026-01-08"), 1).line(bulk, grade_a, 10, 12),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));
}

#[tokio::test]
async fn sorting_rejects_items_not_on_the_purchase() {
    let (engine, db) = engine_with_db().await;
    let bulk = create_item(&db, "Potato Bulk", dec!(15)).await;
    let other = create_item(&db, "Onion Bulk", dec!(12)).await;
    let grade_a = create_item(&db, "Potato Grade A", dec!(25)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    let purchase = engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(bulk, 100, dec!(10)))
        .await
        .unwrap();

    let err = engine
        .create_sorting(
            NewSorting::new(purchase.purchase_id, d("2026-01-06"), 1).line(other, grade_a, 10, 10),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn delete_sorting_restores_both_sides() {
    let (engine, db) = engine_with_db().await;
    let bulk = create_item(&db, "Potato Bulk", dec!(15)).await;
    let grade_a = create_item(&db, "Potato Grade A", dec!(25)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    let purchase = engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(bulk, 100, dec!(10)))
        .await
        .unwrap();
    let rows = engine
        .create_sorting(
            NewSorting::new(purchase.purchase_id, d("2026-01-06"), 1).line(bulk, grade_a, 60, 60),
        )
        .await
        .unwrap();

    engine.delete_sorting(rows[0].sorting_id).await.unwrap();

    assert_eq!(
        engine.quantity_on_hand(bulk, d("2026-01-06")).await.unwrap(),
        100
    );
    assert_eq!(
        engine
            .quantity_on_hand(grade_a, d("2026-01-06"))
            .await
            .unwrap(),
        0
    );

    // The purchase reopens for sorting.
    engine
        .create_sorting(
            NewSorting::new(purchase.purchase_id, d("2026-01-07"), 1).line(bulk, grade_a, 30, 30),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn sale_requires_cost_basis_and_stock() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    // Never purchased: no average cost to value the sale with.
    let err = engine
        .create_sale(
            NewSale::new(customer, d("2026-01-08"), PaymentKind::Credit, 1).line(
                item,
                5,
                dec!(25),
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingCostBasis(_)));

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 10, dec!(10)))
        .await
        .unwrap();

    let err = engine
        .create_sale(
            NewSale::new(customer, d("2026-01-08"), PaymentKind::Credit, 1).line(
                item,
                11,
                dec!(25),
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));

    // Nothing was written by the failed attempts.
    assert_eq!(
        engine.quantity_on_hand(item, d("2026-01-08")).await.unwrap(),
        10
    );
    assert_eq!(
        engine
            .party_balance(Party::Customer(customer), d("2026-01-08"))
            .await
            .unwrap(),
        dec!(0)
    );
}

#[tokio::test]
async fn credit_sale_posts_receivable() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 100, dec!(10)))
        .await
        .unwrap();

    let sale = engine
        .create_sale(
            NewSale::new(customer, d("2026-01-08"), PaymentKind::Credit, 1).line(
                item,
                20,
                dec!(25),
            ),
        )
        .await
        .unwrap();
    assert_eq!(sale.total_amount, dec!(500));

    assert_eq!(
        engine.quantity_on_hand(item, d("2026-01-08")).await.unwrap(),
        80
    );
    assert_eq!(
        engine
            .party_balance(Party::Customer(customer), d("2026-01-08"))
            .await
            .unwrap(),
        dec!(500)
    );
    // Credit sale: no money in the till yet.
    assert_eq!(engine.cash_balance(d("2026-01-08")).await.unwrap(), dec!(0));
}

#[tokio::test]
async fn cash_sale_settles_receivable_immediately() {
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
            NewSale::new(customer, d("2026-01-08"), PaymentKind::Cash, 1).line(item, 20, dec!(25)),
        )
        .await
        .unwrap();

    assert_eq!(
        engine
            .party_balance(Party::Customer(customer), d("2026-01-08"))
            .await
            .unwrap(),
        dec!(0)
    );
    assert_eq!(
        engine.cash_balance(d("2026-01-08")).await.unwrap(),
        dec!(500)
    );
}

#[tokio::test]
async fn sales_return_is_bounded_and_restores_stock() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 100, dec!(10)))
        .await
        .unwrap();
    let sale = engine
        .create_sale(
            NewSale::new(customer, d("2026-01-08"), PaymentKind::Credit, 1).line(
                item,
                20,
                dec!(25),
            ),
        )
        .await
        .unwrap();
    let detail = engine::sales_details::Entity::find()
        .filter(engine::sales_details::Column::SaleId.eq(sale.sale_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    let err = engine
        .create_sales_return(NewSalesReturn::new(detail.detail_id, 21, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));

    engine
        .create_sales_return(NewSalesReturn::new(detail.detail_id, 5, 1))
        .await
        .unwrap();

    let detail = engine::sales_details::Entity::find_by_id(detail.detail_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.quantity, 15);
    assert_eq!(detail.line_total, dec!(375));

    assert_eq!(
        engine.quantity_on_hand(item, d("2026-01-08")).await.unwrap(),
        85
    );
    assert_eq!(
        engine
            .party_balance(Party::Customer(customer), d("2026-01-08"))
            .await
            .unwrap(),
        dec!(375)
    );
}

#[tokio::test]
async fn sales_return_comes_back_at_current_average() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 10, dec!(10)))
        .await
        .unwrap();
    let sale = engine
        .create_sale(
            NewSale::new(customer, d("2026-01-08"), PaymentKind::Credit, 1).line(item, 4, dec!(25)),
        )
        .await
        .unwrap();
    // A later, dearer lot moves the average: 6 on hand at 10 plus 10 at 42
    // makes 480 over 16, an average of 30.
    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-09"), 1).line(item, 10, dec!(42)))
        .await
        .unwrap();
    assert_eq!(engine.average_cost(item).await.unwrap(), Some(dec!(30)));

    let detail = engine::sales_details::Entity::find()
        .filter(engine::sales_details::Column::SaleId.eq(sale.sale_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    engine
        .create_sales_return(NewSalesReturn::new(detail.detail_id, 2, 1))
        .await
        .unwrap();

    // The returned stock arrives at today's average, not the sale-time cost.
    let movement = engine::stock_movements::Entity::find()
        .filter(engine::stock_movements::Column::ReferenceType.eq("sales return"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(movement.unit_price, dec!(30));
    assert_eq!(movement.quantity, 2);
}

#[tokio::test]
async fn average_cost_ignores_same_day_posting_order() {
    let (engine, db) = engine_with_db().await;
    let first = create_item(&db, "Onion Bulk", dec!(14)).await;
    let second = create_item(&db, "Garlic Bulk", dec!(14)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(first, 100, dec!(10)))
        .await
        .unwrap();
    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(first, 50, dec!(16)))
        .await
        .unwrap();

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(second, 50, dec!(16)))
        .await
        .unwrap();
    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(second, 100, dec!(10)))
        .await
        .unwrap();

    // Same two lots on the same day, either order: 1800 over 150.
    assert_eq!(engine.average_cost(first).await.unwrap(), Some(dec!(12)));
    assert_eq!(
        engine.average_cost(first).await.unwrap(),
        engine.average_cost(second).await.unwrap()
    );
}

#[tokio::test]
async fn delete_sale_line_offsets_everything() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let customer = create_customer(&db, "Corner Shop").await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 100, dec!(10)))
        .await
        .unwrap();
    let sale = engine
        .create_sale(
            NewSale::new(customer, d("2026-01-08"), PaymentKind::Credit, 1).line(
                item,
                20,
                dec!(25),
            ),
        )
        .await
        .unwrap();
    let detail = engine::sales_details::Entity::find()
        .filter(engine::sales_details::Column::SaleId.eq(sale.sale_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    engine.delete_sale_line(detail.detail_id).await.unwrap();

    assert_eq!(
        engine.quantity_on_hand(item, d("2026-01-08")).await.unwrap(),
        100
    );
    assert_eq!(
        engine
            .party_balance(Party::Customer(customer), d("2026-01-08"))
            .await
            .unwrap(),
        dec!(0)
    );

    let detail = engine::sales_details::Entity::find_by_id(detail.detail_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.quantity, 0);
    assert_eq!(detail.line_total, dec!(0));
    let master = engine::sales_masters::Entity::find_by_id(sale.sale_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(master.total_amount, dec!(0));
}

#[tokio::test]
async fn wastage_values_loss_at_sell_price() {
    let (engine, db) = engine_with_db().await;
    let item = create_item(&db, "Potato Grade A", dec!(25)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(item, 50, dec!(10)))
        .await
        .unwrap();

    let wastage = engine
        .create_wastage(NewWastage::new(item, 8, d("2026-01-09"), 1))
        .await
        .unwrap();
    assert_eq!(wastage.net_loss, dec!(200));
    assert_eq!(
        engine.quantity_on_hand(item, d("2026-01-09")).await.unwrap(),
        42
    );
    // Book loss only: the till is untouched.
    assert_eq!(engine.cash_balance(d("2026-01-09")).await.unwrap(), dec!(0));

    let err = engine
        .create_wastage(NewWastage::new(item, 100, d("2026-01-09"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));
}

#[tokio::test]
async fn adjustment_values_each_leg_at_its_own_cost() {
    let (engine, db) = engine_with_db().await;
    let potato = create_item(&db, "Potato Grade A", dec!(25)).await;
    let onion = create_item(&db, "Onion Grade A", dec!(18)).await;
    let vendor = create_vendor(&db, "Field Co").await;

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-05"), 1).line(potato, 50, dec!(10)))
        .await
        .unwrap();

    // The target has no cost basis yet.
    let err = engine
        .create_stock_adjustment(NewStockAdjustment::new(potato, onion, 10, d("2026-01-09"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingCostBasis(_)));

    engine
        .create_purchase(NewPurchase::new(vendor, d("2026-01-06"), 1).line(onion, 30, dec!(6)))
        .await
        .unwrap();
    let adjustment = engine
        .create_stock_adjustment(NewStockAdjustment::new(potato, onion, 10, d("2026-01-09"), 1))
        .await
        .unwrap();

    assert_eq!(
        engine
            .quantity_on_hand(potato, d("2026-01-09"))
            .await
            .unwrap(),
        40
    );
    assert_eq!(
        engine
            .quantity_on_hand(onion, d("2026-01-09"))
            .await
            .unwrap(),
        40
    );

    let movements = engine::stock_movements::Entity::find()
        .filter(engine::stock_movements::Column::ReferenceId.eq(adjustment.adjustment_id))
        .filter(engine::stock_movements::Column::ReferenceType.eq("adjustment"))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(movements.len(), 2);
    let out = movements.iter().find(|m| m.quantity < 0).unwrap();
    let inb = movements.iter().find(|m| m.quantity > 0).unwrap();
    assert_eq!(out.unit_price, dec!(10));
    assert_eq!(inb.unit_price, dec!(6));
}

#[tokio::test]
async fn amend_cash_transaction_keeps_history() {
    let (engine, db) = engine_with_db().await;

    let original = engine
        .record_cash_transaction(NewCashTransaction::new(
            CashTransactionKind::Received,
            dec!(100),
            d("2026-01-10"),
            1,
        ))
        .await
        .unwrap();

    engine
        .amend_cash_transaction(
            original.transaction_id,
            NewCashTransaction::new(CashTransactionKind::Received, dec!(80), d("2026-01-10"), 1),
        )
        .await
        .unwrap();

    assert_eq!(
        engine.cash_balance(d("2026-01-10")).await.unwrap(),
        dec!(80)
    );
    // Original, reversal and replacement all remain on the ledger.
    let rows = engine::cash_transactions::Entity::find()
        .all(&db)
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn contra_moves_money_between_tills() {
    let (engine, db) = engine_with_db().await;
    let bank = create_bank_account(&db, "First Bank").await;

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
        .record_contra(NewContra::new(dec!(200), d("2026-01-10"), bank, true, 1))
        .await
        .unwrap();

    assert_eq!(
        engine.cash_balance(d("2026-01-10")).await.unwrap(),
        dec!(300)
    );
    assert_eq!(
        engine.bank_balance(bank, d("2026-01-10")).await.unwrap(),
        dec!(200)
    );
}

#[tokio::test]
async fn opening_balance_is_unique_per_scope() {
    let (engine, db) = engine_with_db().await;
    let customer = create_customer(&db, "Corner Shop").await;

    engine
        .create_opening_balance(NewOpeningBalance::cash(
            dec!(500),
            BalanceKind::Debit,
            d("2026-01-01"),
            1,
        ))
        .await
        .unwrap();
    let err = engine
        .create_opening_balance(NewOpeningBalance::cash(
            dec!(100),
            BalanceKind::Debit,
            d("2026-01-01"),
            1,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    // A different scope is still free.
    engine
        .create_opening_balance(
            NewOpeningBalance::cash(dec!(100), BalanceKind::Debit, d("2026-01-01"), 1)
                .customer_id(customer),
        )
        .await
        .unwrap();
    assert_eq!(
        engine
            .party_balance(Party::Customer(customer), d("2026-01-01"))
            .await
            .unwrap(),
        dec!(100)
    );
}

#[tokio::test]
async fn loan_disburses_into_the_till() {
    let (engine, _db) = engine_with_db().await;

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
    assert_eq!(
        engine.cash_balance(d("2026-01-03")).await.unwrap(),
        dec!(1000)
    );

    let err = engine
        .create_loan(NewLoan::new(
            "Someone Else",
            "ravi-2026",
            dec!(500),
            d("2026-01-04"),
            1,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn expense_is_a_book_entry_only() {
    let (engine, db) = engine_with_db().await;
    let head = create_account_head(&db, "Electricity").await;

    engine
        .record_expense(NewExpense::new(head, dec!(120), d("2026-01-15"), 1))
        .await
        .unwrap();
    assert_eq!(engine.cash_balance(d("2026-01-15")).await.unwrap(), dec!(0));

    let err = engine
        .record_expense(NewExpense::new(head + 99, dec!(10), d("2026-01-15"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}
