//! The financial ledgers: cash/bank entries, party subledger postings,
//! opening balances and the balance folds built on them.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};

use crate::cash_transactions::{self, CashTransactionKind};
use crate::commands::{NewCashTransaction, NewContra, NewOpeningBalance, Party};
use crate::opening_balances::{self, BalanceKind};
use crate::party_transactions::{self, PartyReference};
use crate::{EngineError, ResultEngine, bank_accounts, customers, vendors};

use super::{Engine, normalize_optional_text, with_tx};

/// Post one row to the party subledger. The only write path into it.
pub(super) async fn append_party_movement<C: ConnectionTrait>(
    db: &C,
    transaction_date: Date,
    amount: Decimal,
    reference: PartyReference,
    reference_id: Option<i32>,
    customer_id: Option<i32>,
    vendor_id: Option<i32>,
    narration: Option<String>,
    actor: i32,
) -> ResultEngine<party_transactions::Model> {
    let row = party_transactions::ActiveModel {
        transaction_date: ActiveValue::Set(transaction_date),
        amount: ActiveValue::Set(amount),
        reference_type: ActiveValue::Set(reference.as_str().to_string()),
        reference_id: ActiveValue::Set(reference_id),
        customer_id: ActiveValue::Set(customer_id),
        vendor_id: ActiveValue::Set(vendor_id),
        narration: ActiveValue::Set(narration),
        created_by: ActiveValue::Set(actor),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

pub(super) async fn require_customer<C: ConnectionTrait>(
    db: &C,
    customer_id: i32,
) -> ResultEngine<customers::Model> {
    customers::Entity::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("customer {customer_id}")))
}

pub(super) async fn require_vendor<C: ConnectionTrait>(
    db: &C,
    vendor_id: i32,
) -> ResultEngine<vendors::Model> {
    vendors::Entity::find_by_id(vendor_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("vendor {vendor_id}")))
}

async fn require_bank_account<C: ConnectionTrait>(
    db: &C,
    bank_account_id: i32,
) -> ResultEngine<bank_accounts::Model> {
    bank_accounts::Entity::find_by_id(bank_account_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("bank account {bank_account_id}")))
}

fn opening_sign(balance_type: &str) -> ResultEngine<Decimal> {
    match BalanceKind::try_from(balance_type)? {
        BalanceKind::Debit => Ok(Decimal::ONE),
        BalanceKind::Credit => Ok(Decimal::NEGATIVE_ONE),
    }
}

/// Fold a set of cash ledger rows: receipts add, payments subtract, contra
/// rows carry their own sign.
fn fold_cash_rows(rows: &[cash_transactions::Model]) -> ResultEngine<Decimal> {
    let mut total = Decimal::ZERO;
    for row in rows {
        match CashTransactionKind::try_from(row.transaction_type.as_str())? {
            CashTransactionKind::Received => total += row.amount,
            CashTransactionKind::Payment => total -= row.amount,
            CashTransactionKind::Contra => total += row.amount,
        }
    }
    Ok(total)
}

/// Cash drawer balance from opening balances plus movements up to `cutoff`
/// (exclusive unless `inclusive`).
pub(super) async fn cash_balance_fold<C: ConnectionTrait>(
    db: &C,
    cutoff: Date,
    inclusive: bool,
) -> ResultEngine<Decimal> {
    let openings = opening_balances::Entity::find()
        .filter(opening_balances::Column::IsCash.eq(true))
        .all(db)
        .await?;
    let mut total = Decimal::ZERO;
    for opening in &openings {
        total += opening.amount * opening_sign(&opening.balance_type)?;
    }

    let mut query = cash_transactions::Entity::find()
        .filter(cash_transactions::Column::IsCash.eq(true));
    query = if inclusive {
        query.filter(cash_transactions::Column::TransactionDate.lte(cutoff))
    } else {
        query.filter(cash_transactions::Column::TransactionDate.lt(cutoff))
    };
    let rows = query.all(db).await?;
    Ok(total + fold_cash_rows(&rows)?)
}

async fn bank_balance_fold<C: ConnectionTrait>(
    db: &C,
    bank_account_id: i32,
    cutoff: Date,
    inclusive: bool,
) -> ResultEngine<Decimal> {
    let openings = opening_balances::Entity::find()
        .filter(opening_balances::Column::BankAccountId.eq(bank_account_id))
        .all(db)
        .await?;
    let mut total = Decimal::ZERO;
    for opening in &openings {
        total += opening.amount * opening_sign(&opening.balance_type)?;
    }

    let mut query = cash_transactions::Entity::find()
        .filter(cash_transactions::Column::IsCash.eq(false))
        .filter(cash_transactions::Column::BankAccountId.eq(bank_account_id));
    query = if inclusive {
        query.filter(cash_transactions::Column::TransactionDate.lte(cutoff))
    } else {
        query.filter(cash_transactions::Column::TransactionDate.lt(cutoff))
    };
    let rows = query.all(db).await?;
    Ok(total + fold_cash_rows(&rows)?)
}

/// Party balance: openings plus the signed fold of subledger rows up to
/// `cutoff`. Positive means the party owes the business.
pub(super) async fn party_balance_fold<C: ConnectionTrait>(
    db: &C,
    party: Party,
    cutoff: Date,
    inclusive: bool,
) -> ResultEngine<Decimal> {
    let mut opening_query = opening_balances::Entity::find();
    let mut row_query = party_transactions::Entity::find();
    match party {
        Party::Customer(id) => {
            opening_query = opening_query.filter(opening_balances::Column::CustomerId.eq(id));
            row_query = row_query.filter(party_transactions::Column::CustomerId.eq(id));
        }
        Party::Vendor(id) => {
            opening_query = opening_query.filter(opening_balances::Column::VendorId.eq(id));
            row_query = row_query.filter(party_transactions::Column::VendorId.eq(id));
        }
    }

    let mut total = Decimal::ZERO;
    for opening in &opening_query.all(db).await? {
        total += opening.amount * opening_sign(&opening.balance_type)?;
    }

    row_query = if inclusive {
        row_query.filter(party_transactions::Column::TransactionDate.lte(cutoff))
    } else {
        row_query.filter(party_transactions::Column::TransactionDate.lt(cutoff))
    };
    for row in &row_query.all(db).await? {
        total += row.amount;
    }
    Ok(total)
}

/// Insert one cash ledger row, plus the mirroring party subledger row when
/// the entry settles against a customer or vendor.
pub(super) async fn post_cash_entry<C: ConnectionTrait>(
    db: &C,
    kind: CashTransactionKind,
    amount: Decimal,
    transaction_date: Date,
    is_cash: bool,
    bank_account_id: Option<i32>,
    customer_id: Option<i32>,
    vendor_id: Option<i32>,
    account_head_id: Option<i32>,
    narration: Option<String>,
    actor: i32,
) -> ResultEngine<cash_transactions::Model> {
    let row = cash_transactions::ActiveModel {
        transaction_date: ActiveValue::Set(transaction_date),
        transaction_type: ActiveValue::Set(kind.as_str().to_string()),
        amount: ActiveValue::Set(amount),
        is_cash: ActiveValue::Set(is_cash),
        bank_account_id: ActiveValue::Set(bank_account_id),
        customer_id: ActiveValue::Set(customer_id),
        vendor_id: ActiveValue::Set(vendor_id),
        account_head_id: ActiveValue::Set(account_head_id),
        narration: ActiveValue::Set(narration),
        created_by: ActiveValue::Set(actor),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    };
    let inserted = row.insert(db).await?;

    if customer_id.is_some() || vendor_id.is_some() {
        // Money received settles the party's debt; money paid raises it.
        let signed = match kind {
            CashTransactionKind::Received => -amount,
            CashTransactionKind::Payment => amount,
            CashTransactionKind::Contra => {
                return Err(EngineError::Validation(
                    "contra entries cannot reference a party".to_string(),
                ));
            }
        };
        append_party_movement(
            db,
            transaction_date,
            signed,
            PartyReference::Payment,
            Some(inserted.transaction_id),
            customer_id,
            vendor_id,
            None,
            actor,
        )
        .await?;
    }

    Ok(inserted)
}

fn validate_cash_command(cmd: &NewCashTransaction) -> ResultEngine<()> {
    if cmd.amount <= Decimal::ZERO {
        return Err(EngineError::Validation(format!(
            "amount must be positive, got {}",
            cmd.amount
        )));
    }
    if cmd.kind == CashTransactionKind::Contra {
        return Err(EngineError::Validation(
            "contra entries are posted through record_contra".to_string(),
        ));
    }
    if !cmd.is_cash && cmd.bank_account_id.is_none() {
        return Err(EngineError::Validation(
            "bank entries require a bank account".to_string(),
        ));
    }
    if cmd.customer_id.is_some() && cmd.vendor_id.is_some() {
        return Err(EngineError::Validation(
            "an entry settles against a customer or a vendor, not both".to_string(),
        ));
    }
    Ok(())
}

impl Engine {
    /// Post a receipt or payment to the cash/bank ledger. When the entry
    /// names a customer or vendor the party subledger is updated in the same
    /// transaction.
    pub async fn record_cash_transaction(
        &self,
        cmd: NewCashTransaction,
    ) -> ResultEngine<cash_transactions::Model> {
        validate_cash_command(&cmd)?;
        let NewCashTransaction {
            kind,
            amount,
            transaction_date,
            is_cash,
            bank_account_id,
            customer_id,
            vendor_id,
            account_head_id,
            narration,
            created_by,
        } = cmd;

        with_tx!(self, |db_tx| {
            if let Some(id) = bank_account_id {
                require_bank_account(&db_tx, id).await?;
            }
            if let Some(id) = customer_id {
                require_customer(&db_tx, id).await?;
            }
            if let Some(id) = vendor_id {
                require_vendor(&db_tx, id).await?;
            }

            let row = post_cash_entry(
                &db_tx,
                kind,
                amount,
                transaction_date,
                is_cash,
                bank_account_id,
                customer_id,
                vendor_id,
                account_head_id,
                normalize_optional_text(narration),
                created_by,
            )
            .await?;
            tracing::info!(
                transaction_id = row.transaction_id,
                kind = kind.as_str(),
                %amount,
                "cash transaction recorded"
            );
            Ok(row)
        })
    }

    /// Amend a receipt or payment without touching history: the original row
    /// stays, an offsetting row of the opposite kind cancels it, and a
    /// replacement row carries the corrected values. Party subledger rows are
    /// offset the same way. Contra entries cannot be amended.
    pub async fn amend_cash_transaction(
        &self,
        transaction_id: i32,
        cmd: NewCashTransaction,
    ) -> ResultEngine<cash_transactions::Model> {
        validate_cash_command(&cmd)?;
        let NewCashTransaction {
            kind,
            amount,
            transaction_date,
            is_cash,
            bank_account_id,
            customer_id,
            vendor_id,
            account_head_id,
            narration,
            created_by,
        } = cmd;

        with_tx!(self, |db_tx| {
            let original = cash_transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::NotFound(format!("cash transaction {transaction_id}"))
                })?;
            let original_kind =
                CashTransactionKind::try_from(original.transaction_type.as_str())?;
            let reversal_kind = original_kind.opposite().ok_or_else(|| {
                EngineError::Validation("contra entries cannot be amended".to_string())
            })?;

            if let Some(id) = bank_account_id {
                require_bank_account(&db_tx, id).await?;
            }
            if let Some(id) = customer_id {
                require_customer(&db_tx, id).await?;
            }
            if let Some(id) = vendor_id {
                require_vendor(&db_tx, id).await?;
            }

            post_cash_entry(
                &db_tx,
                reversal_kind,
                original.amount,
                transaction_date,
                original.is_cash,
                original.bank_account_id,
                original.customer_id,
                original.vendor_id,
                original.account_head_id,
                Some(format!("reversal of entry {transaction_id}")),
                created_by,
            )
            .await?;

            let replacement = post_cash_entry(
                &db_tx,
                kind,
                amount,
                transaction_date,
                is_cash,
                bank_account_id,
                customer_id,
                vendor_id,
                account_head_id,
                normalize_optional_text(narration),
                created_by,
            )
            .await?;
            tracing::info!(
                amended = transaction_id,
                replacement = replacement.transaction_id,
                "cash transaction amended"
            );
            Ok(replacement)
        })
    }

    /// Move money between the cash drawer and a bank account. Posts two
    /// signed contra rows, one per side, in a single transaction.
    pub async fn record_contra(
        &self,
        cmd: NewContra,
    ) -> ResultEngine<(cash_transactions::Model, cash_transactions::Model)> {
        let NewContra {
            amount,
            transaction_date,
            bank_account_id,
            to_bank,
            narration,
            created_by,
        } = cmd;
        if amount <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "amount must be positive, got {amount}"
            )));
        }

        let (cash_amount, bank_amount) = if to_bank {
            (-amount, amount)
        } else {
            (amount, -amount)
        };
        let narration = normalize_optional_text(narration);

        with_tx!(self, |db_tx| {
            require_bank_account(&db_tx, bank_account_id).await?;

            let cash_row = post_cash_entry(
                &db_tx,
                CashTransactionKind::Contra,
                cash_amount,
                transaction_date,
                true,
                None,
                None,
                None,
                None,
                narration.clone(),
                created_by,
            )
            .await?;
            let bank_row = post_cash_entry(
                &db_tx,
                CashTransactionKind::Contra,
                bank_amount,
                transaction_date,
                false,
                Some(bank_account_id),
                None,
                None,
                None,
                narration,
                created_by,
            )
            .await?;
            tracing::info!(
                cash_id = cash_row.transaction_id,
                bank_id = bank_row.transaction_id,
                %amount,
                to_bank,
                "contra recorded"
            );
            Ok((cash_row, bank_row))
        })
    }

    /// Lay down an opening balance. Each scope (cash drawer, a bank account,
    /// a customer, a vendor) takes at most one.
    pub async fn create_opening_balance(
        &self,
        cmd: NewOpeningBalance,
    ) -> ResultEngine<opening_balances::Model> {
        let NewOpeningBalance {
            amount,
            balance_type,
            as_of_date,
            is_cash,
            bank_account_id,
            customer_id,
            vendor_id,
            created_by,
        } = cmd;
        if amount < Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "opening balance must not be negative, got {amount}"
            )));
        }

        with_tx!(self, |db_tx| {
            let mut existing = opening_balances::Entity::find();
            let scope_label = if is_cash {
                existing = existing.filter(opening_balances::Column::IsCash.eq(true));
                "cash".to_string()
            } else if let Some(id) = bank_account_id {
                require_bank_account(&db_tx, id).await?;
                existing = existing.filter(opening_balances::Column::BankAccountId.eq(id));
                format!("bank account {id}")
            } else if let Some(id) = customer_id {
                require_customer(&db_tx, id).await?;
                existing = existing.filter(opening_balances::Column::CustomerId.eq(id));
                format!("customer {id}")
            } else if let Some(id) = vendor_id {
                require_vendor(&db_tx, id).await?;
                existing = existing.filter(opening_balances::Column::VendorId.eq(id));
                format!("vendor {id}")
            } else {
                return Err(EngineError::Validation(
                    "opening balance needs a scope".to_string(),
                ));
            };

            if existing.one(&db_tx).await?.is_some() {
                return Err(EngineError::ExistingKey(format!(
                    "opening balance for {scope_label}"
                )));
            }

            let row = opening_balances::ActiveModel {
                amount: ActiveValue::Set(amount),
                balance_type: ActiveValue::Set(balance_type.as_str().to_string()),
                as_of_date: ActiveValue::Set(as_of_date),
                is_cash: ActiveValue::Set(is_cash),
                bank_account_id: ActiveValue::Set(bank_account_id),
                customer_id: ActiveValue::Set(customer_id),
                vendor_id: ActiveValue::Set(vendor_id),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            Ok(row.insert(&db_tx).await?)
        })
    }

    /// Cash drawer balance at the end of `as_of`.
    pub async fn cash_balance(&self, as_of: Date) -> ResultEngine<Decimal> {
        cash_balance_fold(&self.database, as_of, true).await
    }

    /// Bank account balance at the end of `as_of`.
    pub async fn bank_balance(&self, bank_account_id: i32, as_of: Date) -> ResultEngine<Decimal> {
        require_bank_account(&self.database, bank_account_id).await?;
        bank_balance_fold(&self.database, bank_account_id, as_of, true).await
    }

    /// What a party owes the business (negative: what the business owes
    /// them) at the end of `as_of`.
    pub async fn party_balance(&self, party: Party, as_of: Date) -> ResultEngine<Decimal> {
        match party {
            Party::Customer(id) => {
                require_customer(&self.database, id).await?;
            }
            Party::Vendor(id) => {
                require_vendor(&self.database, id).await?;
            }
        }
        party_balance_fold(&self.database, party, as_of, true).await
    }
}
