//! The errors the engine can raise.
//!
//! Every ledger-affecting error aborts the enclosing database transaction and
//! propagates unmodified to the caller; the engine never retries or recovers
//! locally. The calling layer translates these into transport responses.
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A referenced item, master, or detail row does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Negative resulting stock, a zero/negative quantity, or a return
    /// exceeding the sold quantity.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    /// An outbound movement was attempted against an item with no recorded
    /// average cost (no inbound movement exists yet).
    #[error("missing cost basis: {0}")]
    MissingCostBasis(String),
    /// A malformed business payload that survived shape validation.
    #[error("validation failed: {0}")]
    Validation(String),
    /// A row already exists for the same scope.
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidQuantity(a), Self::InvalidQuantity(b)) => a == b,
            (Self::MissingCostBasis(a), Self::MissingCostBasis(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
