//! Atomic multi-row writes
//!
//! Order creation, order deletion and book writes touch several rows. They
//! run through [`atomically`], which commits when the work succeeds and rolls
//! the whole write set back otherwise.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, TransactionError,
    TransactionTrait,
};

use crate::domain::DomainError;
use crate::models::{book, book_order, category, customer};

pub type TxFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, DomainError>> + Send + 'c>>;

/// Run `work` in its own transaction.
///
/// Caller-side failures (`Validation`, `ConstraintViolation`, `NotFound`)
/// come back unchanged after the rollback so they can still be told apart
/// from server faults. Storage errors become `TransactionFailure`.
pub async fn atomically<T, F>(
    db: &DatabaseConnection,
    label: &'static str,
    work: F,
) -> Result<T, DomainError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxFuture<'c, T> + Send,
    T: Send,
{
    match db.transaction::<F, T, DomainError>(work).await {
        Ok(value) => Ok(value),
        Err(TransactionError::Connection(e)) => {
            tracing::warn!("{}: transaction could not complete: {}", label, e);
            Err(DomainError::TransactionFailure(e.to_string()))
        }
        Err(TransactionError::Transaction(e)) => {
            tracing::warn!("{}: rolled back: {}", label, e);
            Err(match e {
                DomainError::Database(msg) => DomainError::TransactionFailure(msg),
                other => other,
            })
        }
    }
}

pub(crate) async fn require_category<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<category::Model, DomainError> {
    category::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::ConstraintViolation(format!("category {} does not exist", id)))
}

pub(crate) async fn require_customer<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<customer::Model, DomainError> {
    customer::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::ConstraintViolation(format!("customer {} does not exist", id)))
}

pub(crate) async fn require_book<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<book::Model, DomainError> {
    book::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::ConstraintViolation(format!("book {} does not exist", id)))
}

pub(crate) async fn require_order<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<book_order::Model, DomainError> {
    book_order::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::ConstraintViolation(format!("order {} does not exist", id)))
}
