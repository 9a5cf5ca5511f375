//! Defines the transaction store trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::core::{NewTransaction, Transaction, map_transaction_row},
};

/// The number of rows changed by a write statement.
pub type RowsAffected = usize;

/// Handles the creation, retrieval, modification and removal of transactions.
///
/// Implementers do not validate business rules such as the amount being
/// positive, that is the job of the caller.
pub trait TransactionStore {
    /// Retrieve every transaction in the order the store keeps them.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions whose type is exactly `transaction_type`.
    ///
    /// The caller is responsible for normalising case. An empty list is not
    /// an error.
    fn get_by_type(&self, transaction_type: &str) -> Result<Vec<Transaction>, Error>;

    /// Add a new transaction to the store and return its newly assigned ID.
    fn create(&self, transaction: &NewTransaction) -> Result<TransactionId, Error>;

    /// Replace every field except the ID of the transaction `id`.
    ///
    /// Returns zero if there is no such transaction.
    fn update(
        &self,
        id: TransactionId,
        transaction: &NewTransaction,
    ) -> Result<RowsAffected, Error>;

    /// Permanently remove the transaction `id`.
    ///
    /// Returns zero if there is no such transaction.
    fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error>;
}

/// Run `operation` against a clone of `store` on tokio's blocking thread pool.
///
/// Store implementations are synchronous, so handlers go through this to keep
/// slow queries and lock waits off the async worker threads.
///
/// # Errors
/// Returns the operation's own error, or [Error::StoreTaskFailed] if the
/// blocking task panicked or was cancelled.
pub(crate) async fn run_store_operation<T, F, R>(store: &T, operation: F) -> Result<R, Error>
where
    T: TransactionStore + Clone + Send + 'static,
    F: FnOnce(&T) -> Result<R, Error> + Send + 'static,
    R: Send + 'static,
{
    let store = store.clone();

    tokio::task::spawn_blocking(move || operation(&store))
        .await
        .map_err(|error| {
            tracing::error!("Store task did not complete: {error}");
            Error::StoreTaskFailed(error.to_string())
        })?
}

/// Stores transactions in a SQLite database.
///
/// The tables must have been created with [initialize_db](crate::initialize_db)
/// before the store is used.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Retrieve all transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::QueryError] if the query fails or a
    /// row cannot be decoded.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        let transactions = connection
            .prepare("SELECT id, type, description, date, amount FROM transactions")?
            .query_map([], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Retrieve the transactions in the database with the type `transaction_type`.
    ///
    /// # Errors
    /// This function will return a [Error::QueryError] if the query fails or a
    /// row cannot be decoded.
    fn get_by_type(&self, transaction_type: &str) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        let transactions = connection
            .prepare(
                "SELECT id, type, description, date, amount FROM transactions WHERE type = ?1",
            )?
            .query_map([transaction_type], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Insert a new transaction into the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::IdentityError] if the row was inserted but no ID was returned,
    /// - or [Error::QueryError] if there is some other SQL error.
    fn create(&self, transaction: &NewTransaction) -> Result<TransactionId, Error> {
        let connection = self.lock()?;

        connection
            .prepare(
                "INSERT INTO transactions (type, description, date, amount)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id",
            )?
            .query_row(
                params![
                    transaction.transaction_type,
                    transaction.description,
                    transaction.date,
                    transaction.amount,
                ],
                |row| row.get(0),
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::IdentityError(error.to_string()),
                rusqlite::Error::InvalidColumnType(..) => {
                    Error::IdentityError(error.to_string())
                }
                error => error.into(),
            })
    }

    /// Update the transaction `id` in the database.
    ///
    /// # Errors
    /// This function will return a [Error::QueryError] if there is an SQL error.
    fn update(
        &self,
        id: TransactionId,
        transaction: &NewTransaction,
    ) -> Result<RowsAffected, Error> {
        let connection = self.lock()?;

        connection
            .execute(
                "UPDATE transactions \
                SET \
                    type = ?1, \
                    description = ?2, \
                    date = ?3, \
                    amount = ?4 \
                WHERE id = ?5;",
                params![
                    transaction.transaction_type,
                    transaction.description,
                    transaction.date,
                    transaction.amount,
                    id,
                ],
            )
            .map_err(Error::from)
    }

    /// Delete the transaction `id` from the database.
    ///
    /// # Errors
    /// This function will return a [Error::QueryError] if there is an SQL error.
    fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error> {
        let connection = self.lock()?;

        connection
            .execute("DELETE FROM transactions WHERE id = ?1", [id])
            .map_err(Error::from)
    }
}
