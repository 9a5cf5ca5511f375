use std::{
    sync::{
        Arc, Mutex,
        mpsc::{Receiver, RecvTimeoutError},
    },
    time::Duration,
};

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState, Error, TransactionId, build_router, initialize_db,
    transaction::{
        NewTransaction, RowsAffected, SQLiteTransactionStore, Transaction, TransactionStore,
    },
};

/// Create a test server backed by an in-memory database, along with a handle
/// to the same store for setting up and checking rows.
pub fn get_test_server() -> (TestServer, SQLiteTransactionStore) {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize_db(&connection).expect("Could not initialize database");
    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)));

    let app = build_router(AppState::new(store.clone()));
    let server = TestServer::try_new(app).expect("Could not create test server.");

    (server, store)
}

/// Create a test server whose store fails every operation.
pub fn get_failing_test_server() -> TestServer {
    let app = build_router(AppState::new(FailingTransactionStore));

    TestServer::try_new(app).expect("Could not create test server.")
}

#[track_caller]
pub fn create_test_transaction(
    store: &SQLiteTransactionStore,
    transaction_type: &str,
    description: &str,
    amount: f64,
) -> Transaction {
    let transaction = NewTransaction {
        transaction_type: transaction_type
            .parse()
            .expect("Could not parse test transaction type"),
        description: description.to_owned(),
        date: "2024-01-01".to_owned(),
        amount,
    };

    let id = store
        .create(&transaction)
        .expect("Could not create test transaction");

    transaction.with_id(id)
}

/// A store that acts as if the database has become unavailable.
#[derive(Debug, Clone)]
pub struct FailingTransactionStore;

fn database_is_locked() -> Error {
    Error::QueryError("database is locked".to_owned())
}

impl TransactionStore for FailingTransactionStore {
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        Err(database_is_locked())
    }

    fn get_by_type(&self, _: &str) -> Result<Vec<Transaction>, Error> {
        Err(database_is_locked())
    }

    fn create(&self, _: &NewTransaction) -> Result<TransactionId, Error> {
        Err(Error::IdentityError("no row returned".to_owned()))
    }

    fn update(&self, _: TransactionId, _: &NewTransaction) -> Result<RowsAffected, Error> {
        Err(database_is_locked())
    }

    fn delete(&self, _: TransactionId) -> Result<RowsAffected, Error> {
        Err(database_is_locked())
    }
}

/// A store whose `get_all` waits for a message on `release` before answering.
///
/// Gives up with a query error after two seconds so a test that never sends
/// the message fails instead of hanging.
#[derive(Debug, Clone)]
pub struct GatedTransactionStore {
    release: Arc<Mutex<Receiver<()>>>,
}

impl GatedTransactionStore {
    pub fn new(release: Receiver<()>) -> Self {
        Self {
            release: Arc::new(Mutex::new(release)),
        }
    }
}

impl TransactionStore for GatedTransactionStore {
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let release = self.release.lock().map_err(|_| Error::DatabaseLockError)?;

        match release.recv_timeout(Duration::from_secs(2)) {
            Ok(()) => Ok(Vec::new()),
            Err(RecvTimeoutError::Timeout) => {
                Err(Error::QueryError("timed out waiting for release".to_owned()))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::QueryError("release sender dropped".to_owned()))
            }
        }
    }

    fn get_by_type(&self, _: &str) -> Result<Vec<Transaction>, Error> {
        Err(database_is_locked())
    }

    fn create(&self, _: &NewTransaction) -> Result<TransactionId, Error> {
        Err(database_is_locked())
    }

    fn update(&self, _: TransactionId, _: &NewTransaction) -> Result<RowsAffected, Error> {
        Err(database_is_locked())
    }

    fn delete(&self, _: TransactionId) -> Result<RowsAffected, Error> {
        Err(database_is_locked())
    }
}
