//! Transaction management for the transaction tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `TransactionType` enum
//! - The `TransactionStore` trait and its SQLite implementation
//! - Request validation and the JSON route handlers

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod list_endpoint;
mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{NewTransaction, Transaction, TransactionType, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use form::TransactionForm;
pub use list_endpoint::{list_transactions_by_type_endpoint, list_transactions_endpoint};
pub use store::{RowsAffected, SQLiteTransactionStore, TransactionStore};
