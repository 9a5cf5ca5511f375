//! Route handlers for listing transactions.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionStore, store::run_store_operation},
};

/// A route handler that returns every transaction as a JSON array.
///
/// An empty table gives an empty array.
pub async fn list_transactions_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let transactions =
        run_store_operation(&state.transaction_store, |store| store.get_all()).await?;
    tracing::debug!("Listing {} transactions", transactions.len());

    Ok(Json(transactions))
}

/// A route handler that returns the transactions of one type as a JSON array.
///
/// The type in the path is matched case-insensitively. Responds with 404 if
/// there are no matching transactions.
pub async fn list_transactions_by_type_endpoint<T>(
    State(state): State<AppState<T>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let Path(transaction_type) =
        path.map_err(|rejection| Error::InvalidPath(rejection.body_text()))?;
    let transaction_type = transaction_type.to_lowercase();

    let query_type = transaction_type.clone();
    let transactions = run_store_operation(&state.transaction_store, move |store| {
        store.get_by_type(&query_type)
    })
    .await?;

    if transactions.is_empty() {
        return Err(Error::NoTransactionsOfType(transaction_type));
    }

    Ok(Json(transactions))
}
