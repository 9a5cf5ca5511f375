use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    transaction::{TransactionStore, core::parse_transaction_id, store::run_store_operation},
};

/// A route handler for deleting a transaction, responds with 204 and no body on success.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let Path(transaction_id) =
        path.map_err(|rejection| Error::InvalidPath(rejection.body_text()))?;
    let transaction_id = parse_transaction_id(&transaction_id)?;

    let rows_affected =
        run_store_operation(&state.transaction_store, move |store| store.delete(transaction_id))
            .await?;

    match rows_affected {
        0 => Err(Error::TransactionNotFound(transaction_id)),
        _ => {
            tracing::info!("Deleted transaction {transaction_id}");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
