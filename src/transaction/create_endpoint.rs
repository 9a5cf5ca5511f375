//! The route handler for creating transactions.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::{TransactionForm, TransactionStore, store::run_store_operation},
};

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the new transaction's ID on success.
pub async fn create_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    form: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Response, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let Json(form) = form.map_err(|rejection| Error::InvalidJson(rejection.body_text()))?;
    let transaction = form.validate()?;

    let transaction_type = transaction.transaction_type;
    let id = run_store_operation(&state.transaction_store, move |store| {
        store.create(&transaction)
    })
    .await?;
    tracing::info!("Created {transaction_type} transaction {id}");

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}
