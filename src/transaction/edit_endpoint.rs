//! The route handler for updating transactions.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::{
        TransactionForm, TransactionStore, core::parse_transaction_id,
        store::run_store_operation,
    },
};

/// A route handler for replacing the fields of an existing transaction.
///
/// The ID is taken from the path, never the body. Responds with 404 if no
/// transaction has the ID.
pub async fn edit_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    path: Result<Path<String>, PathRejection>,
    form: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Response, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let Path(transaction_id) =
        path.map_err(|rejection| Error::InvalidPath(rejection.body_text()))?;
    let transaction_id = parse_transaction_id(&transaction_id)?;
    let Json(form) = form.map_err(|rejection| Error::InvalidJson(rejection.body_text()))?;
    let transaction = form.validate()?;

    let rows_affected = run_store_operation(&state.transaction_store, move |store| {
        store.update(transaction_id, &transaction)
    })
    .await?;

    match rows_affected {
        0 => {
            tracing::debug!("Could not update transaction {transaction_id}: zero rows affected");
            Err(Error::TransactionNotFound(transaction_id))
        }
        _ => Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Transaction updated successfully",
                "id": transaction_id
            })),
        )
            .into_response()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        Transaction, TransactionStore, TransactionType,
        endpoints::{self, format_endpoint},
        transaction::test_utils::{create_test_transaction, get_failing_test_server, get_test_server},
    };

    fn refund_body() -> serde_json::Value {
        json!({
            "type": "INCOME",
            "description": "Refund",
            "date": "2024-01-02",
            "amount": 4.5
        })
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let (server, store) = get_test_server();
        let coffee = create_test_transaction(&store, "expense", "Coffee", 4.5);

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, coffee.id))
            .json(&refund_body())
            .await;

        response.assert_status(StatusCode::OK);
        response.assert_json(&json!({
            "message": "Transaction updated successfully",
            "id": coffee.id
        }));
        assert_eq!(
            store.get_all().unwrap(),
            vec![Transaction {
                id: coffee.id,
                transaction_type: TransactionType::Income,
                description: "Refund".to_owned(),
                date: "2024-01-02".to_owned(),
                amount: 4.5,
            }]
        );
    }

    #[tokio::test]
    async fn update_uses_id_from_path() {
        let (server, store) = get_test_server();
        let first = create_test_transaction(&store, "expense", "Coffee", 4.5);
        let second = create_test_transaction(&store, "expense", "Tea", 3.5);
        let mut body = refund_body();
        body["id"] = json!(first.id);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, second.id))
            .json(&body)
            .await
            .assert_status(StatusCode::OK);

        let transactions = store.get_all().unwrap();
        assert_eq!(transactions[0], first);
        assert_eq!(transactions[1].description, "Refund");
    }

    #[tokio::test]
    async fn update_missing_transaction_is_not_found() {
        let (server, store) = get_test_server();
        let existing = create_test_transaction(&store, "expense", "Coffee", 4.5);

        for _ in 0..2 {
            let response = server
                .put(&format_endpoint(endpoints::TRANSACTION, existing.id + 1))
                .json(&refund_body())
                .await;

            response.assert_status(StatusCode::NOT_FOUND);
            response.assert_json(&json!({ "message": "Transaction not found" }));
        }

        assert_eq!(store.get_all().unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn update_rejects_invalid_fields() {
        let (server, store) = get_test_server();
        let existing = create_test_transaction(&store, "expense", "Coffee", 4.5);
        let bodies = [
            json!({ "type": "expense", "description": "", "date": "2024-01-02", "amount": 1.0 }),
            json!({ "type": "expense", "description": "Tea", "date": "", "amount": 1.0 }),
            json!({ "type": "", "description": "Tea", "date": "2024-01-02", "amount": 1.0 }),
            json!({ "type": "expense", "description": "Tea", "date": "2024-01-02", "amount": 0 }),
            json!({ "type": "gift", "description": "Tea", "date": "2024-01-02", "amount": 1.0 }),
        ];

        for body in bodies {
            server
                .put(&format_endpoint(endpoints::TRANSACTION, existing.id))
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        assert_eq!(store.get_all().unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn update_rejects_malformed_json() {
        let (server, store) = get_test_server();
        let existing = create_test_transaction(&store, "expense", "Coffee", 4.5);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, existing.id))
            .text("not json")
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert_eq!(store.get_all().unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn update_rejects_non_integer_id() {
        let (server, _) = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, "abc"))
            .json(&refund_body())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Invalid transaction ID: abc" }));
    }

    #[tokio::test]
    async fn update_with_invalid_utf8_path_is_json_bad_request() {
        let (server, _) = get_test_server();

        let response = server.put("/transactions/%FF").json(&refund_body()).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Invalid URL: Invalid UTF-8 in `type_or_id`" }));
    }

    #[tokio::test]
    async fn update_store_failure_is_internal_server_error() {
        let server = get_failing_test_server();

        server
            .put(&format_endpoint(endpoints::TRANSACTION, 1))
            .json(&refund_body())
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
