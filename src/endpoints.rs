//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{type_or_id}', use [format_endpoint].

/// The route to list all transactions or create a new one.
pub const TRANSACTIONS: &str = "/transactions";

/// The route for a single transaction type or a single transaction.
///
/// `GET` interprets the parameter as a transaction type, while `PUT` and
/// `DELETE` interpret it as a transaction ID. The router cannot hold two
/// differently named parameters on the same path segment, hence the shared
/// name.
pub const TRANSACTION: &str = "/transactions/{type_or_id}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// If `endpoint_path` has no parameter, it is returned unchanged.
///
/// # Examples
///
/// ```
/// use transaction_tracker::endpoints::{TRANSACTION, format_endpoint};
///
/// assert_eq!(format_endpoint(TRANSACTION, "income"), "/transactions/income");
/// assert_eq!(format_endpoint(TRANSACTION, 42), "/transactions/42");
/// ```
pub fn format_endpoint(endpoint_path: &str, value: impl std::fmt::Display) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(index) => index,
        None => return endpoint_path.to_owned(),
    };

    let param_end = match endpoint_path[param_start..].find('}') {
        Some(offset) => param_start + offset + 1,
        None => return endpoint_path.to_owned(),
    };

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
