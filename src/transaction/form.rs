//! The request body for creating and updating transactions.

use serde::Deserialize;

use crate::{
    Error,
    transaction::core::{NewTransaction, TransactionType},
};

/// A transaction as sent by the client, before validation.
///
/// Missing fields default to empty strings and a zero amount so that they are
/// reported by [TransactionForm::validate] rather than the JSON parser. Any
/// `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    /// "income" or "expense", in any case.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// What the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: String,
    /// How much money was earned or spent.
    pub amount: f64,
}

impl TransactionForm {
    /// Check the form and normalise the transaction type to lowercase.
    ///
    /// The completeness of the fields is checked before the transaction type.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::MissingFields] if any string field is empty or the amount is not positive,
    /// - or [Error::InvalidTransactionType] if the type is not "income" or "expense".
    pub fn validate(self) -> Result<NewTransaction, Error> {
        if self.transaction_type.is_empty()
            || self.description.is_empty()
            || self.date.is_empty()
            || self.amount <= 0.0
        {
            return Err(Error::MissingFields);
        }

        let transaction_type: TransactionType = self.transaction_type.parse()?;

        Ok(NewTransaction {
            transaction_type,
            description: self.description,
            date: self.date,
            amount: self.amount,
        })
    }
}
