//! Invoice form parsing.
//!
//! Fields arrive as optional strings so that a missing or malformed value is
//! reported per field instead of rejecting the whole request at extraction.

use std::{collections::BTreeMap, fmt};

use models::invoice::{self, InvoiceStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Error messages keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first { f.write_str("; ")?; }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

/// Raw create/update submission. `id` and `date` are never accepted from the client.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InvoiceFormInput {
    #[serde(default, rename = "customerId")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A submission that passed validation, amount already in cents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatedInvoice {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
}

impl InvoiceFormInput {
    pub fn validate(&self) -> Result<ValidatedInvoice, ServiceError> {
        let mut errors = FieldErrors::default();

        let customer_id = match present(&self.customer_id) {
            None => { errors.add("customerId", "Please select a customer."); None }
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => { errors.add("customerId", "Customer id is not a valid identifier."); None }
            },
        };

        let amount = match present(&self.amount) {
            None => { errors.add("amount", "Please enter an amount."); None }
            Some(raw) => match invoice::parse_amount(raw).and_then(invoice::to_minor_units) {
                Ok(cents) => Some(cents),
                Err(e) => { errors.add("amount", model_message(e)); None }
            },
        };

        let status = match present(&self.status) {
            None => { errors.add("status", "Please select an invoice status."); None }
            Some(raw) => match raw.parse::<InvoiceStatus>() {
                Ok(s) => Some(s),
                Err(e) => { errors.add("status", model_message(e)); None }
            },
        };

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => {
                Ok(ValidatedInvoice { customer_id, amount, status })
            }
            _ => Err(ServiceError::InvalidForm(errors)),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn model_message(e: models::errors::ModelError) -> String {
    match e {
        models::errors::ModelError::Validation(msg) => msg,
        other => other.to_string(),
    }
}
