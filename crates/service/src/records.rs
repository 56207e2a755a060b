//! Presentation records returned by read handlers.

use common::currency::format_currency;
use models::{customer, invoice::{self, InvoiceStatus}};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard "latest invoices" entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    /// Formatted currency string.
    pub amount: String,
}

impl LatestInvoice {
    pub fn from_rows(inv: invoice::Model, cust: customer::Model) -> Self {
        Self {
            id: inv.id,
            name: cust.name,
            email: cust.email,
            image_url: cust.image_url,
            amount: format_currency(inv.amount),
        }
    }
}

/// Row of the searchable invoice table. `amount` stays in cents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl InvoiceRow {
    pub fn from_rows(inv: invoice::Model, cust: customer::Model) -> Self {
        Self {
            id: inv.id,
            customer_id: inv.customer_id,
            amount: inv.amount,
            status: inv.status,
            date: inv.date.to_rfc3339(),
            name: cust.name,
            email: cust.email,
            image_url: cust.image_url,
        }
    }
}

/// Invoice as loaded into the edit form, amount back in major units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl From<invoice::Model> for InvoiceForm {
    fn from(inv: invoice::Model) -> Self {
        Self {
            id: inv.id,
            customer_id: inv.customer_id,
            amount: invoice::to_major_units(inv.amount),
            status: inv.status,
        }
    }
}

/// Summary cards at the top of the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    pub number_of_customers: u64,
    pub number_of_invoices: u64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

impl CardData {
    pub fn from_totals(customers: u64, invoices: u64, paid: i64, pending: i64) -> Self {
        Self {
            number_of_customers: customers,
            number_of_invoices: invoices,
            total_paid_invoices: format_currency(paid),
            total_pending_invoices: format_currency(pending),
        }
    }
}

/// Customer with invoice totals, for the customers table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerTableRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}
