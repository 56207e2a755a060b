//! Database-backed handlers: one module per dashboard area.

pub mod invoice_service;
pub mod dashboard_service;
pub mod customer_service;
