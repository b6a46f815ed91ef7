//! Invoice totals: line-item totals, discounts, grand total and split-payment
//! reconciliation for the invoice entry form.

pub mod cli;
pub mod config;
pub mod models;
pub mod services;
