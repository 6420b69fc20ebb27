//! Loan Desk UI
//!
//! Browser frontend for the loan servicing desk: paginated REST collection
//! fetches, client-side sorting of cases and the Leptos views around them.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod controller;
pub mod format;
pub mod loan_math;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod render;
pub mod sorting;
pub mod store;
pub mod url_state;
