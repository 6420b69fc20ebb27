//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{AccessClaim, FilterOptions};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Dropdown values loaded from the dynamic-filters endpoint
    pub filter_options: FilterOptions,
    /// From the verify-access claim; false until it arrives
    pub is_admin: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_filter_options(store: &AppStore, options: FilterOptions) {
    store.filter_options().set(options);
}

/// Only an explicit successful claim grants admin controls.
pub fn store_apply_access(store: &AppStore, claim: Option<&AccessClaim>) {
    store.is_admin().set(claim.is_some_and(AccessClaim::is_admin));
}
