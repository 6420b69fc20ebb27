//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_toast::ToastSignals;

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::models::FilterSet;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub config: AppConfig,
    pub toasts: ToastSignals,
    /// Current filter form values
    pub filters: RwSignal<FilterSet>,
    /// Trigger to reload the visible table - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the visible table - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        api: ApiClient,
        config: AppConfig,
        toasts: ToastSignals,
        filters: FilterSet,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            api,
            config,
            toasts,
            filters: RwSignal::new(filters),
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Trigger a reload of the visible table
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Toast an API failure. Expired sessions are already redirecting.
    pub fn report(&self, action: &str, err: &ApiError) {
        if err.is_session_expired() {
            return;
        }
        log::error!(target: "APP", "{} failed: {}", action, err);
        self.toasts.error(format!("{}: {}", action, err));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
