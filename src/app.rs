//! Loan Desk App
//!
//! Cases page (filter bar and sortable table) or loans page, picked from the
//! location path, plus the toast stack.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_toast::{create_toast_signals, ToastHost};
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{CasesTable, FilterBar, LoansTable};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{store_apply_access, store_set_filter_options, AppState};
use crate::url_state;

/// Top-level list shown for a location path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Cases,
    Loans,
}

impl AppView {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/loans" => AppView::Loans,
            _ => AppView::Cases,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppView::Cases => "Cases",
            AppView::Loans => "Loans",
        }
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

#[component]
pub fn App(api: ApiClient, config: AppConfig) -> impl IntoView {
    let toasts = create_toast_signals();
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let filters = url_state::filters_from_query(&url_state::current_query());

    let ctx = AppContext::new(api, config, toasts, filters, (reload_trigger, set_reload_trigger));
    provide_context(ctx.clone());

    let store = Store::new(AppState::new());
    provide_context(store);

    // Dropdown options and the admin claim, once per page load
    spawn_local(async move {
        match ctx.api.filter_options().await {
            Ok(options) => store_set_filter_options(&store, options),
            Err(err) => log::warn!(target: "APP", "filter options unavailable: {}", err),
        }
        let claim = ctx.api.verify_access().await;
        if let Err(err) = &claim {
            log::info!(target: "APP", "admin access not confirmed: {}", err);
        }
        store_apply_access(&store, claim.ok().as_ref());
    });

    let page = AppView::from_path(&current_path());
    let content = match page {
        AppView::Cases => view! {
            <FilterBar />
            <CasesTable />
        }
        .into_any(),
        AppView::Loans => view! { <LoansTable /> }.into_any(),
    };

    view! {
        <div class="loan-desk max-w-7xl mx-auto px-4 py-6">
            <header class="mb-6 flex items-center justify-between">
                <h1 class="text-2xl font-semibold text-gray-900">{page.title()}</h1>
                <nav class="flex gap-4 text-sm">
                    <a href="/cases" class="text-blue-600 hover:text-blue-800">"Cases"</a>
                    <a href="/loans" class="text-blue-600 hover:text-blue-800">"Loans"</a>
                </nav>
            </header>
            {content}
            <ToastHost toasts=toasts />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_path() {
        assert_eq!(AppView::from_path("/loans"), AppView::Loans);
        assert_eq!(AppView::from_path("/loans/"), AppView::Loans);
        assert_eq!(AppView::from_path("/cases"), AppView::Cases);
        assert_eq!(AppView::from_path("/"), AppView::Cases);
    }
}
