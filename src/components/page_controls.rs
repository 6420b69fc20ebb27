//! Page Controls Component
//!
//! Previous/next buttons under a paged table.

use leptos::prelude::*;

use crate::pagination::PageNav;

#[component]
pub fn PageControls(
    nav: PageNav,
    /// Disables both buttons while a page is loading
    #[prop(into)]
    busy: Signal<bool>,
    on_page: Callback<u64>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls flex items-center gap-3">
            <button
                class="px-3 py-1 border rounded disabled:opacity-50"
                disabled=move || !nav.has_prev || busy.get()
                on:click=move |_| on_page.run(nav.page.saturating_sub(1))
            >
                "Previous"
            </button>
            <span class="pagination-page">{nav.label()}</span>
            <button
                class="px-3 py-1 border rounded disabled:opacity-50"
                disabled=move || !nav.has_next || busy.get()
                on:click=move |_| on_page.run(nav.page + 1)
            >
                "Next"
            </button>
        </div>
    }
}
