//! Filter Bar Component
//!
//! Search box and dropdown filters above the cases table.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{FilterSet, FILTER_CASE_TYPE, FILTER_INSTITUTION, FILTER_SEARCH, FILTER_STATUS};
use crate::store::{use_app_store, AppStateStoreFields};

/// Dropdown bound to one filter key
#[component]
fn FilterSelect(
    filter_key: &'static str,
    placeholder: &'static str,
    #[prop(into)] options: Signal<Vec<String>>,
) -> impl IntoView {
    let filters = use_app_context().filters;

    view! {
        <select
            class="filter-select border rounded px-3 py-2 text-sm"
            name=filter_key
            prop:value=move || filters.with(|f| f.get(filter_key).to_string())
            on:change=move |ev| {
                let value = event_target_value(&ev);
                filters.update(|f| f.set(filter_key, value));
            }
        >
            <option value="">{placeholder}</option>
            <For
                each=move || options.get()
                key=|option| option.clone()
                children=|option: String| { let label = option.clone(); view! { <option value=option>{label}</option> } }
            />
        </select>
    }
}

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let filters = ctx.filters;
    let debounce_ms = ctx.config.search_debounce_ms;

    let (search_text, set_search_text) = signal(filters.with_untracked(|f| f.get(FILTER_SEARCH).to_string()));
    // bumped on each keystroke; only the last pending search applies
    let (search_rev, set_search_rev) = signal(0u32);

    let on_search = move |value: String| {
        set_search_text.set(value.clone());
        set_search_rev.update(|r| *r += 1);
        let rev = search_rev.get_untracked();
        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            if search_rev.get_untracked() == rev {
                filters.update(|f| f.set(FILTER_SEARCH, value));
            }
        });
    };

    let clear = move |_| {
        set_search_rev.update(|r| *r += 1);
        set_search_text.set(String::new());
        filters.set(FilterSet::new());
    };

    let options = move || store.filter_options().get();

    view! {
        <div class="filter-bar flex flex-wrap items-center gap-3 mb-4">
            <input
                type="text"
                class="filter-search border rounded px-3 py-2 text-sm flex-1"
                placeholder="Search cases..."
                prop:value=move || search_text.get()
                on:input=move |ev| on_search(event_target_value(&ev))
            />
            <FilterSelect
                filter_key=FILTER_STATUS
                placeholder="All Statuses"
                options=Signal::derive(move || options().case_status)
            />
            <FilterSelect
                filter_key=FILTER_CASE_TYPE
                placeholder="All Types"
                options=Signal::derive(move || options().case_type)
            />
            <FilterSelect
                filter_key=FILTER_INSTITUTION
                placeholder="All Institutions"
                options=Signal::derive(move || options().financial_institution)
            />
            <button class="filter-clear text-sm text-gray-600 hover:text-gray-900" on:click=clear>
                "Clear"
            </button>
        </div>
    }
}
