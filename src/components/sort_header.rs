//! Sort Header Component
//!
//! Clickable column header with a direction indicator.

use leptos::prelude::*;

use crate::models::{SortField, SortState};
use crate::render::indicator_for;

#[component]
pub fn SortHeader(
    field: SortField,
    #[prop(into)] sort: Signal<SortState>,
    #[prop(into)] on_sort: Callback<SortField>,
) -> impl IntoView {
    let indicator = move || indicator_for(field, sort.get());

    view! {
        <th
            class="sortable px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider cursor-pointer select-none"
            data-sort=field.as_param()
            on:click=move |_| on_sort.run(field)
        >
            <div class="flex items-center gap-1">
                <span>{field.label()}</span>
                <svg class=move || indicator().class() width="12" height="12" viewBox="0 0 20 20" fill="currentColor">
                    <path d=move || indicator().svg_path() />
                </svg>
            </div>
        </th>
    }
}
