//! Loans Table Component
//!
//! Paged loans list with repayment progress, payment and delinquency columns.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Resource;
use crate::components::{body_view, PageControls};
use crate::context::use_app_context;
use crate::models::{FilterSet, Item};
use crate::pagination::{PageCursor, PageNav};
use crate::render::{render_loan_rows, LOAN_COLUMNS};
use crate::url_state;

const HEADERS: [&str; LOAN_COLUMNS] = [
    "Contract",
    "Status",
    "Amount",
    "Balance",
    "Progress",
    "Monthly Payment",
    "Remaining",
    "Days Past Due",
];

#[component]
pub fn LoansTable() -> impl IntoView {
    let ctx = use_app_context();
    let start = PageCursor::new(
        url_state::page_from_query(&url_state::current_query()),
        ctx.config.loans_page_size,
    );
    let cursor = RwSignal::new(start);
    let rows = RwSignal::new(Vec::<Item>::new());
    let nav = RwSignal::new(None::<PageNav>);
    let loading = RwSignal::new(true);

    {
        let ctx = ctx.clone();
        Effect::new(move |_| {
            let trigger = ctx.reload_trigger.get();
            let requested = cursor.get();
            loading.set(true);
            log::debug!(target: "APP", "loading loans page {}, trigger={}", requested.page, trigger);

            let ctx = ctx.clone();
            spawn_local(async move {
                let query = requested.query(&FilterSet::new(), None);
                let result = ctx.api.list_page(Resource::Loans, &query).await;
                // a newer page request owns the table
                if cursor.get_untracked() != requested {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(page) => {
                        nav.set(Some(requested.nav(page.items.len(), page.total)));
                        rows.set(page.items);
                    }
                    Err(err) => ctx.report("Failed to load loans", &err),
                }
            });
        });
    }

    let on_page = Callback::new(move |page: u64| {
        cursor.update(|c| *c = c.at(page));
        url_state::persist_page(page.max(1));
    });

    view! {
        <div class="loans-table bg-white shadow overflow-hidden rounded-lg">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        {HEADERS
                            .into_iter()
                            .map(|label| view! {
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">
                                    {label}
                                </th>
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    {move || {
                        if loading.get() {
                            view! {
                                <tr>
                                    <td colspan=LOAN_COLUMNS.to_string() class="px-6 py-4 text-center text-gray-500">
                                        "Loading loans..."
                                    </td>
                                </tr>
                            }
                            .into_any()
                        } else {
                            body_view(rows.with(|items| render_loan_rows(items)))
                        }
                    }}
                </tbody>
            </table>
            <div class="pagination flex items-center justify-end px-6 py-3 text-sm text-gray-700">
                {move || {
                    nav.get().map(|nav| view! { <PageControls nav=nav busy=loading on_page=on_page /> })
                }}
            </div>
        </div>
    }
}
