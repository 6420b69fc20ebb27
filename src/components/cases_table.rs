//! Cases Table Component
//!
//! Sortable cases table. One server page loads on mount, on every filter
//! change and on prev/next; a header click fetches and sorts the full
//! filtered collection.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{CollectionPages, Resource};
use crate::components::{body_view, PageControls, SortHeader};
use crate::context::{use_app_context, AppContext};
use crate::controller::{SortController, SortOutcome, SortTicket};
use crate::models::{FilterSet, SortField};
use crate::pagination::{fetch_all, PageCursor};
use crate::render::{outcome_notice, render_case_rows, CASE_COLUMNS};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::url_state;

fn report_outcome(ctx: &AppContext, outcome: &SortOutcome) {
    if let Some((kind, message)) = outcome_notice(outcome) {
        ctx.toasts.show(kind, message);
    }
}

/// Fetch the ticket's page and commit it.
fn load_page(ctx: AppContext, controller: RwSignal<SortController>, ticket: SortTicket, filters: FilterSet) {
    spawn_local(async move {
        let query = ticket.cursor.query(&filters, Some(ticket.state));
        log::debug!(target: "APP", "loading cases page {} (skip={})", ticket.cursor.page, query.skip);
        let result = ctx.api.list_page(Resource::Cases, &query).await;
        if let Some(outcome) = controller.try_update(|c| c.complete_page(ticket, result)) {
            report_outcome(&ctx, &outcome);
        }
    });
}

#[component]
pub fn CasesTable() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let query = url_state::current_query();
    let cursor = PageCursor::new(url_state::page_from_query(&query), ctx.config.display_page_size);
    let controller = RwSignal::new(SortController::new(url_state::sort_from_query(&query)).at_page(cursor));

    // Current page on mount or reload; back to page 1 when the filters change
    {
        let ctx = ctx.clone();
        Effect::new(move |prev: Option<FilterSet>| {
            let trigger = ctx.reload_trigger.get();
            let filters = ctx.filters.get();
            let filters_changed = prev.is_some_and(|prev| prev != filters);
            let ticket = controller.try_update(|c| if filters_changed { c.turn_page(1) } else { c.refresh() });
            if let Some(ticket) = ticket {
                log::debug!(target: "APP", "loading cases, trigger={}", trigger);
                if filters_changed {
                    url_state::persist_page(1);
                }
                load_page(ctx.clone(), controller, ticket, filters.clone());
            }
            filters
        });
    }

    let go_to_page = {
        let ctx = ctx.clone();
        Callback::new(move |page: u64| {
            let Some(ticket) = controller.try_update(|c| c.turn_page(page)) else {
                return;
            };
            url_state::persist_page(ticket.cursor.page);
            load_page(ctx.clone(), controller, ticket, ctx.filters.get_untracked());
        })
    };

    let on_sort = {
        let ctx = ctx.clone();
        Callback::new(move |field: SortField| {
            let Some(ticket) = controller.try_update(|c| c.begin(field)) else {
                return;
            };
            url_state::persist_sort(ticket.state);

            let ctx = ctx.clone();
            let filters = ctx.filters.get_untracked();
            spawn_local(async move {
                let source = CollectionPages {
                    client: &ctx.api,
                    resource: Resource::Cases,
                };
                let result = fetch_all(&source, &filters, ctx.config.page_config()).await;
                if let Some(outcome) = controller.try_update(|c| c.complete(ticket, result)) {
                    report_outcome(&ctx, &outcome);
                }
            });
        })
    };

    let sort = Signal::derive(move || controller.with(|c| c.sort()));
    let loading = move || controller.with(|c| c.is_loading());

    view! {
        <div class="cases-table bg-white shadow overflow-hidden rounded-lg">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        {SortField::ALL
                            .into_iter()
                            .map(|field| view! { <SortHeader field=field sort=sort on_sort=on_sort /> })
                            .collect_view()}
                        <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase tracking-wider">
                            "Actions"
                        </th>
                    </tr>
                </thead>
                <tbody id="casesTableBody" class="bg-white divide-y divide-gray-200">
                    {move || {
                        if loading() {
                            view! {
                                <tr>
                                    <td colspan=CASE_COLUMNS.to_string() class="px-6 py-4 text-center text-gray-500">
                                        "Loading cases..."
                                    </td>
                                </tr>
                            }
                            .into_any()
                        } else {
                            let is_admin = store.is_admin().get();
                            body_view(controller.with(|c| render_case_rows(c.rows(), is_admin)))
                        }
                    }}
                </tbody>
            </table>
            <div class="pagination flex items-center justify-between px-6 py-3 text-sm text-gray-700">
                <span class="pagination-info">
                    {move || controller.with(|c| c.summary().map(str::to_string)).unwrap_or_default()}
                </span>
                {move || {
                    controller
                        .with(|c| c.page_nav())
                        .map(|nav| view! { <PageControls nav=nav busy=Signal::derive(loading) on_page=go_to_page /> })
                }}
            </div>
        </div>
    }
}
