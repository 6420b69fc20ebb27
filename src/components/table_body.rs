//! Table Body
//!
//! DOM for a rendered [`TableBody`]: rows, cells and row-click navigation.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::CaseActions;
use crate::render::{row_click_target, Cell, ClickOrigin, TableBody, TableRow};

fn click_origin(ev: &web_sys::MouseEvent) -> ClickOrigin {
    let action = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest("[data-action]").ok().flatten())
        .and_then(|el| el.get_attribute("data-action"));
    ClickOrigin::from_action(action.as_deref())
}

fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(url).is_err() {
            log::error!(target: "APP", "navigation to {} failed", url);
        }
    }
}

fn cell_view(id: i64, cell: Cell) -> AnyView {
    match cell {
        Cell::Stacked { primary, secondary } => view! {
            <td class="px-6 py-4 whitespace-nowrap">
                <div class="text-sm font-medium text-gray-900">{primary}</div>
                <div class="text-sm text-gray-500">{secondary}</div>
            </td>
        }
        .into_any(),
        Cell::Text(text) => view! { <td class="px-6 py-4 text-sm text-gray-900">{text}</td> }.into_any(),
        Cell::Muted(text) => view! { <td class="px-6 py-4 text-sm text-gray-400">{text}</td> }.into_any(),
        Cell::Badge { label, tone } => view! {
            <td class="px-6 py-4 whitespace-nowrap">
                <span class=format!("px-2 inline-flex text-xs leading-5 font-semibold rounded-full {}", tone.class())>
                    {label}
                </span>
            </td>
        }
        .into_any(),
        Cell::Days { label, level } => view! {
            <td class=format!("px-6 py-4 text-sm delinquency-{} {}", level.as_str(), level.class())>{label}</td>
        }
        .into_any(),
        Cell::Date { short, long } => view! {
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500" title=long>{short}</td>
        }
        .into_any(),
        Cell::Progress(percent) => view! {
            <td class="px-6 py-4 whitespace-nowrap">
                <div class="loan-progress w-24 bg-gray-200 rounded-full h-2">
                    <div class="bg-green-500 h-2 rounded-full" style=format!("width: {:.0}%", percent)></div>
                </div>
                <div class="text-xs text-gray-500 mt-1">{format!("{:.0}% paid", percent)}</div>
            </td>
        }
        .into_any(),
        Cell::Amount(amount) => view! {
            <td class="px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900 text-right">{amount}</td>
        }
        .into_any(),
        Cell::Actions(actions) => view! { <CaseActions case_id=id actions=actions /> }.into_any(),
    }
}

fn row_view(row: TableRow) -> impl IntoView {
    let id = row.id;
    let cells = row.cells.clone();
    view! {
        <tr
            class="table-row hover:bg-gray-50 cursor-pointer"
            on:click=move |ev: web_sys::MouseEvent| {
                if let Some(url) = row_click_target(&row, click_origin(&ev)) {
                    navigate(url);
                }
            }
        >
            {cells.into_iter().map(|cell| cell_view(id, cell)).collect_view()}
        </tr>
    }
}

pub fn body_view(body: TableBody) -> AnyView {
    match body {
        TableBody::Placeholder { colspan, message } => view! {
            <tr>
                <td colspan=colspan.to_string() class="px-6 py-4 text-center text-gray-500">{message}</td>
            </tr>
        }
        .into_any(),
        TableBody::Rows(rows) => rows.into_iter().map(row_view).collect_view().into_any(),
    }
}
