//! Case Actions Component
//!
//! Edit / close / delete controls in the last column of a case row.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CloseCaseButton, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::render::{ClickOrigin, RowActions};

#[component]
pub fn CaseActions(case_id: i64, actions: RowActions) -> impl IntoView {
    let ctx = use_app_context();

    let delete_case = Callback::new(move |_| {
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.api.delete_case(case_id).await {
                Ok(()) => {
                    ctx.toasts.success("Case deleted successfully");
                    ctx.reload();
                }
                Err(err) => ctx.report("Failed to delete case", &err),
            }
        });
    });

    let confirm_text = format!("Delete {}?", actions.delete_label);

    view! {
        <td class="px-6 py-4 whitespace-nowrap text-right text-sm font-medium">
            <a
                href=actions.edit_href
                class="text-blue-600 hover:text-blue-900 mr-3"
                data-action=ClickOrigin::EditLink.action()
                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                "Edit"
            </a>
            {actions.can_close.then(|| view! { <CloseCaseButton case_id=case_id /> })}
            {actions.can_delete.then(move || view! {
                <DeleteConfirmButton
                    button_class="delete-btn text-red-600 hover:text-red-900"
                    confirm_text=confirm_text
                    on_confirm=delete_case
                />
            })}
        </td>
    }
}
