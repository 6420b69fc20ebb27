//! Close Case Button Component
//!
//! Quick status change for open cases.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::render::ClickOrigin;

#[component]
pub fn CloseCaseButton(case_id: i64) -> impl IntoView {
    let ctx = use_app_context();
    let (busy, set_busy) = signal(false);

    let close_case = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if busy.get_untracked() {
            return;
        }
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Are you sure you want to close this case?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        set_busy.set(true);
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.api.close_case(case_id).await {
                Ok(_) => {
                    log::info!(target: "APP", "closed case {}", case_id);
                    ctx.toasts.success("Case closed successfully");
                    ctx.reload();
                }
                Err(err) => ctx.report("Failed to close case", &err),
            }
            // the row may have been replaced by the reload
            let _ = set_busy.try_set(false);
        });
    };

    view! {
        <button
            class="close-case-btn text-green-600 hover:text-green-900 mr-3"
            data-action=ClickOrigin::StatusButton.action()
            disabled=move || busy.get()
            on:click=close_case
        >
            {move || if busy.get() { "Closing..." } else { "Close" }}
        </button>
    }
}
