//! Delete Confirm Button Component
//!
//! Inline delete confirmation with confirm/cancel actions.

use leptos::prelude::*;

use crate::render::ClickOrigin;

/// Inline delete confirmation button
///
/// Shows a "Delete" button initially. When clicked, shows the confirm text
/// with ✓/✗ buttons. Clicks never reach the enclosing row.
///
/// # Arguments
/// * `button_class` - CSS class for the initial delete button
/// * `confirm_text` - Prompt shown while confirming, e.g. "Delete Case #7?"
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] confirm_text: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    view! {
        <span data-action=ClickOrigin::DeleteButton.action()>
            <Show when=move || !confirm_delete.get()>
                <button
                    class=button_class.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(true);
                    }
                >
                    "Delete"
                </button>
            </Show>
            <Show when=move || confirm_delete.get()>
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{confirm_text.clone()}</span>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirm_delete.set(false);
                            on_confirm.run(());
                        }
                    >
                        "✓"
                    </button>
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirm_delete.set(false);
                        }
                    >
                        "✗"
                    </button>
                </span>
            </Show>
        </span>
    }
}
