//! Delete Confirm Button Component
//!
//! Inline delete confirmation driven by the edit session's state.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows "Delete" initially. While `confirming`, shows the question with ✓/✗.
/// The owner decides what confirming means; this component only forwards clicks.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] confirming: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_request: Callback<()>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || !confirming.get()>
            <button
                type="button"
                class="delete-btn"
                disabled=move || disabled.get()
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_request.run(());
                }
            >
                "Delete"
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete this todo?"</span>
                <button
                    type="button"
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    type="button"
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_dismiss.run(());
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
