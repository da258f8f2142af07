//! Flash Banner Component
//!
//! Shows the current success/error message until it times out or is dismissed.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn FlashBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        {move || ctx.flash.get().map(|flash| view! {
            <div class=format!("flash {}", flash.kind.class()) role="status">
                <span class="flash-text">{flash.text}</span>
                <button type="button" class="flash-close" on:click=move |_| ctx.dismiss_flash()>"×"</button>
            </div>
        })}
    }
}
