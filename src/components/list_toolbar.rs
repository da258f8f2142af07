//! List Toolbar Component
//!
//! Search box and sort selector; both write straight into the app store.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};
use crate::view_model::{SortKey, SORT_OPTIONS};

#[component]
pub fn ListToolbar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="list-toolbar">
            <input
                type="search"
                id="searchInput"
                placeholder="Search todos..."
                prop:value=move || store.query().get()
                on:input=move |ev| store.query().set(event_target_value(&ev))
            />
            <select
                id="sortSelect"
                prop:value=move || store.sort_key().get().as_str()
                on:change=move |ev| store.sort_key().set(SortKey::parse(&event_target_value(&ev)))
            >
                {SORT_OPTIONS
                    .iter()
                    .map(|(key, label)| view! { <option value=key.as_str()>{*label}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
