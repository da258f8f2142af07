//! Header Bar Component
//!
//! App title, signed-in username and the logout button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn HeaderBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let username = move || store.session().with(|s| s.username().unwrap_or_default().to_string());

    let logout = move |_: leptos::ev::MouseEvent| {
        spawn_local(ctx.logout(store));
    };

    view! {
        <header class="header-bar">
            <h1 class="header-title">"My Todos"</h1>
            <div class="header-user">
                <span>"Signed in as " <strong id="currentUser">{username}</strong></span>
                <button type="button" class="logout-btn" on:click=logout>"Logout"</button>
            </div>
        </header>
    }
}
