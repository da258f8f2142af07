//! Todo Frontend App
//!
//! Root component: provides the store and context, checks the session on
//! page load, and picks the page from the URL.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{AuthPanel, FlashBanner, HeaderBar, ListToolbar, NewTodoForm, TodoDetail, TodoList};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::route::Page;
use crate::store::{AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let store: AppStore = Store::new(AppState::new());
    provide_context(store);

    let ctx = AppContext::new(&AppConfig::from_env());
    provide_context(ctx);

    let page = Page::current();
    log::debug!("[APP] page {:?}", page);

    // Session check on mount
    Effect::new(move |_| {
        spawn_local(ctx.establish(store, page));
    });

    view! {
        <main class="app-layout">
            <FlashBanner />
            {match page {
                Page::List => view! { <ListPage /> }.into_any(),
                Page::Detail(id) => view! { <TodoDetail id=id /> }.into_any(),
            }}
        </main>
    }
}

#[component]
fn ListPage() -> impl IntoView {
    let store = expect_context::<AppStore>();

    let checked = move || store.session_checked().get();
    let signed_in = move || store.session().with(|s| s.is_authenticated());

    view! {
        <Show when=checked fallback=|| view! { <p class="loading">"Loading..."</p> }>
            <Show when=signed_in fallback=|| view! { <AuthPanel /> }>
                <HeaderBar />
                <section class="list-page">
                    <NewTodoForm />
                    <ListToolbar />
                    <TodoList />
                </section>
            </Show>
        </Show>
    }
}
