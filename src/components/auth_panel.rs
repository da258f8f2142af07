//! Auth Panel Component
//!
//! Login and registration forms shown while signed out.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::{store_set_session, use_app_store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthTab {
    Login,
    Register,
}

#[component]
pub fn AuthPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (tab, set_tab) = signal(AuthTab::Login);
    let (pending, set_pending) = signal(false);

    // Login fields
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    // Register fields
    let (reg_username, set_reg_username) = signal(String::new());
    let (reg_email, set_reg_email) = signal(String::new());
    let (reg_password, set_reg_password) = signal(String::new());

    let on_login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let user = username.get_untracked();
        let pass = password.get_untracked();
        set_pending.set(true);

        spawn_local(async move {
            let result = ctx.sessions().login(&ctx.api(), &user, &pass).await;
            set_pending.set(false);
            match result {
                Ok(session) => {
                    set_password.set(String::new());
                    store_set_session(&store, session);
                    ctx.reload_todos(store).await;
                }
                Err(failure) => ctx.error(failure.message),
            }
        });
    };

    let on_register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let user = reg_username.get_untracked();
        let email = reg_email.get_untracked();
        let pass = reg_password.get_untracked();
        set_pending.set(true);

        spawn_local(async move {
            let result = ctx.sessions().register(&ctx.api(), &user, &email, &pass).await;
            set_pending.set(false);
            match result {
                Ok(_) => {
                    ctx.success("Registration successful! Please login.");
                    set_reg_username.set(String::new());
                    set_reg_email.set(String::new());
                    set_reg_password.set(String::new());
                    set_username.set(user);
                    set_tab.set(AuthTab::Login);
                }
                Err(failure) => ctx.error(failure.message),
            }
        });
    };

    let tab_class = move |which: AuthTab| {
        if tab.get() == which { "auth-tab active" } else { "auth-tab" }
    };

    view! {
        <section class="auth-section" id="authSection">
            <div class="auth-tabs">
                <button type="button" class=move || tab_class(AuthTab::Login) on:click=move |_| set_tab.set(AuthTab::Login)>
                    "Login"
                </button>
                <button type="button" class=move || tab_class(AuthTab::Register) on:click=move |_| set_tab.set(AuthTab::Register)>
                    "Register"
                </button>
            </div>

            <Show when=move || tab.get() == AuthTab::Login>
                <form class="auth-form" id="loginForm" on:submit=on_login>
                    <input
                        type="text"
                        placeholder="Username"
                        required
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || pending.get()>"Login"</button>
                </form>
            </Show>

            <Show when=move || tab.get() == AuthTab::Register>
                <form class="auth-form" id="registerForm" on:submit=on_register>
                    <input
                        type="text"
                        placeholder="Username"
                        required
                        prop:value=move || reg_username.get()
                        on:input=move |ev| set_reg_username.set(event_target_value(&ev))
                    />
                    <input
                        type="email"
                        placeholder="Email"
                        required
                        prop:value=move || reg_email.get()
                        on:input=move |ev| set_reg_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || reg_password.get()
                        on:input=move |ev| set_reg_password.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || pending.get()>"Register"</button>
                </form>
            </Show>
        </section>
    }
}
