//! New Todo Form Component
//!
//! Title + optional note; submitting creates the todo and reloads the list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::models::NewTodo;
use crate::store::use_app_store;

#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (note, set_note) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get_untracked();
        if text.trim().is_empty() {
            ctx.error("Title is required");
            return;
        }
        if saving.get_untracked() {
            return;
        }
        let todo = NewTodo::new(text, note.get_untracked());
        set_saving.set(true);

        spawn_local(async move {
            if ctx.add_todo(store, todo).await {
                set_title.set(String::new());
                set_note.set(String::new());
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="add-todo-form" id="addTodoForm" on:submit=create_todo>
            <input
                type="text"
                placeholder="What needs to be done?"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Note (optional)"
                prop:value=move || note.get()
                on:input=move |ev| set_note.set(event_target_value(&ev))
            ></textarea>
            <button type="submit" disabled=move || saving.get() || title.get().trim().is_empty()>
                "Add"
            </button>
        </form>
    }
}
