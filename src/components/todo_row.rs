//! Todo Row Component
//!
//! One list entry: completion checkbox plus a link to the detail page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::render::TodoRowView;
use crate::store::{store_todo_completed, use_app_store};

/// A single todo row in the list
#[component]
pub fn TodoRow(row: TodoRowView) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let id = row.id;
    let fallback = row.completed;

    // Follows the cache, so a rejected toggle snaps back on the next store write
    let is_checked = move || store_todo_completed(&store, id).unwrap_or(fallback);

    // Text goes in as text nodes, so user content is escaped by the DOM
    view! {
        <li class=row.class>
            <input
                type="checkbox"
                class="todo-checkbox"
                prop:checked=is_checked
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    spawn_local(ctx.set_completed(store, id, checked));
                }
            />
            <a class="todo-content" href=row.href>
                <div class="todo-title">{row.title}</div>
                {row.note.map(|note| view! { <div class="todo-note">{note}</div> })}
            </a>
        </li>
    }
}
