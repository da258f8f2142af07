//! Todo List Component
//!
//! Renders the filtered/sorted display list, or one of the two empty states.

use leptos::prelude::*;

use crate::cache::TodoCache;
use crate::components::TodoRow;
use crate::render::{empty_message, rows};
use crate::store::{store_display_list, store_todo_count, use_app_store, AppStateStoreFields};

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_app_store();

    let display = Memo::new(move |_| store_display_list(&store));

    view! {
        <ul class="todo-list" id="todoList">
            {move || display.with(empty_message).map(|msg| view! { <li class="empty-state">{msg}</li> })}
            <For
                each=move || display.with(rows)
                key=|row| {
                    // every displayed field, so an edited todo re-renders
                    (row.id, row.completed, row.title.clone(), row.note.clone())
                }
                children=move |row| view! { <TodoRow row=row /> }
            />
        </ul>
        <Show when=move || !store.todos().with(TodoCache::is_empty)>
            <p class="item-count">{move || format!("{} todos", store_todo_count(&store))}</p>
        </Show>
    }
}
