//! Todo Detail Component
//!
//! Detail/edit page for one todo. All page state lives in an `EditSession`;
//! the view only reads it and forwards user actions.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TodoApi;
use crate::components::DeleteConfirmButton;
use crate::config::{DELETE_REDIRECT_MS, DETAIL_LOAD_FAILED_REDIRECT_MS};
use crate::context::AppContext;
use crate::edit_session::{CancelOutcome, EditError, EditSession, EditState};
use crate::error::ApiError;
use crate::render::{completed_badge, format_timestamp, note_html};
use crate::route::{navigate, Page};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TodoDetail(id: u64) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let edit = RwSignal::new(None::<EditSession>);
    let (load_failed, set_load_failed) = signal(false);

    // Load once the session check is done; signed-out visitors go back to the list
    Effect::new(move |_| {
        if !store.session_checked().get() {
            return;
        }
        if !store.session().with(|s| s.is_authenticated()) {
            navigate(Page::List);
            return;
        }
        let credential = ctx.credential(&store);
        spawn_local(async move {
            match ctx.api().get_todo(&credential, id).await {
                Ok(todo) => edit.set(Some(EditSession::load(todo))),
                Err(e) if e.is_unauthorized() => ctx.report(store, &e, "Failed to load todo details"),
                Err(e) => {
                    let fallback = if e == ApiError::NotFound { "Todo not found" } else { "Failed to load todo details" };
                    ctx.error(e.user_message(fallback));
                    set_load_failed.set(true);
                    TimeoutFuture::new(DETAIL_LOAD_FAILED_REDIRECT_MS).await;
                    navigate(Page::List);
                }
            }
        });
    });

    // Browser-level warning when leaving with unsaved edits
    let unload = window_event_listener(leptos::ev::beforeunload, move |ev| {
        let warn = edit
            .try_with_untracked(|s| s.as_ref().is_some_and(EditSession::warn_on_unload))
            .unwrap_or(false);
        if warn {
            ev.prevent_default();
            ev.set_return_value("You have unsaved changes.");
        }
    });
    on_cleanup(move || unload.remove());

    // ========================
    // Derived view state
    // ========================

    let loaded = move || edit.with(|s| s.is_some());
    let busy = move || edit.with(|s| s.as_ref().is_some_and(EditSession::is_busy));
    let can_save = move || edit.with(|s| s.as_ref().is_some_and(EditSession::can_save));
    let form_title = move || edit.with(|s| s.as_ref().map(|s| s.form().title.clone()).unwrap_or_default());
    let form_note = move || edit.with(|s| s.as_ref().map(|s| s.form().note.clone()).unwrap_or_default());
    let form_completed = move || edit.with(|s| s.as_ref().is_some_and(|s| s.form().completed));
    let title_invalid = move || edit.with(|s| s.as_ref().is_some_and(|s| !s.title_is_valid()));

    let saved_title = move || edit.with(|s| s.as_ref().map(|s| s.snapshot().title.clone()).unwrap_or_default());
    let saved_note = move || edit.with(|s| s.as_ref().map(|s| note_html(&s.snapshot().note)).unwrap_or_default());
    let badge = move || edit.with(|s| completed_badge(s.as_ref().is_some_and(|s| s.snapshot().completed)));
    let created = move || edit.with(|s| format_timestamp(s.as_ref().and_then(|s| s.snapshot().created_at.as_deref())));
    let updated = move || edit.with(|s| format_timestamp(s.as_ref().and_then(|s| s.snapshot().updated_at.as_deref())));

    let status = move || {
        edit.with(|s| match s.as_ref().map(EditSession::state) {
            Some(EditState::Dirty) => "Unsaved changes".to_string(),
            Some(EditState::Saving) => "Saving...".to_string(),
            Some(EditState::Error(msg)) => format!("Save failed: {}", msg),
            Some(EditState::Deleting) => "Deleting...".to_string(),
            Some(EditState::Deleted) => "Deleted".to_string(),
            _ => String::new(),
        })
    };

    let confirming = Signal::derive(move || {
        edit.with(|s| matches!(s.as_ref().map(EditSession::state), Some(EditState::ConfirmingDelete)))
    });
    let delete_disabled = Signal::derive(busy);

    // ========================
    // Actions
    // ========================

    let on_title = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        edit.update(|s| {
            if let Some(s) = s.as_mut() {
                s.set_title(value);
            }
        });
    };

    let on_note = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        edit.update(|s| {
            if let Some(s) = s.as_mut() {
                s.set_note(value);
            }
        });
    };

    let on_completed = move |ev: leptos::ev::Event| {
        let checked = event_target_checked(&ev);
        edit.update(|s| {
            if let Some(s) = s.as_mut() {
                s.set_completed(checked);
            }
        });
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(result) = edit.try_update(|s| s.as_mut().map(EditSession::begin_save)).flatten() else {
            return;
        };
        let patch = match result {
            Ok(patch) => patch,
            Err(EditError::Validation(msg)) => {
                ctx.error(msg);
                return;
            }
            Err(_) => return,
        };
        spawn_local(async move {
            match ctx.save_todo(store, id, patch).await {
                Ok(saved) => {
                    edit.update(|s| {
                        if let Some(s) = s.as_mut() {
                            s.save_succeeded(saved);
                        }
                    });
                    ctx.success("Todo updated successfully! ✓");
                }
                Err(e) => {
                    let message = e.user_message("Failed to update todo");
                    edit.update(|s| {
                        if let Some(s) = s.as_mut() {
                            s.save_failed(message.clone());
                        }
                    });
                    ctx.report(store, &e, "Failed to update todo");
                }
            }
        });
    };

    let cancel = move |_: leptos::ev::MouseEvent| {
        let outcome = edit.try_update(|s| s.as_mut().map(|s| s.cancel(false))).flatten();
        if outcome != Some(CancelOutcome::NeedsConfirmation) {
            return;
        }
        let confirmed = window()
            .confirm_with_message("Discard your unsaved changes?")
            .unwrap_or(false);
        if confirmed {
            edit.update(|s| {
                if let Some(s) = s.as_mut() {
                    s.cancel(true);
                }
            });
        }
    };

    let request_delete = Callback::new(move |_: ()| {
        edit.update(|s| {
            if let Some(s) = s.as_mut() {
                let _ = s.request_delete();
            }
        });
    });

    let dismiss_delete = Callback::new(move |_: ()| {
        edit.update(|s| {
            if let Some(s) = s.as_mut() {
                s.dismiss_delete();
            }
        });
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(Ok(todo_id)) = edit.try_update(|s| s.as_mut().map(EditSession::confirm_delete)).flatten() else {
            return;
        };
        spawn_local(async move {
            match ctx.delete_todo(store, todo_id).await {
                Ok(()) => {
                    edit.update(|s| {
                        if let Some(s) = s.as_mut() {
                            s.delete_succeeded();
                        }
                    });
                    ctx.success("Todo deleted successfully! Redirecting...");
                    TimeoutFuture::new(DELETE_REDIRECT_MS).await;
                    navigate(Page::List);
                }
                Err(e) => {
                    edit.update(|s| {
                        if let Some(s) = s.as_mut() {
                            s.delete_failed();
                        }
                    });
                    ctx.report(store, &e, "Failed to delete todo");
                }
            }
        });
    });

    view! {
        <section class="detail-page">
            <a class="back-link" href=Page::List.href()>"← Back to list"</a>

            <Show
                when=loaded
                fallback=move || view! {
                    <p class="loading">
                        {move || if load_failed.get() { "Could not load this todo." } else { "Loading..." }}
                    </p>
                }
            >
                <div class="detail-card">
                    <h2 class="detail-title" id="todoTitle">{saved_title}</h2>
                    <span class=move || format!("detail-value {}", badge().1) id="todoCompleted">{move || badge().0}</span>
                    <div class="detail-note" id="todoNote" inner_html=saved_note></div>
                    <dl class="detail-meta">
                        <dt>"Created"</dt>
                        <dd>{created}</dd>
                        <dt>"Updated"</dt>
                        <dd>{updated}</dd>
                    </dl>
                </div>

                <form class="edit-form" on:submit=save>
                    <label>
                        "Title"
                        <input
                            type="text"
                            class=move || if title_invalid() { "invalid" } else { "" }
                            prop:value=form_title
                            disabled=busy
                            on:input=on_title
                        />
                    </label>
                    <Show when=title_invalid>
                        <span class="field-error">"Title is required"</span>
                    </Show>
                    <label>
                        "Note"
                        <textarea prop:value=form_note disabled=busy on:input=on_note></textarea>
                    </label>
                    <label class="checkbox-label">
                        <input type="checkbox" prop:checked=form_completed disabled=busy on:change=on_completed />
                        "Completed"
                    </label>

                    <p class="edit-status">{status}</p>

                    <div class="edit-actions">
                        <button type="submit" class="save-btn" disabled=move || !can_save()>"Save"</button>
                        <button type="button" class="cancel-edit-btn" disabled=busy on:click=cancel>"Cancel"</button>
                        <DeleteConfirmButton
                            confirming=confirming
                            disabled=delete_disabled
                            on_request=request_delete
                            on_confirm=confirm_delete
                            on_dismiss=dismiss_delete
                        />
                    </div>
                </form>
            </Show>
        </section>
    }
}
