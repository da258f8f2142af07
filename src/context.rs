//! Application Context
//!
//! The top-level controller provided via Leptos Context API: backend client,
//! session store, flash messages, and the list actions that tie them to the
//! app store.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{Credential, HttpApi};
use crate::cache::TodoCache;
use crate::config::{AppConfig, FLASH_HIDE_MS, SESSION_EXPIRED_LOGOUT_MS};
use crate::error::{ApiError, ApiResult, Reaction};
use crate::models::{NewTodo, Todo, TodoPatch};
use crate::route::Page;
use crate::session::{LocalTokenStore, SessionStore};
use crate::store::{store_clear_session, store_replace_todos, store_set_session, AppStateStoreFields, AppStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn class(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// Inline message, auto-hidden after `FLASH_HIDE_MS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub id: u32,
    pub kind: FlashKind,
    pub text: String,
}

/// App-wide services and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<HttpApi>,
    sessions: StoredValue<SessionStore<LocalTokenStore>>,
    /// Current flash message - read
    pub flash: ReadSignal<Option<Flash>>,
    /// Current flash message - write
    set_flash: WriteSignal<Option<Flash>>,
    flash_seq: StoredValue<u32>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        let (flash, set_flash) = signal(None);
        Self {
            api: StoredValue::new(HttpApi::new(config)),
            sessions: StoredValue::new(SessionStore::from_config(config)),
            flash,
            set_flash,
            flash_seq: StoredValue::new(0),
        }
    }

    pub fn api(&self) -> HttpApi {
        self.api.get_value()
    }

    pub fn sessions(&self) -> SessionStore<LocalTokenStore> {
        self.sessions.get_value()
    }

    pub fn credential(&self, store: &AppStore) -> Credential {
        store.session().with_untracked(|s| s.credential.clone())
    }

    // ========================
    // Flash messages
    // ========================

    pub fn notify(&self, kind: FlashKind, text: impl Into<String>) {
        self.flash_seq.update_value(|seq| *seq += 1);
        let id = self.flash_seq.get_value();
        self.set_flash.set(Some(Flash { id, kind, text: text.into() }));

        // only hide our own message, not a newer one
        let flash = self.flash;
        let set_flash = self.set_flash;
        spawn_local(async move {
            TimeoutFuture::new(FLASH_HIDE_MS).await;
            if flash.get_untracked().map(|f| f.id) == Some(id) {
                set_flash.set(None);
            }
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(FlashKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(FlashKind::Error, text);
    }

    pub fn dismiss_flash(&self) {
        self.set_flash.set(None);
    }

    // ========================
    // Session lifecycle
    // ========================

    /// Page-load check; loads todos when the credential is still good and
    /// the page shows the list
    pub async fn establish(self, store: AppStore, page: Page) {
        let session = self.sessions().establish(&self.api()).await;
        let authenticated = session.is_authenticated();
        store_set_session(&store, session);
        if authenticated && page.shows_list() {
            self.reload_todos(store).await;
        }
    }

    pub async fn logout(self, store: AppStore) {
        let session = store.session().get_untracked();
        self.sessions().logout(&self.api(), &session).await;
        store_clear_session(&store);
    }

    /// Route a failed call to the right reaction
    pub fn report(&self, store: AppStore, err: &ApiError, fallback: &str) {
        log::warn!("[APP] {}: {}", fallback, err);
        match self.sessions().handle_failure(err, fallback) {
            Reaction::Expire => self.expire_session(store),
            Reaction::Message(text) => self.error(text),
        }
    }

    /// Token is already gone; tell the user, then log out after a pause
    fn expire_session(&self, store: AppStore) {
        self.error(ApiError::Unauthorized.user_message(""));
        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(SESSION_EXPIRED_LOGOUT_MS).await;
            ctx.logout(store).await;
        });
    }

    // ========================
    // Todo list actions
    // ========================

    pub async fn reload_todos(self, store: AppStore) {
        let credential = self.credential(&store);
        let mut cache = store.todos().get_untracked();
        match cache.reload(&self.api(), &credential).await {
            Ok(()) => store_replace_todos(&store, cache),
            Err(e) => self.report(store, &e, "Failed to load todos"),
        }
    }

    /// Returns true when the todo was created
    pub async fn add_todo(self, store: AppStore, todo: NewTodo) -> bool {
        let credential = self.credential(&store);
        let mut cache: TodoCache = store.todos().get_untracked();
        match cache.add(&self.api(), &credential, &todo).await {
            Ok(_) => {
                store_replace_todos(&store, cache);
                self.success("Todo added successfully! 🎉");
                true
            }
            Err(e) => {
                self.report(store, &e, "Failed to add todo");
                false
            }
        }
    }

    pub async fn set_completed(self, store: AppStore, id: u64, completed: bool) {
        let credential = self.credential(&store);
        let mut cache = store.todos().get_untracked();
        match cache.set_completed(&self.api(), &credential, id, completed).await {
            Ok(_) => store_replace_todos(&store, cache),
            Err(e) => {
                // cache is untouched; writing it back re-syncs the clicked checkbox
                store_replace_todos(&store, cache);
                self.report(store, &e, "Failed to update todo");
                if !e.is_unauthorized() {
                    self.reload_todos(store).await;
                }
            }
        }
    }

    /// Detail-page save; the list is refreshed behind it
    pub async fn save_todo(self, store: AppStore, id: u64, patch: TodoPatch) -> ApiResult<Todo> {
        let credential = self.credential(&store);
        let mut cache = store.todos().get_untracked();
        let saved = cache.update(&self.api(), &credential, id, &patch).await?;
        store_replace_todos(&store, cache);
        Ok(saved)
    }

    pub async fn delete_todo(self, store: AppStore, id: u64) -> ApiResult<()> {
        let credential = self.credential(&store);
        let mut cache = store.todos().get_untracked();
        cache.delete(&self.api(), &credential, id).await?;
        store_replace_todos(&store, cache);
        Ok(())
    }
}
