//! Todo Collection Cache
//!
//! The signed-in account's todos, in server order. Never patched locally:
//! every mutation is followed by a full reload. A mutation's result is what
//! the caller gets back; a failed follow-up reload only leaves the list stale.

use crate::api::{Credential, TodoApi};
use crate::error::ApiResult;
use crate::models::{NewTodo, Todo, TodoPatch};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoCache {
    items: Vec<Todo>,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Wholesale replacement
    pub fn replace(&mut self, items: Vec<Todo>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Refetch `GET /todos/my`. On failure the previous contents stay.
    pub async fn reload<A: TodoApi + ?Sized>(&mut self, api: &A, credential: &Credential) -> ApiResult<()> {
        let items = api.list_my_todos(credential).await?;
        log::debug!("[CACHE] reloaded {} todos", items.len());
        self.replace(items);
        Ok(())
    }

    pub async fn add<A: TodoApi + ?Sized>(
        &mut self,
        api: &A,
        credential: &Credential,
        todo: &NewTodo,
    ) -> ApiResult<Todo> {
        let created = api.create_todo(credential, todo).await?;
        self.refresh(api, credential).await;
        Ok(created)
    }

    pub async fn update<A: TodoApi + ?Sized>(
        &mut self,
        api: &A,
        credential: &Credential,
        id: u64,
        patch: &TodoPatch,
    ) -> ApiResult<Todo> {
        let updated = api.update_todo(credential, id, patch).await?;
        self.refresh(api, credential).await;
        Ok(updated)
    }

    /// Checkbox path: partial update of `completed` only
    pub async fn set_completed<A: TodoApi + ?Sized>(
        &mut self,
        api: &A,
        credential: &Credential,
        id: u64,
        completed: bool,
    ) -> ApiResult<Todo> {
        self.update(api, credential, id, &TodoPatch::completed(completed)).await
    }

    pub async fn delete<A: TodoApi + ?Sized>(&mut self, api: &A, credential: &Credential, id: u64) -> ApiResult<()> {
        api.delete_todo(credential, id).await?;
        self.refresh(api, credential).await;
        Ok(())
    }

    async fn refresh<A: TodoApi + ?Sized>(&mut self, api: &A, credential: &Credential) {
        if let Err(e) = self.reload(api, credential).await {
            log::warn!("[CACHE] reload after mutation failed, list is stale: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryApi;
    use crate::config::CredentialMode;
    use crate::error::ApiError;

    fn setup() -> (MemoryApi, Credential, u64) {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let (account, token) = api.seed_account("ana", "pw");
        (api, Credential::Bearer(token), account.id)
    }

    #[tokio::test]
    async fn test_reload_only_own_todos() {
        let (api, cred, owner) = setup();
        let (other, _) = api.seed_account("bob", "pw");
        api.seed_todo(owner, "Mine", "", false);
        api.seed_todo(other.id, "Theirs", "", false);

        let mut cache = TodoCache::new();
        cache.reload(&api, &cred).await.unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.items()[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trip() {
        let (api, cred, _) = setup();
        let mut cache = TodoCache::new();

        let created = cache.add(&api, &cred, &NewTodo::new("Buy milk", "2 liters")).await.unwrap();
        let fetched = api.get_todo(&cred, created.id).await.unwrap();

        assert_eq!(fetched.title, "Buy milk");
        assert_eq!(fetched.note, "2 liters");
        assert!(!fetched.completed);
        assert_eq!(cache.get(created.id), Some(&fetched));
    }

    #[tokio::test]
    async fn test_toggle_reflected_after_reload() {
        let (api, cred, owner) = setup();
        let todo = api.seed_todo(owner, "Call mom", "", false);
        let mut cache = TodoCache::new();
        cache.reload(&api, &cred).await.unwrap();

        cache.set_completed(&api, &cred, todo.id, true).await.unwrap();

        assert!(cache.get(todo.id).unwrap().completed);
        assert_eq!(api.call_count("list_my_todos"), 2);
    }

    #[tokio::test]
    async fn test_rejected_toggle_keeps_server_value() {
        let (api, cred, owner) = setup();
        let todo = api.seed_todo(owner, "Call mom", "", false);
        let mut cache = TodoCache::new();
        cache.reload(&api, &cred).await.unwrap();
        api.fail_calls("update_todo");

        let err = cache.set_completed(&api, &cred, todo.id, true).await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(cache.get(todo.id).map(|t| t.completed), Some(false));

        cache.reload(&api, &cred).await.unwrap();
        assert_eq!(cache.get(todo.id).map(|t| t.completed), Some(false));
    }

    #[tokio::test]
    async fn test_failed_follow_up_reload_still_reports_success() {
        let (api, cred, _) = setup();
        let mut cache = TodoCache::new();
        api.fail_calls("list_my_todos");

        let created = cache.add(&api, &cred, &NewTodo::new("A", "")).await.unwrap();

        assert_eq!(created.title, "A");
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_every_mutation_reloads() {
        let (api, cred, _) = setup();
        let mut cache = TodoCache::new();

        let created = cache.add(&api, &cred, &NewTodo::new("A", "")).await.unwrap();
        let patch = TodoPatch { title: Some("B".into()), ..Default::default() };
        cache.update(&api, &cred, created.id, &patch).await.unwrap();
        cache.delete(&api, &cred, created.id).await.unwrap();

        assert_eq!(api.call_count("list_my_todos"), 3);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_keeps_local_list() {
        let (api, cred, owner) = setup();
        let todo = api.seed_todo(owner, "Gone soon", "", false);
        let mut cache = TodoCache::new();
        cache.reload(&api, &cred).await.unwrap();
        api.remove_todo(todo.id);

        let err = cache.delete(&api, &cred, todo.id).await.unwrap_err();

        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(err.user_message("Failed to delete todo"), format!("Todo not found with id {}", todo.id));
        assert_eq!(cache.len(), 1);

        cache.reload(&api, &cred).await.unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_reload_unauthorized_keeps_contents() {
        let (api, cred, owner) = setup();
        api.seed_todo(owner, "Keep", "", false);
        let mut cache = TodoCache::new();
        cache.reload(&api, &cred).await.unwrap();
        api.revoke_all_tokens();

        let err = cache.reload(&api, &cred).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(cache.len(), 1);
    }
}
