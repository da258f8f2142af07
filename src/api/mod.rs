//! Backend API
//!
//! The REST surface the client talks to, behind the `TodoApi` trait.

mod http;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{Account, LoginResponse, NewTodo, Todo, TodoPatch};

pub use http::HttpApi;

/// Credential attached to protected calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credential {
    /// Nothing to send (signed out, token mode)
    #[default]
    Anonymous,
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// Browser-managed session cookie
    Cookie,
}

/// Backend operations, one per endpoint.
///
/// Single-threaded (WASM), so futures are not `Send`.
#[async_trait(?Send)]
pub trait TodoApi {
    // Accounts
    async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<Account>;
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;
    async fn logout(&self, credential: &Credential) -> ApiResult<()>;
    async fn me(&self, credential: &Credential) -> ApiResult<Account>;

    // Todos
    async fn list_my_todos(&self, credential: &Credential) -> ApiResult<Vec<Todo>>;
    async fn get_todo(&self, credential: &Credential, id: u64) -> ApiResult<Todo>;
    async fn create_todo(&self, credential: &Credential, todo: &NewTodo) -> ApiResult<Todo>;
    async fn update_todo(&self, credential: &Credential, id: u64, patch: &TodoPatch) -> ApiResult<Todo>;
    async fn delete_todo(&self, credential: &Credential, id: u64) -> ApiResult<()>;
}
