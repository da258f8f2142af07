//! In-Memory Backend
//!
//! `TodoApi` fake for tests; mirrors the server's observable behavior.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;

use super::{Credential, TodoApi};
use crate::config::CredentialMode;
use crate::error::{ApiError, ApiResult};
use crate::models::{Account, LoginResponse, NewTodo, Todo, TodoPatch};

struct StoredAccount {
    account: Account,
    password: String,
}

#[derive(Default)]
struct State {
    accounts: Vec<StoredAccount>,
    /// token -> account id
    tokens: HashMap<String, u64>,
    /// cookie deployments: the one browser session
    cookie_session: Option<u64>,
    todos: Vec<Todo>,
    next_id: u64,
    clock: u64,
}

pub struct MemoryApi {
    mode: CredentialMode,
    state: RefCell<State>,
    offline: Cell<bool>,
    /// calls answered with a 500
    failing: RefCell<Vec<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl MemoryApi {
    pub fn new(mode: CredentialMode) -> Self {
        Self {
            mode,
            state: RefCell::new(State { next_id: 1, ..Default::default() }),
            offline: Cell::new(false),
            failing: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Register + issue a token without going through `login`
    pub fn seed_account(&self, username: &str, password: &str) -> (Account, String) {
        let mut state = self.state.borrow_mut();
        let id = state.accounts.len() as u64 + 1;
        let account = Account {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
        };
        state.accounts.push(StoredAccount { account: account.clone(), password: password.to_string() });
        let token = format!("token-{}", username);
        state.tokens.insert(token.clone(), id);
        (account, token)
    }

    pub fn seed_todo(&self, owner_id: u64, title: &str, note: &str, completed: bool) -> Todo {
        let mut state = self.state.borrow_mut();
        let todo = Self::make_todo(&mut state, owner_id, title, note, completed);
        state.todos.push(todo.clone());
        todo
    }

    /// Drop a todo behind the client's back
    pub fn remove_todo(&self, id: u64) {
        self.state.borrow_mut().todos.retain(|t| t.id != id);
    }

    pub fn revoke_all_tokens(&self) {
        self.state.borrow_mut().tokens.clear();
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Make every later `name` call fail with a 500
    pub fn fail_calls(&self, name: &str) {
        self.failing.borrow_mut().push(name.to_string());
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == name).count()
    }

    fn make_todo(state: &mut State, owner_id: u64, title: &str, note: &str, completed: bool) -> Todo {
        let id = state.next_id;
        state.next_id += 1;
        state.clock += 1;
        let stamp = format!("2024-01-01T00:00:{:02}", state.clock % 60);
        Todo {
            id,
            title: title.to_string(),
            note: note.to_string(),
            completed,
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
            owner_id: Some(owner_id),
        }
    }

    fn record(&self, name: &str) -> ApiResult<()> {
        self.calls.borrow_mut().push(name.to_string());
        if self.offline.get() {
            return Err(ApiError::Network("offline".to_string()));
        }
        if self.failing.borrow().iter().any(|c| c == name) {
            return Err(ApiError::Server { status: 500, message: None });
        }
        Ok(())
    }

    fn authenticate(&self, credential: &Credential) -> ApiResult<u64> {
        let state = self.state.borrow();
        let owner = match (self.mode, credential) {
            (CredentialMode::Bearer, Credential::Bearer(token)) => state.tokens.get(token).copied(),
            (CredentialMode::Cookie, Credential::Cookie) => state.cookie_session,
            _ => None,
        };
        owner.ok_or(ApiError::Unauthorized)
    }
}

#[async_trait(?Send)]
impl TodoApi for MemoryApi {
    async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<Account> {
        self.record("register")?;
        let mut state = self.state.borrow_mut();
        if state.accounts.iter().any(|a| a.account.username == username) {
            return Err(ApiError::Server { status: 400, message: None });
        }
        let account = Account {
            id: state.accounts.len() as u64 + 1,
            username: username.to_string(),
            email: email.to_string(),
        };
        state.accounts.push(StoredAccount { account: account.clone(), password: password.to_string() });
        Ok(account)
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        self.record("login")?;
        let mut state = self.state.borrow_mut();
        let account = state
            .accounts
            .iter()
            .find(|a| a.account.username == username && a.password == password)
            .map(|a| a.account.clone())
            .ok_or(ApiError::Unauthorized)?;
        match self.mode {
            CredentialMode::Bearer => {
                let token = format!("token-{}", username);
                state.tokens.insert(token.clone(), account.id);
                Ok(LoginResponse::WithToken { account, token })
            }
            CredentialMode::Cookie => {
                state.cookie_session = Some(account.id);
                Ok(LoginResponse::Account(account))
            }
        }
    }

    async fn logout(&self, _credential: &Credential) -> ApiResult<()> {
        self.record("logout")?;
        self.state.borrow_mut().cookie_session = None;
        Ok(())
    }

    async fn me(&self, credential: &Credential) -> ApiResult<Account> {
        self.record("me")?;
        let id = self.authenticate(credential)?;
        let state = self.state.borrow();
        state
            .accounts
            .iter()
            .find(|a| a.account.id == id)
            .map(|a| a.account.clone())
            .ok_or(ApiError::Unauthorized)
    }

    async fn list_my_todos(&self, credential: &Credential) -> ApiResult<Vec<Todo>> {
        self.record("list_my_todos")?;
        let owner = self.authenticate(credential)?;
        let state = self.state.borrow();
        Ok(state.todos.iter().filter(|t| t.owner_id == Some(owner)).cloned().collect())
    }

    async fn get_todo(&self, credential: &Credential, id: u64) -> ApiResult<Todo> {
        self.record("get_todo")?;
        self.authenticate(credential)?;
        let state = self.state.borrow();
        state.todos.iter().find(|t| t.id == id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_todo(&self, credential: &Credential, todo: &NewTodo) -> ApiResult<Todo> {
        self.record("create_todo")?;
        let owner = self.authenticate(credential)?;
        let mut state = self.state.borrow_mut();
        let created = Self::make_todo(&mut state, owner, &todo.title, &todo.note, todo.completed);
        state.todos.push(created.clone());
        Ok(created)
    }

    async fn update_todo(&self, credential: &Credential, id: u64, patch: &TodoPatch) -> ApiResult<Todo> {
        self.record("update_todo")?;
        self.authenticate(credential)?;
        let mut state = self.state.borrow_mut();
        state.clock += 1;
        let stamp = format!("2024-01-02T00:00:{:02}", state.clock % 60);
        let todo = state.todos.iter_mut().find(|t| t.id == id).ok_or(ApiError::NotFound)?;
        patch.apply_to(todo);
        todo.updated_at = Some(stamp);
        Ok(todo.clone())
    }

    async fn delete_todo(&self, credential: &Credential, id: u64) -> ApiResult<()> {
        self.record("delete_todo")?;
        self.authenticate(credential)?;
        let mut state = self.state.borrow_mut();
        let before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        if state.todos.len() == before {
            // the backend throws for a missing row, which surfaces as a 500
            return Err(ApiError::Server {
                status: 500,
                message: Some(format!("Todo not found with id {}", id)),
            });
        }
        Ok(())
    }
}
