//! HTTP Transport
//!
//! `TodoApi` over `fetch`, via gloo-net.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use super::{Credential, TodoApi};
use crate::config::{AppConfig, CredentialMode};
use crate::error::{ApiError, ApiResult};
use crate::models::{Account, LoginRequest, LoginResponse, NewTodo, RegisterRequest, Todo, TodoPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApi {
    base: String,
    mode: CredentialMode,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Self {
        log::info!("[API] base {} ({} credentials)", config.api_base, config.credential_mode.as_str());
        Self {
            base: config.api_base.clone(),
            mode: config.credential_mode,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Attach the credential. Cookie deployments always opt into cookies so
    /// that login can set one.
    fn decorate(&self, builder: RequestBuilder, credential: &Credential) -> RequestBuilder {
        let builder = match self.mode {
            CredentialMode::Cookie => builder.credentials(RequestCredentials::Include),
            CredentialMode::Bearer => builder,
        };
        match credential {
            Credential::Bearer(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            Credential::Cookie | Credential::Anonymous => builder,
        }
    }

    fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> ApiResult<Request> {
        builder
            .json(body)
            .map_err(|e| ApiError::Decode(format!("failed to encode request: {}", e)))
    }

    fn without_body(builder: RequestBuilder) -> ApiResult<Request> {
        builder
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build request: {}", e)))
    }
}

/// Send and classify: 2xx passes through, everything else becomes an `ApiError`
async fn send(request: Request) -> ApiResult<Response> {
    let response = request.send().await.map_err(|e| {
        log::warn!("[API] request failed: {}", e);
        ApiError::Network(e.to_string())
    })?;

    if response.ok() {
        log::debug!("[API] {} -> {}", response.url(), response.status());
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("[API] {} -> {}", response.url(), status);
    Err(ApiError::from_status(status, &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl TodoApi for HttpApi {
    // ========================
    // Accounts
    // ========================

    async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<Account> {
        let builder = self.decorate(Request::post(&self.url("/accounts/register")), &Credential::Anonymous);
        let request = Self::with_json(builder, &RegisterRequest { username, email, password })?;
        read_json(send(request).await?).await
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let builder = self.decorate(Request::post(&self.url("/accounts/login")), &Credential::Anonymous);
        let request = Self::with_json(builder, &LoginRequest { username, password })?;
        read_json(send(request).await?).await
    }

    async fn logout(&self, credential: &Credential) -> ApiResult<()> {
        let builder = self.decorate(Request::post(&self.url("/accounts/logout")), credential);
        send(Self::without_body(builder)?).await?;
        Ok(())
    }

    async fn me(&self, credential: &Credential) -> ApiResult<Account> {
        let builder = self.decorate(Request::get(&self.url("/accounts/me")), credential);
        read_json(send(Self::without_body(builder)?).await?).await
    }

    // ========================
    // Todos
    // ========================

    async fn list_my_todos(&self, credential: &Credential) -> ApiResult<Vec<Todo>> {
        let builder = self.decorate(Request::get(&self.url("/todos/my")), credential);
        read_json(send(Self::without_body(builder)?).await?).await
    }

    async fn get_todo(&self, credential: &Credential, id: u64) -> ApiResult<Todo> {
        let builder = self.decorate(Request::get(&self.url(&format!("/todos/{}", id))), credential);
        read_json(send(Self::without_body(builder)?).await?).await
    }

    async fn create_todo(&self, credential: &Credential, todo: &NewTodo) -> ApiResult<Todo> {
        let builder = self.decorate(Request::post(&self.url("/todos")), credential);
        let request = Self::with_json(builder, todo)?;
        read_json(send(request).await?).await
    }

    async fn update_todo(&self, credential: &Credential, id: u64, patch: &TodoPatch) -> ApiResult<Todo> {
        let builder = self.decorate(Request::patch(&self.url(&format!("/todos/{}", id))), credential);
        let request = Self::with_json(builder, patch)?;
        read_json(send(request).await?).await
    }

    async fn delete_todo(&self, credential: &Credential, id: u64) -> ApiResult<()> {
        let builder = self.decorate(Request::delete(&self.url(&format!("/todos/{}", id))), credential);
        send(Self::without_body(builder)?).await?;
        Ok(())
    }
}
