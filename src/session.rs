//! Session Store
//!
//! Who is signed in, and with which credential. Establishment, login,
//! registration and logout all produce a fresh `Session` value; the
//! controller owns the current one.

use gloo_storage::{LocalStorage, Storage};

use crate::api::{Credential, TodoApi};
use crate::config::{AppConfig, CredentialMode};
use crate::error::{ApiError, Reaction};
use crate::models::Account;

/// Where the bearer token survives page loads
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser localStorage under a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTokenStore {
    key: &'static str,
}

impl LocalTokenStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get::<String>(self.key).ok().filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        if let Err(e) = LocalStorage::set(self.key, token) {
            log::warn!("[SESSION] could not persist token: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(self.key);
    }
}

/// Current authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub account: Option<Account>,
    pub credential: Credential,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.username.as_str())
    }
}

/// User-visible reason a login or registration did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    pub message: String,
}

impl AuthFailure {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStore<T> {
    mode: CredentialMode,
    tokens: T,
}

impl SessionStore<LocalTokenStore> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.credential_mode, LocalTokenStore::new(config.token_key))
    }
}

impl<T: TokenStore> SessionStore<T> {
    pub fn new(mode: CredentialMode, tokens: T) -> Self {
        Self { mode, tokens }
    }

    /// The credential to try on page load
    fn persisted_credential(&self) -> Option<Credential> {
        match self.mode {
            CredentialMode::Bearer => self.tokens.load().map(Credential::Bearer),
            CredentialMode::Cookie => Some(Credential::Cookie),
        }
    }

    /// Validate whatever credential survived the last page load.
    ///
    /// Any failure silently yields an anonymous session and forgets the token.
    pub async fn establish<A: TodoApi + ?Sized>(&self, api: &A) -> Session {
        let Some(credential) = self.persisted_credential() else {
            log::debug!("[SESSION] no stored credential");
            return Session::anonymous();
        };

        match api.me(&credential).await {
            Ok(account) => {
                log::info!("[SESSION] credential valid for {}", account.username);
                Session { account: Some(account), credential }
            }
            Err(e) => {
                log::info!("[SESSION] credential rejected ({}), clearing", e);
                self.tokens.clear();
                Session::anonymous()
            }
        }
    }

    /// Exchange username/password for a session
    pub async fn login<A: TodoApi + ?Sized>(
        &self,
        api: &A,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthFailure> {
        let response = match api.login(username, password).await {
            Ok(response) => response,
            Err(ApiError::Network(_)) => return Err(AuthFailure::new("Login failed. Please try again.")),
            Err(_) => return Err(AuthFailure::new("Invalid username or password")),
        };

        let (account, token) = response.into_parts();
        let credential = match (self.mode, token) {
            (CredentialMode::Bearer, Some(token)) => {
                self.tokens.save(&token);
                Credential::Bearer(token)
            }
            (CredentialMode::Bearer, None) => {
                log::warn!("[SESSION] login response carried no token");
                return Err(AuthFailure::new("Login failed. Please try again."));
            }
            (CredentialMode::Cookie, _) => Credential::Cookie,
        };

        log::info!("[SESSION] logged in as {}", account.username);
        Ok(Session { account: Some(account), credential })
    }

    pub async fn register<A: TodoApi + ?Sized>(
        &self,
        api: &A,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AuthFailure> {
        match api.register(username, email, password).await {
            Ok(account) => Ok(account),
            Err(ApiError::Network(_)) => Err(AuthFailure::new("Registration failed. Please try again.")),
            Err(_) => Err(AuthFailure::new("Registration failed. Username may already exist.")),
        }
    }

    /// Forget the credential. Cookie deployments also tell the server;
    /// a failing logout call is ignored.
    pub async fn logout<A: TodoApi + ?Sized>(&self, api: &A, session: &Session) -> Session {
        self.tokens.clear();
        if self.mode == CredentialMode::Cookie {
            if let Err(e) = api.logout(&session.credential).await {
                log::warn!("[SESSION] server logout failed: {}", e);
            }
        }
        log::info!("[SESSION] logged out");
        Session::anonymous()
    }

    /// Drop the stored token without a server round trip (401 path)
    pub fn forget(&self) {
        log::info!("[SESSION] credential expired, token cleared");
        self.tokens.clear();
    }

    /// Decide the reaction to a failed protected call. An expired session
    /// loses its token right away; the UI reset is left to the caller.
    pub fn handle_failure(&self, err: &ApiError, fallback: &str) -> Reaction {
        let reaction = err.reaction(fallback);
        if reaction == Reaction::Expire {
            self.forget();
        }
        reaction
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::MemoryTokenStore;
    use super::*;
    use crate::api::memory::MemoryApi;

    #[tokio::test]
    async fn test_establish_without_token_is_anonymous() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::default());

        let session = store.establish(&api).await;

        assert!(!session.is_authenticated());
        assert_eq!(api.call_count("me"), 0);
    }

    #[tokio::test]
    async fn test_establish_with_valid_token() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let (account, token) = api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::with_token(&token));

        let session = store.establish(&api).await;

        assert_eq!(session.account, Some(account));
        assert_eq!(session.credential, Credential::Bearer(token));
    }

    #[tokio::test]
    async fn test_establish_clears_rejected_token() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::with_token("stale"));

        let session = store.establish(&api).await;

        assert_eq!(session, Session::anonymous());
        assert!(store.tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_establish_network_failure_is_silent() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let (_, token) = api.seed_account("ana", "pw");
        api.set_offline(true);
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::with_token(&token));

        let session = store.establish(&api).await;

        assert!(!session.is_authenticated());
        assert!(store.tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::default());

        let session = store.login(&api, "ana", "pw").await.unwrap();

        assert_eq!(session.username(), Some("ana"));
        assert_eq!(store.tokens.load().as_deref(), Some("token-ana"));
    }

    #[tokio::test]
    async fn test_login_bad_password_is_a_message() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::default());

        let failure = store.login(&api, "ana", "nope").await.unwrap_err();

        assert_eq!(failure.message, "Invalid username or password");
        assert!(store.tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_cookie_login_and_logout() {
        let api = MemoryApi::new(CredentialMode::Cookie);
        api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Cookie, MemoryTokenStore::default());

        let session = store.login(&api, "ana", "pw").await.unwrap();
        assert_eq!(session.credential, Credential::Cookie);
        assert!(store.establish(&api).await.is_authenticated());

        let session = store.logout(&api, &session).await;
        assert!(!session.is_authenticated());
        assert_eq!(api.call_count("logout"), 1);
        assert!(!store.establish(&api).await.is_authenticated());
    }

    #[tokio::test]
    async fn test_cookie_logout_tolerates_failure() {
        let api = MemoryApi::new(CredentialMode::Cookie);
        api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Cookie, MemoryTokenStore::default());
        let session = store.login(&api, "ana", "pw").await.unwrap();

        api.set_offline(true);
        let session = store.logout(&api, &session).await;

        assert_eq!(session, Session::anonymous());
    }

    #[tokio::test]
    async fn test_bearer_logout_skips_server() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let (_, token) = api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::with_token(&token));
        let session = store.establish(&api).await;

        let session = store.logout(&api, &session).await;

        assert!(!session.is_authenticated());
        assert!(store.tokens.load().is_none());
        assert_eq!(api.call_count("logout"), 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::default());

        store.register(&api, "ana", "ana@example.com", "pw").await.unwrap();
        let failure = store.register(&api, "ana", "other@example.com", "pw").await.unwrap_err();

        assert_eq!(failure.message, "Registration failed. Username may already exist.");
        assert!(store.login(&api, "ana", "pw").await.is_ok());
    }

    #[test]
    fn test_forget_clears_token() {
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::with_token("token-ana"));

        store.forget();

        assert!(store.tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_failure_clears_token() {
        let api = MemoryApi::new(CredentialMode::Bearer);
        let (_, token) = api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::with_token(&token));
        let session = store.establish(&api).await;
        api.revoke_all_tokens();

        let err = api.list_my_todos(&session.credential).await.unwrap_err();
        let reaction = store.handle_failure(&err, "Failed to load todos");

        assert_eq!(reaction, Reaction::Expire);
        assert!(store.tokens.load().is_none());
    }

    #[test]
    fn test_other_failures_keep_token() {
        let store = SessionStore::new(CredentialMode::Bearer, MemoryTokenStore::with_token("token-ana"));

        for err in [
            ApiError::NotFound,
            ApiError::Network("offline".to_string()),
            ApiError::Server { status: 500, message: None },
            ApiError::Decode("bad json".to_string()),
        ] {
            let reaction = store.handle_failure(&err, "Failed to update todo");
            assert_eq!(reaction, Reaction::Message("Failed to update todo".to_string()));
        }
        assert_eq!(store.tokens.load().as_deref(), Some("token-ana"));
    }

    #[tokio::test]
    async fn test_cookie_expiry_then_logout_reaches_server() {
        let api = MemoryApi::new(CredentialMode::Cookie);
        api.seed_account("ana", "pw");
        let store = SessionStore::new(CredentialMode::Cookie, MemoryTokenStore::default());
        let session = store.login(&api, "ana", "pw").await.unwrap();

        assert_eq!(store.handle_failure(&ApiError::Unauthorized, ""), Reaction::Expire);
        let session = store.logout(&api, &session).await;

        assert!(!session.is_authenticated());
        assert_eq!(api.call_count("logout"), 1);
    }
}
