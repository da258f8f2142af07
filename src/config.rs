//! Client Configuration
//!
//! Build-time settings (API base URL, credential transport) and UX constants.

/// Default backend base path
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// localStorage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// Flash messages disappear after this many milliseconds
pub const FLASH_HIDE_MS: u32 = 4000;
/// Delay between "session expired" and the forced logout
pub const SESSION_EXPIRED_LOGOUT_MS: u32 = 2000;
/// Delay before leaving a detail page whose todo failed to load
pub const DETAIL_LOAD_FAILED_REDIRECT_MS: u32 = 2000;
/// Delay before leaving a detail page after a successful delete
pub const DELETE_REDIRECT_MS: u32 = 1500;

/// List view truncation (characters)
pub const TITLE_PREVIEW_CHARS: usize = 50;
pub const NOTE_PREVIEW_CHARS: usize = 80;

/// How the credential travels with each request.
///
/// A deployment picks exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialMode {
    /// `Authorization: Bearer <token>`, token kept in localStorage
    #[default]
    Bearer,
    /// HTTP-only session cookie, `credentials: include` on every call
    Cookie,
}

impl CredentialMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialMode::Bearer => "bearer",
            CredentialMode::Cookie => "cookie",
        }
    }

    /// Parse a mode name; `None` for anything unrecognised
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" | "token" => Some(CredentialMode::Bearer),
            "cookie" | "session" => Some(CredentialMode::Cookie),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub credential_mode: CredentialMode,
    pub token_key: &'static str,
}

impl AppConfig {
    /// Read `TODO_API_BASE` / `TODO_CREDENTIALS` captured at build time.
    pub fn from_env() -> Self {
        Self::from_parts(option_env!("TODO_API_BASE"), option_env!("TODO_CREDENTIALS"))
    }

    pub fn from_parts(api_base: Option<&str>, credentials: Option<&str>) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let credential_mode = match credentials {
            Some(raw) => CredentialMode::parse(raw).unwrap_or_else(|| {
                log::warn!("[CONFIG] unknown credential mode {:?}, using bearer", raw);
                CredentialMode::default()
            }),
            None => CredentialMode::default(),
        };

        Self {
            api_base,
            credential_mode,
            token_key: TOKEN_STORAGE_KEY,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_parts(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.credential_mode, CredentialMode::Bearer);
        assert_eq!(config.token_key, "authToken");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::from_parts(Some("https://todo.example.com/api/"), Some("cookie"));
        assert_eq!(config.api_base, "https://todo.example.com/api");
        assert_eq!(config.credential_mode, CredentialMode::Cookie);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let config = AppConfig::from_parts(Some("  "), Some("carrier-pigeon"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.credential_mode, CredentialMode::Bearer);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(CredentialMode::parse("Cookie"), Some(CredentialMode::Cookie));
        assert_eq!(CredentialMode::parse("token"), Some(CredentialMode::Bearer));
        assert_eq!(CredentialMode::Cookie.as_str(), "cookie");
    }
}
