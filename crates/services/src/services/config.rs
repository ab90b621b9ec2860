//! Environment-driven configuration.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Exact origin allowed by CORS; permissive when unset.
    pub frontend_origin: Option<String>,
    pub oauth: OAuthConfig,
}

#[derive(Debug, Clone, Default)]
pub struct OAuthConfig {
    /// Base under which the per-provider callback routes are mounted,
    /// e.g. `https://api.example.com/auth`.
    pub redirect_base: String,
    pub google: Option<ProviderCredentials>,
    pub twitter: Option<ProviderCredentials>,
    pub linkedin: Option<ProviderCredentials>,
}

#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:agency.db".to_string());
        let frontend_origin = env::var("FRONTEND_ORIGIN").ok();
        let redirect_base = env::var("OAUTH_REDIRECT_BASE")
            .unwrap_or_else(|_| format!("http://{host}:{port}/auth"));

        Self {
            host,
            port,
            database_url,
            frontend_origin,
            oauth: OAuthConfig {
                redirect_base,
                google: provider_credentials("GOOGLE"),
                twitter: provider_credentials("TWITTER"),
                linkedin: provider_credentials("LINKEDIN"),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            frontend_origin: None,
            oauth: OAuthConfig {
                redirect_base: "http://127.0.0.1:8080/auth".to_string(),
                ..OAuthConfig::default()
            },
        }
    }
}

fn provider_credentials(prefix: &str) -> Option<ProviderCredentials> {
    let client_id = env::var(format!("{prefix}_CLIENT_ID")).ok()?;
    let client_secret = env::var(format!("{prefix}_CLIENT_SECRET")).ok()?;
    Some(ProviderCredentials {
        client_id,
        client_secret,
    })
}
