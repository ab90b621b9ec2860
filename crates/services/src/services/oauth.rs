//! OAuth authorization-code glue for the third-party sign-in providers.
//!
//! Providers are opaque: we build their authorization URL and exchange the
//! returned code for a token against their fixed token endpoint. Nothing is
//! persisted here.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use ts_rs::TS;
use url::Url;

use super::config::{OAuthConfig, ProviderCredentials};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Twitter,
    Linkedin,
}

impl OAuthProvider {
    fn authorize_endpoint(self) -> &'static str {
        match self {
            Self::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            Self::Twitter => "https://twitter.com/i/oauth2/authorize",
            Self::Linkedin => "https://www.linkedin.com/oauth/v2/authorization",
        }
    }

    fn token_endpoint(self) -> &'static str {
        match self {
            Self::Google => "https://oauth2.googleapis.com/token",
            Self::Twitter => "https://api.twitter.com/2/oauth2/token",
            Self::Linkedin => "https://www.linkedin.com/oauth/v2/accessToken",
        }
    }

    fn scope(self) -> &'static str {
        match self {
            Self::Google => "openid email profile",
            Self::Twitter => "tweet.read users.read offline.access",
            Self::Linkedin => "openid profile email",
        }
    }
}

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider '{0}' is not configured")]
    NotConfigured(OAuthProvider),
    #[error("network error: {0}")]
    Transport(String),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("json error: {0}")]
    Serde(String),
}

/// Token response as the providers return it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OAuthService {
    http: Client,
    config: OAuthConfig,
}

impl OAuthService {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(config: OAuthConfig) -> Result<Self, OAuthError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("agency-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OAuthError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Build the provider's authorization URL for the configured client.
    pub fn authorize_url(&self, provider: OAuthProvider) -> Result<String, OAuthError> {
        let creds = self.credentials(provider)?;
        let redirect_uri = self.redirect_uri(provider);

        let url = Url::parse_with_params(
            provider.authorize_endpoint(),
            &[
                ("client_id", creds.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", provider.scope()),
            ],
        )
        .map_err(|e| OAuthError::Serde(e.to_string()))?;

        Ok(url.into())
    }

    /// Exchange an authorization code for a token at the provider's fixed
    /// token endpoint.
    pub async fn exchange_code(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<TokenResponse, OAuthError> {
        let creds = self.credentials(provider)?;
        let redirect_uri = self.redirect_uri(provider);

        let res = self
            .http
            .post(provider.token_endpoint())
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::Transport(e.to_string()))?;

        match res.status() {
            s if s.is_success() => res
                .json::<TokenResponse>()
                .await
                .map_err(|e| OAuthError::Serde(e.to_string())),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(OAuthError::Http { status, body })
            }
        }
    }

    fn credentials(&self, provider: OAuthProvider) -> Result<&ProviderCredentials, OAuthError> {
        let creds = match provider {
            OAuthProvider::Google => self.config.google.as_ref(),
            OAuthProvider::Twitter => self.config.twitter.as_ref(),
            OAuthProvider::Linkedin => self.config.linkedin.as_ref(),
        };
        creds.ok_or(OAuthError::NotConfigured(provider))
    }

    fn redirect_uri(&self, provider: OAuthProvider) -> String {
        format!(
            "{}/{}/callback",
            self.config.redirect_base.trim_end_matches('/'),
            provider
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> OAuthService {
        OAuthService::new(OAuthConfig {
            redirect_base: "https://api.example.com/auth".to_string(),
            google: Some(ProviderCredentials {
                client_id: "google-client".to_string(),
                client_secret: "google-secret".to_string(),
            }),
            twitter: None,
            linkedin: None,
        })
        .unwrap()
    }

    #[test]
    fn test_provider_parses_from_path_segment() {
        assert_eq!("google".parse::<OAuthProvider>(), Ok(OAuthProvider::Google));
        assert_eq!(
            "linkedin".parse::<OAuthProvider>(),
            Ok(OAuthProvider::Linkedin)
        );
        assert!("facebook".parse::<OAuthProvider>().is_err());
    }

    #[test]
    fn test_authorize_url_carries_client_and_redirect() {
        let url = configured().authorize_url(OAuthProvider::Google).unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=google-client"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("google%2Fcallback"));
    }

    #[test]
    fn test_unconfigured_provider_is_an_error() {
        let err = configured()
            .authorize_url(OAuthProvider::Twitter)
            .unwrap_err();
        assert!(matches!(err, OAuthError::NotConfigured(_)));
    }
}
