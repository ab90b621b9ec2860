use std::sync::Arc;

use db::DBService;
use services::services::{
    config::Config,
    oauth::{OAuthError, OAuthService},
};

pub mod error;
pub mod extract;
pub mod routes;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    config: Arc<Config>,
    oauth: OAuthService,
}

impl AppState {
    pub fn new(db: DBService, config: Config) -> Result<Self, OAuthError> {
        let oauth = OAuthService::new(config.oauth.clone())?;
        Ok(Self {
            db,
            config: Arc::new(config),
            oauth,
        })
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn oauth(&self) -> &OAuthService {
        &self.oauth
    }
}
