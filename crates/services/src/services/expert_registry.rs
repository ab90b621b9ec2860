//! Expert registration: validation, then persistence.

use std::sync::LazyLock;

use db::models::expert::{CreateExpert, Expert};
use regex::Regex;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

#[derive(Debug, Error)]
pub enum ExpertRegistryError {
    #[error("invalid value for field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn invalid(field: &'static str, reason: &'static str) -> ExpertRegistryError {
    ExpertRegistryError::Validation { field, reason }
}

pub struct ExpertRegistryService;

impl ExpertRegistryService {
    /// Validate the payload, then insert. Validation always runs before any
    /// statement is issued.
    pub async fn register(
        pool: &SqlitePool,
        data: CreateExpert,
    ) -> Result<Expert, ExpertRegistryError> {
        Self::validate(&data)?;

        let expert = Expert::create(pool, &data, Uuid::new_v4()).await?;
        info!(expert_id = %expert.id, "registered expert");
        Ok(expert)
    }

    pub fn validate(data: &CreateExpert) -> Result<(), ExpertRegistryError> {
        if data.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }
        if data.phone_number.trim().is_empty() {
            return Err(invalid("phoneNumber", "must not be empty"));
        }
        if !EMAIL_RE.is_match(&data.email) {
            return Err(invalid("email", "must be a valid email address"));
        }
        Ok(())
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<Expert>, ExpertRegistryError> {
        Ok(Expert::find_all(pool).await?)
    }

    /// Idempotent: deleting an id that no longer exists is a success.
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, ExpertRegistryError> {
        let affected = Expert::delete(pool, id).await?;
        info!(expert_id = %id, affected, "deleted expert");
        Ok(affected)
    }
}
