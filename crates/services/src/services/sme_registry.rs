//! SME registry: full CRUD with dynamic partial updates.

use db::models::sme::{CreateSme, Sme, SmeUpdateError, UpdateSme};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SmeRegistryError {
    #[error("no fields supplied to update")]
    NoFieldsToUpdate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<SmeUpdateError> for SmeRegistryError {
    fn from(err: SmeUpdateError) -> Self {
        match err {
            SmeUpdateError::NoFields(_) => Self::NoFieldsToUpdate,
            SmeUpdateError::Database(e) => Self::Database(e),
        }
    }
}

pub struct SmeRegistryService;

impl SmeRegistryService {
    pub async fn register(pool: &SqlitePool, data: CreateSme) -> Result<Sme, SmeRegistryError> {
        let sme = Sme::create(pool, &data, Uuid::new_v4()).await?;
        info!(sme_id = %sme.id, company = %sme.company_name, "registered sme");
        Ok(sme)
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<Sme>, SmeRegistryError> {
        Ok(Sme::find_all(pool).await?)
    }

    /// Returns `None` when no row has this id.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: UpdateSme,
    ) -> Result<Option<Sme>, SmeRegistryError> {
        let updated = Sme::update(pool, id, &data).await?;
        if updated.is_some() {
            info!(sme_id = %id, "updated sme");
        }
        Ok(updated)
    }

    /// Idempotent: deleting an id that no longer exists is a success.
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, SmeRegistryError> {
        let affected = Sme::delete(pool, id).await?;
        info!(sme_id = %id, affected, "deleted sme");
        Ok(affected)
    }
}
