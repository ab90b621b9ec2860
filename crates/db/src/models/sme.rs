use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::query::{EmptyUpdate, UpdateBuilder};

/// A registered SME (small/medium enterprise).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Sme {
    pub id: Uuid,
    pub name: String,
    pub company_name: String,
    pub phone_number: String,
    pub company_logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateSme {
    pub name: String,
    #[serde(alias = "companyName")]
    pub company_name: String,
    #[serde(alias = "phoneNumber")]
    pub phone_number: String,
    #[serde(default, alias = "companyLogoUrl")]
    pub company_logo_url: Option<String>,
}

/// Partial-update payload: only present fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateSme {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "companyName")]
    pub company_name: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default, alias = "companyLogoUrl")]
    pub company_logo_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum SmeUpdateError {
    #[error(transparent)]
    NoFields(#[from] EmptyUpdate),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

const SME_COLUMNS: &str =
    "id, name, company_name, phone_number, company_logo_url, created_at, updated_at";

impl Sme {
    pub async fn create(pool: &SqlitePool, data: &CreateSme, id: Uuid) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO smes ({SME_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SME_COLUMNS}"
        );
        sqlx::query_as::<_, Sme>(&sql)
            .bind(id)
            .bind(data.name.clone())
            .bind(data.company_name.clone())
            .bind(data.phone_number.clone())
            .bind(data.company_logo_url.clone())
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {SME_COLUMNS} FROM smes ORDER BY created_at DESC");
        sqlx::query_as::<_, Sme>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {SME_COLUMNS} FROM smes WHERE id = $1");
        sqlx::query_as::<_, Sme>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write only the fields present in `data`, in a fixed column order.
    /// Returns `None` when no row has this id.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateSme,
    ) -> Result<Option<Self>, SmeUpdateError> {
        let mut builder = UpdateBuilder::new();
        builder.push_opt("name", data.name.clone());
        builder.push_opt("company_name", data.company_name.clone());
        builder.push_opt("phone_number", data.phone_number.clone());
        builder.push_opt("company_logo_url", data.company_logo_url.clone());
        builder.touch("updated_at");

        let (sql, params) = builder.build("smes", "id", SME_COLUMNS)?;
        debug!(%id, fields = params.len(), "built partial update");

        let mut query = sqlx::query_as::<_, Sme>(&sql);
        for value in params {
            query = query.bind(value);
        }
        let row = query.bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM smes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn sample() -> CreateSme {
        CreateSme {
            name: "Jane Doe".to_string(),
            company_name: "Acme".to_string(),
            phone_number: "0712345678".to_string(),
            company_logo_url: Some("https://cdn.example.com/acme.png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_update_touches_only_supplied_columns() {
        let pool = test_pool().await;

        // Every non-empty subset of the updatable fields.
        for mask in 1u8..16 {
            let sme = Sme::create(&pool, &sample(), Uuid::new_v4()).await.unwrap();
            let data = UpdateSme {
                name: (mask & 1 != 0).then(|| "new name".to_string()),
                company_name: (mask & 2 != 0).then(|| "new company".to_string()),
                phone_number: (mask & 4 != 0).then(|| "0799999999".to_string()),
                company_logo_url: (mask & 8 != 0)
                    .then(|| "https://cdn.example.com/new.png".to_string()),
            };

            let updated = Sme::update(&pool, sme.id, &data).await.unwrap().unwrap();

            assert_eq!(
                updated.name,
                data.name.clone().unwrap_or(sme.name.clone()),
                "mask {mask}"
            );
            assert_eq!(
                updated.company_name,
                data.company_name.clone().unwrap_or(sme.company_name.clone())
            );
            assert_eq!(
                updated.phone_number,
                data.phone_number.clone().unwrap_or(sme.phone_number.clone())
            );
            assert_eq!(
                updated.company_logo_url,
                data.company_logo_url.clone().or(sme.company_logo_url.clone())
            );
            assert_eq!(updated.created_at, sme.created_at);
        }
    }

    #[tokio::test]
    async fn test_update_with_no_fields_fails() {
        let pool = test_pool().await;
        let sme = Sme::create(&pool, &sample(), Uuid::new_v4()).await.unwrap();

        let result = Sme::update(&pool, sme.id, &UpdateSme::default()).await;
        assert!(matches!(result, Err(SmeUpdateError::NoFields(_))));

        // And the row is untouched.
        let fetched = Sme::find_by_id(&pool, sme.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, sme.name);
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_none() {
        let pool = test_pool().await;
        let data = UpdateSme {
            name: Some("ghost".to_string()),
            ..Default::default()
        };
        let updated = Sme::update(&pool, Uuid::new_v4(), &data).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_idempotent() {
        let pool = test_pool().await;
        let affected = Sme::delete(&pool, Uuid::new_v4()).await.unwrap();
        assert_eq!(affected, 0);
    }
}
