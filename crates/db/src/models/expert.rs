use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use utils::forms;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Years of professional experience, as the registration form buckets them.
#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[sqlx(type_name = "experience_band")]
pub enum Experience {
    #[sqlx(rename = "less-than-1")]
    #[serde(rename = "less-than-1")]
    #[strum(serialize = "less-than-1")]
    LessThanOne,
    #[sqlx(rename = "1-3")]
    #[serde(rename = "1-3")]
    #[strum(serialize = "1-3")]
    OneToThree,
    #[sqlx(rename = "4-5")]
    #[serde(rename = "4-5")]
    #[strum(serialize = "4-5")]
    FourToFive,
    #[sqlx(rename = "6-plus")]
    #[serde(rename = "6-plus")]
    #[strum(serialize = "6-plus")]
    SixPlus,
}

/// A registered expert (independent consultant).
///
/// The array-shaped fields are persisted as JSON-serialized text and exposed
/// here exactly as stored; use the parsing accessors for the logical lists.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Expert {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub gender: Gender,
    pub currently_employed: bool,
    pub contract_type: Option<String>,
    pub expertise_areas: String, // JSON-serialized array of strings
    pub experience: Experience,
    pub certifications_url: String, // JSON-serialized array of strings
    pub passport_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload. Accepts both camelCase and snake_case spellings and the
/// lenient value shapes the registration form is known to submit.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateExpert {
    pub name: String,
    #[serde(alias = "phoneNumber")]
    pub phone_number: String,
    pub email: String,
    pub gender: Gender,
    #[serde(alias = "currentlyEmployed", deserialize_with = "forms::yes_or_bool")]
    pub currently_employed: bool,
    #[serde(default, alias = "contractType")]
    pub contract_type: Option<String>,
    #[serde(alias = "expertiseAreas", deserialize_with = "forms::string_list")]
    pub expertise_areas: Vec<String>,
    pub experience: Experience,
    #[serde(
        default,
        alias = "certificationsUrl",
        deserialize_with = "forms::string_list"
    )]
    pub certifications_url: Vec<String>,
    #[serde(default, alias = "passportPhotoUrl")]
    pub passport_photo_url: Option<String>,
}

const EXPERT_COLUMNS: &str = "id, name, phone_number, email, gender, currently_employed, \
     contract_type, expertise_areas, experience, certifications_url, passport_photo_url, created_at";

impl Expert {
    /// Parse the serialized expertise_areas back into the logical list.
    pub fn parsed_expertise_areas(&self) -> Vec<String> {
        serde_json::from_str(&self.expertise_areas).unwrap_or_default()
    }

    /// Parse the serialized certifications_url back into the logical list.
    pub fn parsed_certifications(&self) -> Vec<String> {
        serde_json::from_str(&self.certifications_url).unwrap_or_default()
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateExpert,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let expertise_areas = serialize_list(&data.expertise_areas)?;
        let certifications_url = serialize_list(&data.certifications_url)?;
        let created_at = Utc::now();

        let sql = format!(
            "INSERT INTO experts ({EXPERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {EXPERT_COLUMNS}"
        );
        sqlx::query_as::<_, Expert>(&sql)
            .bind(id)
            .bind(data.name.clone())
            .bind(data.phone_number.clone())
            .bind(data.email.clone())
            .bind(data.gender)
            .bind(data.currently_employed)
            .bind(data.contract_type.clone())
            .bind(expertise_areas)
            .bind(data.experience)
            .bind(certifications_url)
            .bind(data.passport_photo_url.clone())
            .bind(created_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {EXPERT_COLUMNS} FROM experts ORDER BY created_at DESC");
        sqlx::query_as::<_, Expert>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {EXPERT_COLUMNS} FROM experts WHERE id = $1");
        sqlx::query_as::<_, Expert>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM experts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn serialize_list(items: &[String]) -> Result<String, sqlx::Error> {
    serde_json::to_string(items).map_err(|e| sqlx::Error::Encode(Box::new(e)))
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

    fn sample(name: &str) -> CreateExpert {
        CreateExpert {
            name: name.to_string(),
            phone_number: "0712345678".to_string(),
            email: format!("{name}@example.com"),
            gender: Gender::Female,
            currently_employed: true,
            contract_type: None,
            expertise_areas: vec!["seo".to_string(), "ads".to_string()],
            experience: Experience::OneToThree,
            certifications_url: vec![],
            passport_photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_persists_serialized_lists() {
        let pool = test_pool().await;
        let expert = Expert::create(&pool, &sample("jane"), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(expert.expertise_areas, r#"["seo","ads"]"#);
        assert_eq!(expert.certifications_url, "[]");
        assert_eq!(expert.parsed_expertise_areas(), vec!["seo", "ads"]);
        assert!(expert.parsed_certifications().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_is_newest_first() {
        let pool = test_pool().await;
        let first = Expert::create(&pool, &sample("a"), Uuid::new_v4())
            .await
            .unwrap();
        let second = Expert::create(&pool, &sample("b"), Uuid::new_v4())
            .await
            .unwrap();
        let third = Expert::create(&pool, &sample("c"), Uuid::new_v4())
            .await
            .unwrap();

        let all = Expert::find_all(&pool).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_delete_removes_the_row_and_is_idempotent() {
        let pool = test_pool().await;
        let expert = Expert::create(&pool, &sample("gone"), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(Expert::delete(&pool, expert.id).await.unwrap(), 1);
        assert!(Expert::find_by_id(&pool, expert.id).await.unwrap().is_none());
        assert_eq!(Expert::delete(&pool, expert.id).await.unwrap(), 0);
    }

    #[test]
    fn test_create_payload_accepts_form_spellings() {
        let payload: CreateExpert = serde_json::from_str(
            r#"{
                "name": "Jane",
                "phoneNumber": "0712345678",
                "email": "jane@example.com",
                "gender": "female",
                "currentlyEmployed": "yes",
                "expertiseAreas": "[\"seo\",\"ads\"]",
                "experience": "4-5",
                "certificationsUrl": "https://example.com/cert.pdf"
            }"#,
        )
        .unwrap();

        assert!(payload.currently_employed);
        assert_eq!(payload.expertise_areas, vec!["seo", "ads"]);
        assert_eq!(
            payload.certifications_url,
            vec!["https://example.com/cert.pdf"]
        );
        assert_eq!(payload.experience, Experience::FourToFive);
    }
}
