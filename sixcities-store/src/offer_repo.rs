use async_trait::async_trait;
use chrono::Utc;
use sixcities_core::{CreateOffer, Offer, OfferRepository, StoreError, UpdateOffer};
use sqlx::error::ErrorKind;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Offers stored as JSONB documents, one row per offer.
pub struct PostgresOfferRepository {
    pool: PgPool,
}

impl PostgresOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    document: Json<Offer>,
}

const NEWEST_FIRST: &str = "ORDER BY (document ->> 'postDate')::timestamptz DESC";

fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if matches!(db.kind(), ErrorKind::CheckViolation | ErrorKind::NotNullViolation) {
            return StoreError::Rejected(db.message().to_string());
        }
    }
    StoreError::Backend(Box::new(err))
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn create(&self, payload: CreateOffer) -> Result<Offer, StoreError> {
        let offer = Offer::new(Uuid::new_v4(), payload, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO offers (id, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(offer.id)
        .bind(Json(&offer))
        .bind(offer.created_at)
        .bind(offer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError> {
        let row = sqlx::query_as::<_, OfferRow>("SELECT document FROM offers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(row.map(|row| row.document.0))
    }

    async fn find_all(&self) -> Result<Vec<Offer>, StoreError> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!("SELECT document FROM offers {}", NEWEST_FIRST))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(rows.into_iter().map(|row| row.document.0).collect())
    }

    async fn find_premium_by_city(&self, city_id: &str) -> Result<Vec<Offer>, StoreError> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            r#"
            SELECT document FROM offers
            WHERE document ->> 'city' = $1 AND (document ->> 'isPremium')::boolean
            {}
            "#,
            NEWEST_FIRST
        ))
        .bind(city_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(|row| row.document.0).collect())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: &UpdateOffer,
    ) -> Result<Option<Offer>, StoreError> {
        let now = Utc::now();

        // Top-level merge: present fields replace the stored ones wholesale
        let mut patch = serde_json::to_value(update).map_err(|e| StoreError::Backend(Box::new(e)))?;
        if let serde_json::Value::Object(fields) = &mut patch {
            let stamp = serde_json::to_value(now).map_err(|e| StoreError::Backend(Box::new(e)))?;
            fields.insert("updatedAt".to_string(), stamp);
        }

        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            UPDATE offers
            SET document = document || $2, updated_at = $3
            WHERE id = $1
            RETURNING document
            "#,
        )
        .bind(id)
        .bind(Json(patch))
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(|row| row.document.0))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError> {
        let row = sqlx::query_as::<_, OfferRow>("DELETE FROM offers WHERE id = $1 RETURNING document")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(row.map(|row| row.document.0))
    }
}
