use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Listing, NewListing, STATUS_ACTIVE};
use crate::error::AppResult;

use super::traits::ListingRepository;
use super::utils::escape_like_pattern;

const LISTING_COLUMNS: &str = "id, user_id, category_id, title, description, price, currency, \
     location, status, images, image_url, views_count, created_at, updated_at";

pub struct ListingRepositoryImpl {
    pool: PgPool,
}

impl ListingRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for ListingRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        let listing = sqlx::query_as::<_, Listing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(listing)
    }

    async fn find_active_by_category(&self, category_id: Uuid) -> AppResult<Vec<Listing>> {
        let listings = sqlx::query_as::<_, Listing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings \
             WHERE category_id = $1 AND status = $2 \
             ORDER BY created_at DESC"
        ))
        .bind(category_id)
        .bind(STATUS_ACTIVE)
        .fetch_all(&self.pool)
        .await?;
        Ok(listings)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>> {
        let listings = sqlx::query_as::<_, Listing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(listings)
    }

    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Listing>> {
        let pattern = format!("%{}%", escape_like_pattern(query));
        let listings = sqlx::query_as::<_, Listing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings \
             WHERE title ILIKE $1 \
             ORDER BY created_at DESC"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(listings)
    }

    async fn insert(&self, listing: &NewListing) -> AppResult<Listing> {
        let created = sqlx::query_as::<_, Listing>(&format!(
            "INSERT INTO listings \
             (user_id, category_id, title, description, price, currency, location, status, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {LISTING_COLUMNS}"
        ))
        .bind(listing.user_id)
        .bind(listing.category_id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(&listing.currency)
        .bind(&listing.location)
        .bind(STATUS_ACTIVE)
        .bind(&listing.images)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
