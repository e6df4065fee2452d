use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Listing;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateListingRequest {
    pub category_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: String,

    pub description: Option<String>,

    /// Non-negative; absent means "price on request".
    pub price: Option<Decimal>,

    #[validate(length(min = 3, max = 3, message = "currency must be a 3-letter code"))]
    pub currency: String,

    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency: String,
    pub location: Option<String>,
    pub status: String,
    /// Display images: the `images` array, or the legacy single URL when
    /// the array is empty.
    pub images: Vec<String>,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        let images = listing.display_images();
        Self {
            id: listing.id,
            user_id: listing.user_id,
            category_id: listing.category_id,
            title: listing.title,
            description: listing.description,
            price: listing.price,
            currency: listing.currency,
            location: listing.location,
            status: listing.status,
            images,
            views_count: listing.views_count,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// Search results always report their count, zero or not.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub items: Vec<ListingResponse>,
}
