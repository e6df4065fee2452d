use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::errors::DomainError;

/// Upper bound on images per listing, enforced before any upload starts.
pub const MAX_LISTING_IMAGES: usize = 5;

/// Upper bound on a single image file, enforced both while the multipart
/// part streams in and again before upload.
pub const MAX_IMAGE_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// The only status this application ever writes. `status` is a free string
/// in the store, but the visible lifecycle is `created(active) -> deleted`.
pub const STATUS_ACTIVE: &str = "active";

/// A single classified-ad record owned by at most one identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency: String,
    pub location: Option<String>,
    pub status: String,
    pub images: Vec<String>,
    /// Legacy single-URL column. Never written by this application; still
    /// read as a fallback when `images` is empty.
    pub image_url: Option<String>,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    /// Image URLs for display, falling back to the legacy `image_url`
    /// column when the `images` array is empty.
    pub fn display_images(&self) -> Vec<String> {
        if !self.images.is_empty() {
            return self.images.clone();
        }
        self.image_url.clone().into_iter().collect()
    }
}

/// Typed construction payload for a new listing row.
///
/// The owner is modeled as present/absent because the column is nullable;
/// the API layer always resolves a session before building one of these.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub user_id: Option<Uuid>,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency: String,
    pub location: Option<String>,
    pub images: Vec<String>,
}

impl NewListing {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }
        if let Some(price) = self.price {
            if price < Decimal::ZERO {
                return Err(DomainError::ValidationError(
                    "price must not be negative".to_string(),
                ));
            }
        }
        if self.images.len() > MAX_LISTING_IMAGES {
            return Err(DomainError::BusinessRuleViolation(format!(
                "a listing can carry at most {MAX_LISTING_IMAGES} images"
            )));
        }
        Ok(())
    }
}
