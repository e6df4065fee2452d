use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{CreateListingRequest, ListingResponse, SearchResponse};
use crate::domain::{NewListing, MAX_IMAGE_UPLOAD_BYTES, MAX_LISTING_IMAGES};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::ListingRepository;
use crate::infrastructure::storage::{object_key, ObjectStorage};

/// An image file received with a create request, before upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Clone)]
pub struct ListingService {
    listing_repo: Arc<dyn ListingRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl ListingService {
    pub fn new(listing_repo: Arc<dyn ListingRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            listing_repo,
            storage,
        }
    }

    /// Active listings in a category, newest first. Empty on store failure.
    pub async fn browse_category(&self, category_id: Uuid) -> Vec<ListingResponse> {
        match self.listing_repo.find_active_by_category(category_id).await {
            Ok(listings) => listings.into_iter().map(ListingResponse::from).collect(),
            Err(error) => {
                warn!(%category_id, %error, "failed to fetch category listings; serving empty list");
                Vec::new()
            }
        }
    }

    /// An owner's listings regardless of status. Empty on store failure.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Vec<ListingResponse> {
        match self.listing_repo.find_by_owner(owner_id).await {
            Ok(listings) => listings.into_iter().map(ListingResponse::from).collect(),
            Err(error) => {
                warn!(%owner_id, %error, "failed to fetch owner listings; serving empty list");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ListingResponse> {
        let listing = self
            .listing_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("listing not found".to_string()))?;
        Ok(listing.into())
    }

    /// Title search. A blank query short-circuits without touching the
    /// store; the result always carries its count.
    pub async fn search(&self, raw_query: &str) -> AppResult<SearchResponse> {
        let query = raw_query.trim();
        if query.is_empty() {
            return Ok(SearchResponse {
                query: String::new(),
                total: 0,
                items: Vec::new(),
            });
        }

        let items: Vec<ListingResponse> = self
            .listing_repo
            .search_by_title(query)
            .await?
            .into_iter()
            .map(ListingResponse::from)
            .collect();

        Ok(SearchResponse {
            query: query.to_string(),
            total: items.len(),
            items,
        })
    }

    /// Creates a listing with all-or-nothing visibility: every image is
    /// uploaded before the row is inserted, and any failure along the way
    /// deletes the objects uploaded so far.
    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateListingRequest,
        images: Vec<ImageUpload>,
    ) -> AppResult<ListingResponse> {
        request.validate()?;

        if let Some(price) = request.price {
            if price < Decimal::ZERO {
                return Err(AppError::validation_error(
                    "price must be a non-negative number",
                ));
            }
        }
        if images.len() > MAX_LISTING_IMAGES {
            return Err(AppError::validation_error(format!(
                "a listing can carry at most {MAX_LISTING_IMAGES} images"
            )));
        }
        if let Some(oversized) = images
            .iter()
            .find(|image| image.data.len() > MAX_IMAGE_UPLOAD_BYTES)
        {
            return Err(AppError::validation_error(format!(
                "image {} exceeds the {} MiB limit",
                oversized.filename,
                MAX_IMAGE_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        let (image_urls, uploaded_keys) = self.upload_all(&images).await?;

        let new_listing = NewListing {
            user_id: Some(owner_id),
            category_id: request.category_id,
            title: request.title,
            description: request.description,
            price: request.price,
            currency: request.currency,
            location: request.location,
            images: image_urls,
        };
        if let Err(error) = new_listing.validate() {
            self.rollback_uploads(&uploaded_keys).await;
            return Err(error.into());
        }

        match self.listing_repo.insert(&new_listing).await {
            Ok(created) => {
                info!(listing_id = %created.id, owner_id = %owner_id, "listing created");
                Ok(created.into())
            }
            Err(error) => {
                self.rollback_uploads(&uploaded_keys).await;
                Err(error)
            }
        }
    }

    /// Deletes a listing owned by `acting_user_id`.
    ///
    /// The local ownership check fails fast; the repository predicate
    /// (`id AND user_id`) remains the authoritative guard. A repeat delete
    /// of the same id reports NotFound.
    pub async fn delete(&self, acting_user_id: Uuid, listing_id: Uuid) -> AppResult<()> {
        let listing = self
            .listing_repo
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("listing not found".to_string()))?;

        if listing.user_id != Some(acting_user_id) {
            return Err(AppError::Forbidden(
                "you can only delete your own listings".to_string(),
            ));
        }

        let removed = self
            .listing_repo
            .delete_owned(listing_id, acting_user_id)
            .await?;
        if removed == 0 {
            return Err(AppError::NotFound("listing not found".to_string()));
        }

        info!(%listing_id, user_id = %acting_user_id, "listing deleted");
        Ok(())
    }

    /// Uploads sequentially, preserving input order in the returned URLs.
    /// The first failure rolls back everything uploaded so far.
    async fn upload_all(
        &self,
        images: &[ImageUpload],
    ) -> AppResult<(Vec<String>, Vec<String>)> {
        let mut urls = Vec::with_capacity(images.len());
        let mut keys = Vec::with_capacity(images.len());

        for image in images {
            let key = object_key(&image.filename);
            match self
                .storage
                .upload(&key, &image.content_type, image.data.clone())
                .await
            {
                Ok(url) => {
                    urls.push(url);
                    keys.push(key);
                }
                Err(error) => {
                    warn!(filename = %image.filename, %error, "image upload failed; aborting create");
                    self.rollback_uploads(&keys).await;
                    return Err(error);
                }
            }
        }

        Ok((urls, keys))
    }

    /// Best-effort cleanup; a failed delete leaves an orphaned object and a
    /// log line, never a visible half-created listing.
    async fn rollback_uploads(&self, keys: &[String]) {
        for key in keys {
            if let Err(error) = self.storage.delete(key).await {
                warn!(%key, %error, "failed to clean up uploaded object");
            }
        }
    }
}
