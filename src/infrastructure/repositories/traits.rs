use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Listing, NewListing};
use crate::error::AppResult;

/// Read-only access to the administratively seeded category taxonomy.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name ascending.
    async fn find_all(&self) -> AppResult<Vec<Category>>;
    /// Zero rows is an expected outcome here, distinct from a store error.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>>;
}

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>>;
    /// Active listings in a category, newest first.
    async fn find_active_by_category(&self, category_id: Uuid) -> AppResult<Vec<Listing>>;
    /// All of an owner's listings regardless of status, newest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>>;
    /// Case-insensitive substring match on the title. Implementations must
    /// treat `query` as literal text, not as a pattern. Does not filter by
    /// status.
    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Listing>>;
    async fn insert(&self, listing: &NewListing) -> AppResult<Listing>;
    /// Deletes only when both id and owner match; the store-side predicate
    /// is the authoritative ownership guard. Returns the number of rows
    /// removed (0 or 1).
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<u64>;
}
