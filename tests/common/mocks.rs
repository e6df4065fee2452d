use async_trait::async_trait;
use chrono::Utc;
use classifieds_backend::domain::{Category, Listing, NewListing};
use classifieds_backend::error::{AppError, AppResult};
use classifieds_backend::infrastructure::auth::AuthProviderClient;
use classifieds_backend::infrastructure::repositories::{CategoryRepository, ListingRepository};
use classifieds_backend::infrastructure::storage::ObjectStorage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

fn store_down() -> AppError {
    AppError::InternalError(anyhow::anyhow!("simulated store failure"))
}

#[derive(Default)]
pub struct MockCategoryRepo {
    pub categories: Mutex<Vec<Category>>,
}

#[async_trait]
impl CategoryRepository for MockCategoryRepo {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let mut categories = self
            .categories
            .lock()
            .expect("categories mutex poisoned")
            .clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .expect("categories mutex poisoned")
            .iter()
            .find(|category| category.slug == slug)
            .cloned())
    }
}

pub struct FailingCategoryRepo;

#[async_trait]
impl CategoryRepository for FailingCategoryRepo {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        Err(store_down())
    }

    async fn find_by_slug(&self, _slug: &str) -> AppResult<Option<Category>> {
        Err(store_down())
    }
}

#[derive(Default)]
pub struct MockListingRepo {
    pub listings: Mutex<Vec<Listing>>,
    pub search_calls: AtomicUsize,
    pub fail_insert: bool,
}

impl MockListingRepo {
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: Mutex::new(listings),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ListingRepository for MockListingRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        Ok(self
            .listings
            .lock()
            .expect("listings mutex poisoned")
            .iter()
            .find(|listing| listing.id == id)
            .cloned())
    }

    async fn find_active_by_category(&self, category_id: Uuid) -> AppResult<Vec<Listing>> {
        let mut matches: Vec<Listing> = self
            .listings
            .lock()
            .expect("listings mutex poisoned")
            .iter()
            .filter(|listing| listing.category_id == category_id && listing.is_active())
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>> {
        let mut matches: Vec<Listing> = self
            .listings
            .lock()
            .expect("listings mutex poisoned")
            .iter()
            .filter(|listing| listing.user_id == Some(owner_id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Listing>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let needle = query.to_lowercase();
        Ok(self
            .listings
            .lock()
            .expect("listings mutex poisoned")
            .iter()
            .filter(|listing| listing.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert(&self, listing: &NewListing) -> AppResult<Listing> {
        if self.fail_insert {
            return Err(store_down());
        }
        let now = Utc::now();
        let created = Listing {
            id: Uuid::new_v4(),
            user_id: listing.user_id,
            category_id: listing.category_id,
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            currency: listing.currency.clone(),
            location: listing.location.clone(),
            status: "active".to_string(),
            images: listing.images.clone(),
            image_url: None,
            views_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.listings
            .lock()
            .expect("listings mutex poisoned")
            .push(created.clone());
        Ok(created)
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<u64> {
        let mut listings = self.listings.lock().expect("listings mutex poisoned");
        let before = listings.len();
        listings.retain(|listing| !(listing.id == id && listing.user_id == Some(owner_id)));
        Ok((before - listings.len()) as u64)
    }
}

pub struct FailingListingRepo;

#[async_trait]
impl ListingRepository for FailingListingRepo {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Listing>> {
        Err(store_down())
    }

    async fn find_active_by_category(&self, _category_id: Uuid) -> AppResult<Vec<Listing>> {
        Err(store_down())
    }

    async fn find_by_owner(&self, _owner_id: Uuid) -> AppResult<Vec<Listing>> {
        Err(store_down())
    }

    async fn search_by_title(&self, _query: &str) -> AppResult<Vec<Listing>> {
        Err(store_down())
    }

    async fn insert(&self, _listing: &NewListing) -> AppResult<Listing> {
        Err(store_down())
    }

    async fn delete_owned(&self, _id: Uuid, _owner_id: Uuid) -> AppResult<u64> {
        Err(store_down())
    }
}

/// Records uploads and deletes. `fail_after` makes the nth upload fail.
#[derive(Default)]
pub struct MockStorage {
    pub uploaded: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_after: Option<usize>,
}

impl MockStorage {
    pub fn failing_after(successes: usize) -> Self {
        Self {
            fail_after: Some(successes),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn upload(&self, key: &str, _content_type: &str, _bytes: Vec<u8>) -> AppResult<String> {
        let mut uploaded = self.uploaded.lock().expect("uploaded mutex poisoned");
        if self.fail_after.is_some_and(|limit| uploaded.len() >= limit) {
            return Err(AppError::storage_unavailable("simulated upload failure"));
        }
        uploaded.push(key.to_string());
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.deleted
            .lock()
            .expect("deleted mutex poisoned")
            .push(key.to_string());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://cdn.test/images/{key}")
    }
}

#[derive(Default)]
pub struct MockAuthProvider {
    pub sent_links: Mutex<Vec<(String, String)>>,
    pub signed_out: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl AuthProviderClient for MockAuthProvider {
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::auth_provider_unavailable(
                "simulated provider outage",
            ));
        }
        self.sent_links
            .lock()
            .expect("sent_links mutex poisoned")
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::auth_provider_unavailable(
                "simulated provider outage",
            ));
        }
        self.signed_out
            .lock()
            .expect("signed_out mutex poisoned")
            .push(access_token.to_string());
        Ok(())
    }
}
