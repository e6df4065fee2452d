use std::str::FromStr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

mod common;

use crate::common::fixtures::{active_listing, sold_listing};
use crate::common::mocks::{FailingListingRepo, MockListingRepo, MockStorage};
use actix_rt::test;
use classifieds_backend::api::dtos::CreateListingRequest;
use classifieds_backend::application::{ImageUpload, ListingService};
use classifieds_backend::domain::MAX_IMAGE_UPLOAD_BYTES;
use classifieds_backend::error::AppError;
use classifieds_backend::infrastructure::repositories::ListingRepository;
use classifieds_backend::infrastructure::storage::ObjectStorage;
use rust_decimal::Decimal;
use uuid::Uuid;

fn create_request(category_id: Uuid, title: &str, price: Option<&str>) -> CreateListingRequest {
    CreateListingRequest {
        category_id,
        title: title.to_string(),
        description: Some("labā stāvoklī".to_string()),
        price: price.map(|p| Decimal::from_str(p).expect("test price must parse")),
        currency: "EUR".to_string(),
        location: Some("Rīga".to_string()),
    }
}

fn image(name: &str) -> ImageUpload {
    ImageUpload {
        filename: name.to_string(),
        content_type: "image/jpeg".to_string(),
        data: vec![0xFF, 0xD8, 0xFF],
    }
}

#[test]
async fn browse_category_excludes_inactive_listings() {
    let category_id = Uuid::new_v4();
    let repo = Arc::new(MockListingRepo::with_listings(vec![
        active_listing(category_id, None, "Velosipēds"),
        sold_listing(category_id, None, "Galds"),
    ]));
    let service = ListingService::new(repo, Arc::new(MockStorage::default()));

    let listings = service.browse_category(category_id).await;

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Velosipēds");
}

#[test]
async fn browse_category_degrades_to_empty_when_store_fails() {
    let service = ListingService::new(
        Arc::new(FailingListingRepo),
        Arc::new(MockStorage::default()),
    );

    let listings = service.browse_category(Uuid::new_v4()).await;

    assert!(listings.is_empty());
}

#[test]
async fn create_uploads_images_in_input_order() {
    let repo = Arc::new(MockListingRepo::default());
    let storage = Arc::new(MockStorage::default());
    let service = ListingService::new(repo, storage.clone());

    let created = service
        .create(
            Uuid::new_v4(),
            create_request(Uuid::new_v4(), "Velosipēds", Some("50")),
            vec![image("f1.jpg"), image("f2.jpg"), image("f3.jpg")],
        )
        .await
        .expect("create should succeed");

    let uploaded = storage.uploaded.lock().expect("uploaded mutex poisoned");
    assert_eq!(uploaded.len(), 3);
    let expected: Vec<String> = uploaded.iter().map(|key| storage.public_url(key)).collect();
    assert_eq!(created.images, expected);
}

#[test]
async fn create_rolls_back_uploads_when_an_upload_fails() {
    let repo = Arc::new(MockListingRepo::default());
    let storage = Arc::new(MockStorage::failing_after(1));
    let service = ListingService::new(repo.clone(), storage.clone());

    let error = service
        .create(
            Uuid::new_v4(),
            create_request(Uuid::new_v4(), "Velosipēds", Some("50")),
            vec![image("f1.jpg"), image("f2.jpg")],
        )
        .await
        .expect_err("upload failure must abort the create");

    assert!(matches!(error, AppError::ServiceUnavailable { .. }));
    let uploaded = storage.uploaded.lock().expect("uploaded mutex poisoned");
    let deleted = storage.deleted.lock().expect("deleted mutex poisoned");
    assert_eq!(*uploaded, *deleted);
    assert!(repo
        .listings
        .lock()
        .expect("listings mutex poisoned")
        .is_empty());
}

#[test]
async fn create_rolls_back_uploads_when_insert_fails() {
    let repo = Arc::new(MockListingRepo {
        fail_insert: true,
        ..MockListingRepo::default()
    });
    let storage = Arc::new(MockStorage::default());
    let service = ListingService::new(repo, storage.clone());

    service
        .create(
            Uuid::new_v4(),
            create_request(Uuid::new_v4(), "Velosipēds", Some("50")),
            vec![image("f1.jpg"), image("f2.jpg")],
        )
        .await
        .expect_err("insert failure must abort the create");

    let uploaded = storage.uploaded.lock().expect("uploaded mutex poisoned");
    let deleted = storage.deleted.lock().expect("deleted mutex poisoned");
    assert_eq!(*uploaded, *deleted);
}

#[test]
async fn create_rejects_more_than_five_images() {
    let storage = Arc::new(MockStorage::default());
    let service = ListingService::new(Arc::new(MockListingRepo::default()), storage.clone());

    let images = (0..6).map(|i| image(&format!("f{i}.jpg"))).collect();
    let error = service
        .create(
            Uuid::new_v4(),
            create_request(Uuid::new_v4(), "Velosipēds", Some("50")),
            images,
        )
        .await
        .expect_err("six images must be rejected");

    assert!(matches!(error, AppError::ValidationError { .. }));
    assert!(storage
        .uploaded
        .lock()
        .expect("uploaded mutex poisoned")
        .is_empty());
}

#[test]
async fn create_rejects_negative_price() {
    let service = ListingService::new(
        Arc::new(MockListingRepo::default()),
        Arc::new(MockStorage::default()),
    );

    let error = service
        .create(
            Uuid::new_v4(),
            create_request(Uuid::new_v4(), "Velosipēds", Some("-1")),
            Vec::new(),
        )
        .await
        .expect_err("negative price must be rejected");

    assert!(matches!(error, AppError::ValidationError { .. }));
}

#[test]
async fn created_listing_is_retrievable_with_its_price() {
    let repo = Arc::new(MockListingRepo::default());
    let service = ListingService::new(repo, Arc::new(MockStorage::default()));

    let created = service
        .create(
            Uuid::new_v4(),
            create_request(Uuid::new_v4(), "Velosipēds", Some("19.99")),
            Vec::new(),
        )
        .await
        .expect("create should succeed");

    let fetched = service
        .get_by_id(created.id)
        .await
        .expect("created listing should be retrievable");

    assert_eq!(fetched.price, Some(Decimal::from_str("19.99").unwrap()));
}

#[test]
async fn delete_removes_an_owned_listing() {
    let owner = Uuid::new_v4();
    let listing = active_listing(Uuid::new_v4(), Some(owner), "Velosipēds");
    let listing_id = listing.id;
    let repo = Arc::new(MockListingRepo::with_listings(vec![listing]));
    let service = ListingService::new(repo.clone(), Arc::new(MockStorage::default()));

    service
        .delete(owner, listing_id)
        .await
        .expect("owner delete should succeed");

    assert!(repo
        .listings
        .lock()
        .expect("listings mutex poisoned")
        .is_empty());
}

#[test]
async fn delete_rejects_a_non_owner_and_keeps_the_listing() {
    let owner = Uuid::new_v4();
    let attacker = Uuid::new_v4();
    let listing = active_listing(Uuid::new_v4(), Some(owner), "Velosipēds");
    let listing_id = listing.id;
    let repo = Arc::new(MockListingRepo::with_listings(vec![listing]));
    let service = ListingService::new(repo.clone(), Arc::new(MockStorage::default()));

    let error = service
        .delete(attacker, listing_id)
        .await
        .expect_err("non-owner delete must be rejected");

    assert!(matches!(error, AppError::Forbidden(_)));
    assert_eq!(
        repo.listings
            .lock()
            .expect("listings mutex poisoned")
            .len(),
        1
    );
}

#[test]
async fn store_delete_predicate_rejects_a_mismatched_owner() {
    let owner = Uuid::new_v4();
    let attacker = Uuid::new_v4();
    let listing = active_listing(Uuid::new_v4(), Some(owner), "Velosipēds");
    let listing_id = listing.id;
    let repo = MockListingRepo::with_listings(vec![listing]);

    let removed = repo
        .delete_owned(listing_id, attacker)
        .await
        .expect("predicate check should not error");

    assert_eq!(removed, 0);
    assert_eq!(
        repo.listings
            .lock()
            .expect("listings mutex poisoned")
            .len(),
        1
    );

    let removed = repo
        .delete_owned(listing_id, owner)
        .await
        .expect("owner delete should not error");
    assert_eq!(removed, 1);
}

#[test]
async fn create_rejects_an_oversized_image_before_uploading() {
    let storage = Arc::new(MockStorage::default());
    let service = ListingService::new(Arc::new(MockListingRepo::default()), storage.clone());

    let oversized = ImageUpload {
        filename: "huge.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        data: vec![0; MAX_IMAGE_UPLOAD_BYTES + 1],
    };
    let error = service
        .create(
            Uuid::new_v4(),
            create_request(Uuid::new_v4(), "Velosipēds", Some("50")),
            vec![oversized],
        )
        .await
        .expect_err("oversized image must be rejected");

    assert!(matches!(error, AppError::ValidationError { .. }));
    assert!(storage
        .uploaded
        .lock()
        .expect("uploaded mutex poisoned")
        .is_empty());
}

#[test]
async fn repeated_delete_reports_not_found() {
    let owner = Uuid::new_v4();
    let listing = active_listing(Uuid::new_v4(), Some(owner), "Velosipēds");
    let listing_id = listing.id;
    let repo = Arc::new(MockListingRepo::with_listings(vec![listing]));
    let service = ListingService::new(repo, Arc::new(MockStorage::default()));

    service
        .delete(owner, listing_id)
        .await
        .expect("first delete should succeed");
    let error = service
        .delete(owner, listing_id)
        .await
        .expect_err("second delete must be rejected");

    assert!(matches!(error, AppError::NotFound(_)));
}

#[test]
async fn blank_search_short_circuits_without_querying_the_store() {
    let repo = Arc::new(MockListingRepo::default());
    let service = ListingService::new(repo.clone(), Arc::new(MockStorage::default()));

    let results = service.search("   ").await.expect("blank search succeeds");

    assert_eq!(results.total, 0);
    assert!(results.items.is_empty());
    assert_eq!(repo.search_calls.load(Ordering::SeqCst), 0);
}

#[test]
async fn search_matches_titles_case_insensitively() {
    let category_id = Uuid::new_v4();
    let repo = Arc::new(MockListingRepo::with_listings(vec![
        active_listing(category_id, None, "Velosipēds"),
        active_listing(category_id, None, "Galds"),
    ]));
    let service = ListingService::new(repo, Arc::new(MockStorage::default()));

    let lower = service.search("velo").await.expect("search succeeds");
    let upper = service.search("VELO").await.expect("search succeeds");

    assert_eq!(lower.total, 1);
    assert_eq!(lower.items[0].title, "Velosipēds");
    assert_eq!(upper.total, 1);
}

#[test]
async fn search_propagates_store_failures() {
    let service = ListingService::new(
        Arc::new(FailingListingRepo),
        Arc::new(MockStorage::default()),
    );

    let error = service
        .search("velo")
        .await
        .expect_err("store failure must propagate");

    assert!(!matches!(error, AppError::NotFound(_)));
}

#[test]
async fn my_listings_include_every_status() {
    let owner = Uuid::new_v4();
    let category_id = Uuid::new_v4();
    let repo = Arc::new(MockListingRepo::with_listings(vec![
        active_listing(category_id, Some(owner), "Velosipēds"),
        sold_listing(category_id, Some(owner), "Galds"),
        active_listing(category_id, Some(Uuid::new_v4()), "Krēsls"),
    ]));
    let service = ListingService::new(repo, Arc::new(MockStorage::default()));

    let listings = service.list_by_owner(owner).await;

    assert_eq!(listings.len(), 2);
}
