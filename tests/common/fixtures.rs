use chrono::Utc;
use classifieds_backend::domain::{Category, Listing, STATUS_ACTIVE};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn category(name: &str, slug: &str, parent_id: Option<Uuid>) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        parent_id,
        icon: None,
        created_at: Utc::now(),
    }
}

pub fn active_listing(category_id: Uuid, owner_id: Option<Uuid>, title: &str) -> Listing {
    Listing {
        id: Uuid::new_v4(),
        user_id: owner_id,
        category_id,
        title: title.to_string(),
        description: None,
        price: Some(Decimal::new(1500, 2)),
        currency: "EUR".to_string(),
        location: Some("Rīga".to_string()),
        status: STATUS_ACTIVE.to_string(),
        images: Vec::new(),
        image_url: None,
        views_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sold_listing(category_id: Uuid, owner_id: Option<Uuid>, title: &str) -> Listing {
    Listing {
        status: "sold".to_string(),
        ..active_listing(category_id, owner_id, title)
    }
}
