mod catalog_service;
mod listing_service;
mod session_service;

pub use catalog_service::CatalogService;
pub use listing_service::{ImageUpload, ListingService};
pub use session_service::{SessionService, SessionWatch};
