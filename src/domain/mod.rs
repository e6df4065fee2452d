pub mod category;
pub mod errors;
pub mod listing;
pub mod session;

pub use category::{build_category_tree, Category, CategoryNode};
pub use errors::DomainError;
pub use listing::{Listing, NewListing, MAX_IMAGE_UPLOAD_BYTES, MAX_LISTING_IMAGES, STATUS_ACTIVE};
pub use session::SessionUser;
