mod category_repository;
mod listing_repository;
mod traits;
mod utils;

pub use category_repository::CategoryRepositoryImpl;
pub use listing_repository::ListingRepositoryImpl;
pub use traits::{CategoryRepository, ListingRepository};
pub use utils::escape_like_pattern;
