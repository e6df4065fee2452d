pub mod auth_dto;
pub mod category_dto;
pub mod common;
pub mod listing_dto;

pub use auth_dto::*;
pub use category_dto::*;
pub use common::*;
pub use listing_dto::*;
