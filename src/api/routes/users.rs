use actix_web::{web, HttpResponse};

use crate::api::dtos::ListingResponse;
use crate::api::routes::AppState;
use crate::middleware::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users").route("/me/listings", web::get().to(my_listings)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me/listings",
    responses(
        (status = 200, description = "The caller's listings, any status", body = [ListingResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn my_listings(state: web::Data<AppState>, user: AuthenticatedUser) -> HttpResponse {
    let listings = state.listing_service.list_by_owner(user.0.id).await;
    HttpResponse::Ok().json(listings)
}
