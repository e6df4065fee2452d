use actix_web::{web, HttpResponse};

use crate::api::dtos::{CategoryResponse, CategoryTreeResponse, ListingResponse};
use crate::api::routes::AppState;
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("/tree", web::get().to(category_tree))
            .route("/{slug}", web::get().to(get_category))
            .route("/{slug}/listings", web::get().to(category_listings)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories, name ascending", body = [CategoryResponse])
    ),
    tag = "categories"
)]
pub async fn list_categories(state: web::Data<AppState>) -> HttpResponse {
    let categories = state.catalog_service.list().await;
    HttpResponse::Ok().json(categories)
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/tree",
    responses(
        (status = 200, description = "Root categories with nested children", body = [CategoryTreeResponse])
    ),
    tag = "categories"
)]
pub async fn category_tree(state: web::Data<AppState>) -> HttpResponse {
    let tree = state.catalog_service.tree().await;
    HttpResponse::Ok().json(tree)
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let category = state.catalog_service.get_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{slug}/listings",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Active listings in the category, newest first", body = [ListingResponse]),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn category_listings(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let category = state.catalog_service.get_by_slug(&path.into_inner()).await?;
    let listings = state.listing_service.browse_category(category.id).await;
    Ok(HttpResponse::Ok().json(listings))
}
