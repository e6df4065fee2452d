use std::str::FromStr;

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::api::dtos::{CreateListingRequest, ListingResponse, SearchQuery, SearchResponse};
use crate::api::routes::AppState;
use crate::application::ImageUpload;
use crate::domain::{MAX_IMAGE_UPLOAD_BYTES, MAX_LISTING_IMAGES};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthenticatedUser;

const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/listings")
            .route("", web::post().to(create_listing))
            .route("/search", web::get().to(search_listings))
            .route("/{id}", web::get().to(get_listing))
            .route("/{id}", web::delete().to(delete_listing)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/search",
    params(
        ("q" = String, Query, description = "Title search phrase")
    ),
    responses(
        (status = 200, description = "Listings whose titles match the phrase", body = SearchResponse)
    ),
    tag = "listings"
)]
pub async fn search_listings(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let results = state.listing_service.search(&query.q).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing id")
    ),
    responses(
        (status = 200, description = "Listing found", body = ListingResponse),
        (status = 404, description = "Listing not found")
    ),
    tag = "listings"
)]
pub async fn get_listing(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let listing = state.listing_service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(listing))
}

#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Listing created", body = ListingResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "listings"
)]
pub async fn create_listing(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let (request, images) = read_create_form(payload).await?;
    let created = state.listing_service.create(user.0.id, request, images).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing id")
    ),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Listing owned by another user"),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "listings"
)]
pub async fn delete_listing(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .listing_service
        .delete(user.0.id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Reads the multipart create form: text fields for the listing data plus
/// up to `MAX_LISTING_IMAGES` file parts named `images`. Unknown fields are
/// drained and ignored.
async fn read_create_form(
    mut payload: Multipart,
) -> AppResult<(CreateListingRequest, Vec<ImageUpload>)> {
    let mut category_id: Option<Uuid> = None;
    let mut title = String::new();
    let mut description: Option<String> = None;
    let mut price: Option<Decimal> = None;
    let mut currency: Option<String> = None;
    let mut location: Option<String> = None;
    let mut images: Vec<ImageUpload> = Vec::new();

    while let Some(field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart payload: {e}")))?
    {
        let name = field.name().to_string();
        match name.as_str() {
            "category_id" => {
                let text = read_field_text(field).await?;
                let parsed = Uuid::parse_str(text.trim()).map_err(|_| {
                    AppError::validation_error("category_id must be a valid UUID")
                })?;
                category_id = Some(parsed);
            }
            "title" => title = read_field_text(field).await?,
            "description" => {
                let text = read_field_text(field).await?;
                if !text.trim().is_empty() {
                    description = Some(text);
                }
            }
            "price" => {
                let text = read_field_text(field).await?;
                if !text.trim().is_empty() {
                    let parsed = Decimal::from_str(text.trim()).map_err(|_| {
                        AppError::validation_error("price must be a non-negative number")
                    })?;
                    price = Some(parsed);
                }
            }
            "currency" => {
                let text = read_field_text(field).await?;
                if !text.trim().is_empty() {
                    currency = Some(text.trim().to_uppercase());
                }
            }
            "location" => {
                let text = read_field_text(field).await?;
                if !text.trim().is_empty() {
                    location = Some(text);
                }
            }
            "images" => {
                if images.len() >= MAX_LISTING_IMAGES {
                    return Err(AppError::validation_error(format!(
                        "a listing can carry at most {MAX_LISTING_IMAGES} images"
                    )));
                }
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or("image")
                    .to_string();
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = read_field_bytes(field, MAX_IMAGE_UPLOAD_BYTES).await?;
                images.push(ImageUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {
                // drain and ignore
                read_field_bytes(field, MAX_TEXT_FIELD_BYTES).await?;
            }
        }
    }

    let category_id =
        category_id.ok_or_else(|| AppError::validation_error("category_id is required"))?;

    let request = CreateListingRequest {
        category_id,
        title,
        description,
        price,
        currency: currency.unwrap_or_else(|| "EUR".to_string()),
        location,
    };

    Ok((request, images))
}

/// Buffers a part, rejecting once it grows past `max_bytes` so an
/// oversized upload cannot exhaust memory mid-stream.
async fn read_field_bytes(mut field: Field, max_bytes: usize) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read multipart field: {e}")))?
    {
        if data.len() + chunk.len() > max_bytes {
            return Err(AppError::validation_error(format!(
                "multipart part exceeds the {max_bytes}-byte limit"
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_field_text(field: Field) -> AppResult<String> {
    let bytes = read_field_bytes(field, MAX_TEXT_FIELD_BYTES).await?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest("multipart text field is not valid UTF-8".to_string()))
}
